// ABOUTME: Integration tests for athlete and performance metric storage
// ABOUTME: Covers idempotent inserts, best/latest lookups, filtered history, and file persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Performance Metric Database Tests
//!
//! Tests the storage layer directly:
//! - `AthleteManager`: create, get, exists, list
//! - `PerformanceMetricManager`: insert, source lookups, best/latest, history filters
//! - `PerformanceMetricRepositoryImpl`: error mapping through the port

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_athlete, create_test_database, day, repository};
use podium_performance::{
    database::{Database, MetricHistoryFilter, SaveOutcome},
    errors::{DatabaseError, ErrorCode},
    models::{Athlete, MetricSource, MetricSourceKind, MetricType, PerformanceMetric},
};
use tempfile::TempDir;
use uuid::Uuid;

// ============================================================================
// Helpers
// ============================================================================

fn manual(athlete_id: Uuid, metric_type: MetricType, value: f64, days: i64) -> PerformanceMetric {
    PerformanceMetric::new(athlete_id, metric_type, value, day(days), MetricSource::Manual)
}

fn from_assessment(athlete_id: Uuid, metric_type: MetricType, value: f64) -> PerformanceMetric {
    PerformanceMetric::new(
        athlete_id,
        metric_type,
        value,
        day(0),
        MetricSource::Assessment {
            assessment_result_id: Uuid::new_v4(),
        },
    )
}

// ============================================================================
// Athletes
// ============================================================================

#[tokio::test]
async fn test_athlete_create_get_exists() {
    let database = create_test_database().await.unwrap();
    let athletes = database.athletes();
    let athlete = Athlete::new("Riley Stone");

    athletes.create(&athlete).await.unwrap();

    let fetched = athletes.get(athlete.id).await.unwrap().unwrap();
    assert_eq!(fetched.display_name, "Riley Stone");
    assert_eq!(fetched.id, athlete.id);
    assert!(athletes.exists(athlete.id).await.unwrap());
    assert!(!athletes.exists(Uuid::new_v4()).await.unwrap());
    assert!(athletes.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_athlete_duplicate_and_blank_name_rejected() {
    let database = create_test_database().await.unwrap();
    let athletes = database.athletes();
    let athlete = Athlete::new("Sam Ortiz");
    athletes.create(&athlete).await.unwrap();

    let duplicate = athletes.create(&athlete).await.unwrap_err();
    assert_eq!(duplicate.code, ErrorCode::ResourceAlreadyExists);

    let blank = athletes.create(&Athlete::new("   ")).await.unwrap_err();
    assert_eq!(blank.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_athletes_listed_by_name() {
    let database = create_test_database().await.unwrap();
    create_test_athlete(&database, "Zoe Adams").await.unwrap();
    create_test_athlete(&database, "Alex Young").await.unwrap();

    let names: Vec<String> = database
        .athletes()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|athlete| athlete.display_name)
        .collect();
    assert_eq!(names, vec!["Alex Young", "Zoe Adams"]);
}

// ============================================================================
// Inserts
// ============================================================================

#[tokio::test]
async fn test_insert_and_get_round_trip() {
    let database = create_test_database().await.unwrap();
    let athlete = create_test_athlete(&database, "Taylor Fox").await.unwrap();
    let metric = from_assessment(athlete, MetricType::MileTime, 362.4)
        .with_unit("seconds")
        .with_notes(Some("Track, windy".into()))
        .with_personal_record(true);

    let outcome = database.performance_metrics().insert(&metric).await.unwrap();
    assert!(outcome.was_inserted());

    let stored = database
        .performance_metrics()
        .get(metric.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.metric_type, MetricType::MileTime);
    assert!((stored.value - 362.4).abs() < f64::EPSILON);
    assert_eq!(stored.unit, "seconds");
    assert_eq!(stored.notes.as_deref(), Some("Track, windy"));
    assert_eq!(stored.source, metric.source);
    assert!(stored.is_personal_record);
    assert_eq!(stored.recorded_at, metric.recorded_at);
}

#[tokio::test]
async fn test_insert_same_source_returns_existing() {
    let database = create_test_database().await.unwrap();
    let athlete = create_test_athlete(&database, "Jamie Cruz").await.unwrap();
    let metrics = database.performance_metrics();
    let first = from_assessment(athlete, MetricType::VerticalJump, 30.0);

    metrics.insert(&first).await.unwrap();

    let mut retry = PerformanceMetric::new(
        athlete,
        MetricType::VerticalJump,
        31.0,
        day(1),
        first.source,
    );
    retry.is_personal_record = true;
    let outcome = metrics.insert(&retry).await.unwrap();

    match outcome {
        SaveOutcome::AlreadyExists(existing) => {
            assert_eq!(existing.id, first.id);
            assert!((existing.value - 30.0).abs() < f64::EPSILON);
        }
        SaveOutcome::Inserted(_) => panic!("second insert for the same source must not write"),
    }
}

#[tokio::test]
async fn test_insert_rejects_unknown_athlete_and_bad_values() {
    let database = create_test_database().await.unwrap();
    let metrics = database.performance_metrics();

    let orphan = manual(Uuid::new_v4(), MetricType::BodyWeight, 180.0, 0);
    let error = metrics.insert(&orphan).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let athlete = create_test_athlete(&database, "Robin Vale").await.unwrap();
    let infinite = manual(athlete, MetricType::BodyWeight, f64::INFINITY, 0);
    let error = metrics.insert(&infinite).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let entry = manual(athlete, MetricType::BodyWeight, 181.0, 0);
    metrics.insert(&entry).await.unwrap();
    let error = metrics.insert(&entry).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
}

// ============================================================================
// Best and latest
// ============================================================================

#[tokio::test]
async fn test_current_best_respects_direction() {
    let database = create_test_database().await.unwrap();
    let athlete = create_test_athlete(&database, "Quinn Bell").await.unwrap();
    let metrics = database.performance_metrics();

    for (days, value) in [(0, 4.72), (7, 4.58), (14, 4.66)] {
        metrics
            .insert(&manual(athlete, MetricType::FortyYardDash, value, days))
            .await
            .unwrap();
    }
    for (days, value) in [(0, 225.0), (7, 245.0), (14, 235.0)] {
        metrics
            .insert(&manual(athlete, MetricType::BenchPressMax, value, days))
            .await
            .unwrap();
    }

    let fastest = metrics
        .find_current_best(athlete, MetricType::FortyYardDash)
        .await
        .unwrap()
        .unwrap();
    assert!((fastest.value - 4.58).abs() < f64::EPSILON);

    let heaviest = metrics
        .find_current_best(athlete, MetricType::BenchPressMax)
        .await
        .unwrap()
        .unwrap();
    assert!((heaviest.value - 245.0).abs() < f64::EPSILON);

    assert!(metrics
        .find_current_best(athlete, MetricType::SquatMax)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_current_best_tie_goes_to_earliest() {
    let database = create_test_database().await.unwrap();
    let athlete = create_test_athlete(&database, "Parker Lane").await.unwrap();
    let metrics = database.performance_metrics();

    let later = manual(athlete, MetricType::PullUpsMax, 15.0, 10);
    let earlier = manual(athlete, MetricType::PullUpsMax, 15.0, 2);
    metrics.insert(&later).await.unwrap();
    metrics.insert(&earlier).await.unwrap();

    let best = metrics
        .find_current_best(athlete, MetricType::PullUpsMax)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(best.id, earlier.id);
}

#[tokio::test]
async fn test_find_latest_uses_recorded_date() {
    let database = create_test_database().await.unwrap();
    let athlete = create_test_athlete(&database, "Drew Hale").await.unwrap();
    let metrics = database.performance_metrics();

    let newest = manual(athlete, MetricType::BodyWeight, 184.0, 30);
    metrics.insert(&newest).await.unwrap();
    metrics
        .insert(&manual(athlete, MetricType::BodyWeight, 180.0, 1))
        .await
        .unwrap();

    let latest = metrics
        .find_latest(athlete, MetricType::BodyWeight)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, newest.id);
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_history_filters_and_paging() {
    let database = create_test_database().await.unwrap();
    let athlete = create_test_athlete(&database, "Skyler Moss").await.unwrap();
    let other = create_test_athlete(&database, "Other Athlete").await.unwrap();
    let metrics = database.performance_metrics();

    for days in [20, 0, 10, 30] {
        let metric = manual(athlete, MetricType::SquatMax, 300.0 + f64::from(days), i64::from(days))
            .with_personal_record(days >= 20);
        metrics.insert(&metric).await.unwrap();
    }
    metrics
        .insert(&manual(other, MetricType::SquatMax, 500.0, 5))
        .await
        .unwrap();
    metrics
        .insert(&from_assessment(athlete, MetricType::SquatMax, 315.0))
        .await
        .unwrap();

    let all = metrics
        .list(&MetricHistoryFilter::for_metric(athlete, MetricType::SquatMax))
        .await
        .unwrap();
    assert_eq!(all.len(), 5);
    assert!(all.windows(2).all(|w| w[0].recorded_at <= w[1].recorded_at));
    assert!(all.iter().all(|m| m.athlete_id == athlete));

    let ranged = metrics
        .list(
            &MetricHistoryFilter::for_metric(athlete, MetricType::SquatMax)
                .between(Some(day(5)), Some(day(20))),
        )
        .await
        .unwrap();
    let values: Vec<f64> = ranged.iter().map(|m| m.value).collect();
    assert_eq!(values, vec![310.0, 320.0]);

    let paged = metrics
        .list(
            &MetricHistoryFilter::for_metric(athlete, MetricType::SquatMax)
                .page(Some(2), Some(1)),
        )
        .await
        .unwrap();
    assert_eq!(paged.len(), 2);
    assert_eq!(paged[0].recorded_at, all[1].recorded_at);

    let manual_prs = metrics
        .list(&MetricHistoryFilter {
            athlete_id: Some(athlete),
            source_kind: Some(MetricSourceKind::Manual),
            personal_records_only: true,
            ..MetricHistoryFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(manual_prs.len(), 2);
}

// ============================================================================
// Repository port
// ============================================================================

#[tokio::test]
async fn test_repository_maps_missing_athlete() {
    let database = create_test_database().await.unwrap();
    let port = repository(&database);

    let error = port
        .save(&manual(Uuid::new_v4(), MetricType::BroadJump, 96.0, 0))
        .await
        .unwrap_err();
    assert!(matches!(error, DatabaseError::NotFound { .. }));

    let athlete = create_test_athlete(&database, "Rowan Pike").await.unwrap();
    assert!(port.athlete_exists(athlete).await.unwrap());
    let saved = port
        .save(&manual(athlete, MetricType::BroadJump, 96.0, 0))
        .await
        .unwrap();
    let latest = port
        .find_latest_by_athlete_and_metric_type(athlete, MetricType::BroadJump)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, saved.metric().id);
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    common::init_test_logging();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("podium.db");
    let url = format!("sqlite:{}", path.display());

    let athlete = {
        let database = Database::new(&url).await.unwrap();
        database.migrate().await.unwrap();
        let athlete = create_test_athlete(&database, "Morgan Hill").await.unwrap();
        database
            .performance_metrics()
            .insert(&manual(athlete, MetricType::OverheadPressMax, 155.0, 0))
            .await
            .unwrap();
        database.pool().close().await;
        athlete
    };

    let reopened = Database::new(&url).await.unwrap();
    reopened.migrate().await.unwrap();
    assert!(reopened.athletes().exists(athlete).await.unwrap());
    let best = reopened
        .performance_metrics()
        .find_current_best(athlete, MetricType::OverheadPressMax)
        .await
        .unwrap()
        .unwrap();
    assert!((best.value - 155.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_unreachable_database_is_a_connection_error() {
    let temp_dir = TempDir::new().unwrap();
    let url = format!(
        "sqlite:{}",
        temp_dir.path().join("missing").join("podium.db").display()
    );

    let error = Database::new(&url).await.err().unwrap();
    assert_eq!(error.code, ErrorCode::DatabaseError);
    assert!(error.message.starts_with("Database connection failed"));
}

#[tokio::test]
async fn test_insert_on_closed_pool_maps_storage_error() {
    let database = create_test_database().await.unwrap();
    let athlete = create_test_athlete(&database, "Sage Porter").await.unwrap();
    database.pool().close().await;

    let error = database
        .performance_metrics()
        .insert(&manual(athlete, MetricType::MileTime, 372.0, 0))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::DatabaseError);
    assert!(error.message.starts_with("Database connection failed"));
    assert!(error.source.is_some());
}
