// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, athlete, service, and observation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `podium_performance`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use podium_performance::{
    config::DerivationConfig,
    database::{
        repositories::{PerformanceMetricRepository, PerformanceMetricRepositoryImpl},
        Database,
    },
    models::{AssessmentObservation, Athlete, MeasurementKind, WorkoutObservation},
    services::{MetricDerivationService, ProgressReportService},
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity; tests are quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup: migrated in-memory `SQLite`
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    database.migrate().await?;
    Ok(database)
}

/// Register an athlete and return its id
pub async fn create_test_athlete(database: &Database, name: &str) -> Result<Uuid> {
    let athlete = Athlete::new(name);
    database.athletes().create(&athlete).await?;
    Ok(athlete.id)
}

/// Repository port over the database
pub fn repository(database: &Database) -> Arc<dyn PerformanceMetricRepository> {
    Arc::new(PerformanceMetricRepositoryImpl::new(database.clone()))
}

/// Derivation service with default settings
pub fn derivation_service(database: &Database) -> MetricDerivationService {
    MetricDerivationService::new(repository(database), DerivationConfig::default())
}

/// Report service over the database
pub fn report_service(database: &Database) -> ProgressReportService {
    ProgressReportService::new(repository(database))
}

/// Fixed reference date plus `days`
pub fn day(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 3, 15, 30, 0).unwrap() + Duration::days(days)
}

/// Auto-generating assessment result
pub fn assessment(
    athlete_id: Uuid,
    name: &str,
    code: Option<&str>,
    kind: MeasurementKind,
    value: f64,
    test_date: DateTime<Utc>,
) -> AssessmentObservation {
    AssessmentObservation {
        id: Uuid::new_v4(),
        athlete_id,
        assessment_name: name.to_owned(),
        assessment_code: code.map(str::to_owned),
        unit: None,
        measurement_kind: kind,
        scoring_direction: None,
        auto_generate_metric: true,
        value,
        test_date,
        is_baseline: false,
        recorded_by: None,
        notes: None,
    }
}

/// Logged workout exercise with load data
pub fn workout(
    athlete_id: Uuid,
    exercise_name: &str,
    weight: f64,
    reps: u32,
    workout_date: DateTime<Utc>,
) -> WorkoutObservation {
    WorkoutObservation {
        id: Uuid::new_v4(),
        athlete_id,
        exercise_name: exercise_name.to_owned(),
        exercise_code: None,
        actual_weight: Some(weight),
        actual_reps: Some(reps),
        workout_date,
    }
}
