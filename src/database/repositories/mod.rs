// ABOUTME: Storage ports consumed by the derivation service
// ABOUTME: Async repository traits decoupling services from the SQL managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Repository traits
//!
//! Services depend on these traits rather than on [`super::Database`], so
//! tests can substitute an in-memory store and the orchestration logic stays
//! independent of SQL.

mod performance_metric_repository;

pub use performance_metric_repository::PerformanceMetricRepositoryImpl;

use super::{MetricHistoryFilter, SaveOutcome};
use crate::errors::DatabaseError;
use async_trait::async_trait;
use podium_core::models::{MetricType, PerformanceMetric};
use uuid::Uuid;

/// Canonical metric storage port
#[async_trait]
pub trait PerformanceMetricRepository: Send + Sync {
    /// Best stored metric for the athlete and type by the type's scoring direction
    async fn find_current_best(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
    ) -> Result<Option<PerformanceMetric>, DatabaseError>;

    /// Most recently recorded metric for the athlete and type
    async fn find_latest_by_athlete_and_metric_type(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
    ) -> Result<Option<PerformanceMetric>, DatabaseError>;

    /// Metric derived from the given assessment result
    async fn find_by_source_assessment(
        &self,
        assessment_result_id: Uuid,
    ) -> Result<Option<PerformanceMetric>, DatabaseError>;

    /// Metric derived from the given workout exercise
    async fn find_by_source_workout_exercise(
        &self,
        workout_exercise_id: Uuid,
    ) -> Result<Option<PerformanceMetric>, DatabaseError>;

    /// Store a metric; an existing metric for the same source is returned instead
    async fn save(&self, metric: &PerformanceMetric) -> Result<SaveOutcome, DatabaseError>;

    /// Whether the athlete is known
    async fn athlete_exists(&self, athlete_id: Uuid) -> Result<bool, DatabaseError>;

    /// Filtered history ordered by date
    async fn list(
        &self,
        filter: &MetricHistoryFilter,
    ) -> Result<Vec<PerformanceMetric>, DatabaseError>;
}
