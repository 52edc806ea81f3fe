// ABOUTME: SQLite implementation of the performance metric repository
// ABOUTME: Delegates to the SQL managers and maps failures into DatabaseError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use super::PerformanceMetricRepository;
use crate::database::{
    AthleteManager, Database, MetricHistoryFilter, PerformanceMetricManager, SaveOutcome,
};
use crate::errors::{AppError, DatabaseError, ErrorCode};
use async_trait::async_trait;
use podium_core::models::{MetricType, PerformanceMetric};
use uuid::Uuid;

/// `SQLite` implementation of `PerformanceMetricRepository`
#[derive(Clone)]
pub struct PerformanceMetricRepositoryImpl {
    db: Database,
}

impl PerformanceMetricRepositoryImpl {
    /// Create a new repository over the given database
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    fn metrics(&self) -> PerformanceMetricManager {
        self.db.performance_metrics()
    }

    fn athletes(&self) -> AthleteManager {
        self.db.athletes()
    }
}

/// Fold a manager error into the storage error vocabulary
fn to_database_error(error: AppError) -> DatabaseError {
    match error.code {
        ErrorCode::ResourceNotFound => DatabaseError::NotFound {
            entity_type: "athlete",
            entity_id: error.message,
        },
        ErrorCode::ResourceAlreadyExists => DatabaseError::ConstraintViolation {
            context: error.message,
        },
        ErrorCode::InvalidInput | ErrorCode::InvalidFormat => DatabaseError::InvalidData {
            context: error.message,
        },
        _ => DatabaseError::QueryError {
            context: error.message,
        },
    }
}

#[async_trait]
impl PerformanceMetricRepository for PerformanceMetricRepositoryImpl {
    async fn find_current_best(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
    ) -> Result<Option<PerformanceMetric>, DatabaseError> {
        self.metrics()
            .find_current_best(athlete_id, metric_type)
            .await
            .map_err(to_database_error)
    }

    async fn find_latest_by_athlete_and_metric_type(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
    ) -> Result<Option<PerformanceMetric>, DatabaseError> {
        self.metrics()
            .find_latest(athlete_id, metric_type)
            .await
            .map_err(to_database_error)
    }

    async fn find_by_source_assessment(
        &self,
        assessment_result_id: Uuid,
    ) -> Result<Option<PerformanceMetric>, DatabaseError> {
        self.metrics()
            .find_by_source_assessment(assessment_result_id)
            .await
            .map_err(to_database_error)
    }

    async fn find_by_source_workout_exercise(
        &self,
        workout_exercise_id: Uuid,
    ) -> Result<Option<PerformanceMetric>, DatabaseError> {
        self.metrics()
            .find_by_source_workout_exercise(workout_exercise_id)
            .await
            .map_err(to_database_error)
    }

    async fn save(&self, metric: &PerformanceMetric) -> Result<SaveOutcome, DatabaseError> {
        self.metrics()
            .insert(metric)
            .await
            .map_err(to_database_error)
    }

    async fn athlete_exists(&self, athlete_id: Uuid) -> Result<bool, DatabaseError> {
        self.athletes()
            .exists(athlete_id)
            .await
            .map_err(to_database_error)
    }

    async fn list(
        &self,
        filter: &MetricHistoryFilter,
    ) -> Result<Vec<PerformanceMetric>, DatabaseError> {
        self.metrics().list(filter).await.map_err(to_database_error)
    }
}
