// ABOUTME: Database operations for canonical performance metrics
// ABOUTME: Idempotent inserts keyed by source observation, best/latest lookups, filtered history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use super::{decode_timestamp, encode_timestamp};
use crate::errors::{AppError, AppResult, DatabaseError, ErrorCode};
use chrono::{DateTime, Utc};
use podium_core::constants::limits::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use podium_core::models::{
    MetricSource, MetricSourceKind, MetricType, PerformanceMetric, ScoringDirection,
};
use sqlx::{sqlite::SqliteRow, Error as SqlxError, Row, SqlitePool};
use uuid::Uuid;

const METRIC_COLUMNS: &str = "id, athlete_id, metric_type, value, unit, recorded_at, notes, \
     source_kind, source_assessment_result_id, source_workout_exercise_id, \
     is_personal_record, created_at";

/// Result of an idempotent insert
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The metric was written
    Inserted(PerformanceMetric),
    /// A metric for the same source observation already existed; it is returned unchanged
    AlreadyExists(PerformanceMetric),
}

impl SaveOutcome {
    /// The stored metric, whichever way it got there
    #[must_use]
    pub const fn metric(&self) -> &PerformanceMetric {
        match self {
            Self::Inserted(metric) | Self::AlreadyExists(metric) => metric,
        }
    }

    /// Take the stored metric
    #[must_use]
    pub fn into_metric(self) -> PerformanceMetric {
        match self {
            Self::Inserted(metric) | Self::AlreadyExists(metric) => metric,
        }
    }

    /// Whether this call wrote the row
    #[must_use]
    pub const fn was_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Filter options for metric history queries
#[derive(Debug, Clone, Default)]
pub struct MetricHistoryFilter {
    /// Restrict to one athlete
    pub athlete_id: Option<Uuid>,
    /// Restrict to one metric type
    pub metric_type: Option<MetricType>,
    /// Restrict to one source kind
    pub source_kind: Option<MetricSourceKind>,
    /// Inclusive lower bound on `recorded_at`
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `recorded_at`
    pub to: Option<DateTime<Utc>>,
    /// Only rows flagged as personal records
    pub personal_records_only: bool,
    /// Page size (default 100, capped at 1000)
    pub limit: Option<u32>,
    /// Rows to skip
    pub offset: Option<u32>,
}

impl MetricHistoryFilter {
    /// History of one athlete for one metric type
    #[must_use]
    pub fn for_metric(athlete_id: Uuid, metric_type: MetricType) -> Self {
        Self {
            athlete_id: Some(athlete_id),
            metric_type: Some(metric_type),
            ..Self::default()
        }
    }

    /// Restrict to a date range
    #[must_use]
    pub const fn between(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Set page size and offset
    #[must_use]
    pub const fn page(mut self, limit: Option<u32>, offset: Option<u32>) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// SQL access to `performance_metrics`
pub struct PerformanceMetricManager {
    pool: SqlitePool,
}

impl PerformanceMetricManager {
    /// Create a new metric manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a metric, or return the existing one for the same source observation
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown athlete,
    /// `RESOURCE_ALREADY_EXISTS` for a duplicate id, `INVALID_INPUT` for a
    /// non-finite value, or a database error
    pub async fn insert(&self, metric: &PerformanceMetric) -> AppResult<SaveOutcome> {
        if !metric.value.is_finite() {
            return Err(AppError::invalid_input(format!(
                "Metric value must be finite, got {}",
                metric.value
            )));
        }

        let result = sqlx::query(
            r"
            INSERT INTO performance_metrics (
                id, athlete_id, metric_type, value, unit, recorded_at, notes,
                source_kind, source_assessment_result_id, source_workout_exercise_id,
                is_personal_record, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(metric.id.to_string())
        .bind(metric.athlete_id.to_string())
        .bind(metric.metric_type.as_str())
        .bind(metric.value)
        .bind(&metric.unit)
        .bind(encode_timestamp(metric.recorded_at))
        .bind(metric.notes.as_deref())
        .bind(metric.source.kind().as_str())
        .bind(metric.source.assessment_result_id().map(|id| id.to_string()))
        .bind(metric.source.workout_exercise_id().map(|id| id.to_string()))
        .bind(metric.is_personal_record)
        .bind(encode_timestamp(metric.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, metric))?;

        if result.rows_affected() > 0 {
            return Ok(SaveOutcome::Inserted(metric.clone()));
        }

        // Conflict: another writer stored a metric for the same source first
        let existing = match metric.source {
            MetricSource::Assessment {
                assessment_result_id,
            } => self.find_by_source_assessment(assessment_result_id).await?,
            MetricSource::WorkoutPr {
                workout_exercise_id,
            } => self.find_by_source_workout_exercise(workout_exercise_id).await?,
            MetricSource::Manual => None,
        };

        existing.map(SaveOutcome::AlreadyExists).ok_or_else(|| {
            AppError::new(
                ErrorCode::ResourceAlreadyExists,
                format!("Performance metric {} already exists", metric.id),
            )
        })
    }

    /// Get a metric by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, id: Uuid) -> AppResult<Option<PerformanceMetric>> {
        self.fetch_one_where("id = $1", id.to_string(), "get performance metric")
            .await
    }

    /// Metric derived from an assessment result, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_by_source_assessment(
        &self,
        assessment_result_id: Uuid,
    ) -> AppResult<Option<PerformanceMetric>> {
        self.fetch_one_where(
            "source_assessment_result_id = $1",
            assessment_result_id.to_string(),
            "find metric by assessment",
        )
        .await
    }

    /// Metric derived from a workout exercise, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_by_source_workout_exercise(
        &self,
        workout_exercise_id: Uuid,
    ) -> AppResult<Option<PerformanceMetric>> {
        self.fetch_one_where(
            "source_workout_exercise_id = $1",
            workout_exercise_id.to_string(),
            "find metric by workout exercise",
        )
        .await
    }

    /// Best stored metric for the athlete and type, by the type's scoring direction.
    ///
    /// Ties go to the earliest record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_current_best(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
    ) -> AppResult<Option<PerformanceMetric>> {
        let order = match metric_type.scoring_direction() {
            ScoringDirection::LowerIsBetter => "ASC",
            ScoringDirection::HigherIsBetter => "DESC",
        };
        let query = format!(
            "SELECT {METRIC_COLUMNS} FROM performance_metrics \
             WHERE athlete_id = $1 AND metric_type = $2 \
             ORDER BY value {order}, recorded_at ASC LIMIT 1"
        );

        let row = sqlx::query(&query)
            .bind(athlete_id.to_string())
            .bind(metric_type.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find current best: {e}")))?;

        row.map(|r| row_to_metric(&r)).transpose()
    }

    /// Most recently recorded metric for the athlete and type
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_latest(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
    ) -> AppResult<Option<PerformanceMetric>> {
        let query = format!(
            "SELECT {METRIC_COLUMNS} FROM performance_metrics \
             WHERE athlete_id = $1 AND metric_type = $2 \
             ORDER BY recorded_at DESC, created_at DESC LIMIT 1"
        );

        let row = sqlx::query(&query)
            .bind(athlete_id.to_string())
            .bind(metric_type.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find latest metric: {e}")))?;

        row.map(|r| row_to_metric(&r)).transpose()
    }

    /// Metric history ordered by `recorded_at` ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self, filter: &MetricHistoryFilter) -> AppResult<Vec<PerformanceMetric>> {
        let limit_val = i64::from(
            filter
                .limit
                .unwrap_or(DEFAULT_HISTORY_LIMIT)
                .min(MAX_HISTORY_LIMIT),
        );
        let offset_val = i64::from(filter.offset.unwrap_or(0));

        // Build dynamic query with parameterized conditions
        let mut conditions = Vec::new();
        let mut bind_values: Vec<String> = Vec::new();

        if let Some(athlete_id) = filter.athlete_id {
            conditions.push("athlete_id = ?");
            bind_values.push(athlete_id.to_string());
        }
        if let Some(metric_type) = filter.metric_type {
            conditions.push("metric_type = ?");
            bind_values.push(metric_type.as_str().to_owned());
        }
        if let Some(kind) = filter.source_kind {
            conditions.push("source_kind = ?");
            bind_values.push(kind.as_str().to_owned());
        }
        if let Some(from) = filter.from {
            conditions.push("recorded_at >= ?");
            bind_values.push(encode_timestamp(from));
        }
        if let Some(to) = filter.to {
            conditions.push("recorded_at <= ?");
            bind_values.push(encode_timestamp(to));
        }
        if filter.personal_records_only {
            conditions.push("is_personal_record = 1");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {METRIC_COLUMNS} FROM performance_metrics {where_clause} \
             ORDER BY recorded_at ASC, created_at ASC LIMIT ? OFFSET ?"
        );

        let mut sql_query = sqlx::query(&query);
        for value in &bind_values {
            sql_query = sql_query.bind(value);
        }
        sql_query = sql_query.bind(limit_val).bind(offset_val);

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list performance metrics: {e}")))?;

        rows.iter().map(row_to_metric).collect()
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: String,
        action: &str,
    ) -> AppResult<Option<PerformanceMetric>> {
        let query = format!("SELECT {METRIC_COLUMNS} FROM performance_metrics WHERE {condition}");
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to {action}: {e}")))?;

        row.map(|r| row_to_metric(&r)).transpose()
    }
}

fn map_insert_error(error: SqlxError, metric: &PerformanceMetric) -> AppError {
    if let SqlxError::Database(db_error) = &error {
        if db_error.is_foreign_key_violation() {
            return AppError::not_found(format!("Athlete {}", metric.athlete_id));
        }
        if db_error.is_check_violation() {
            return AppError::invalid_input(format!(
                "Performance metric violates a storage constraint: {}",
                db_error.message()
            ));
        }
    }
    DatabaseError::from(error).into()
}

fn parse_uuid(column: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid {column} '{raw}': {e}")))
}

fn row_to_metric(row: &SqliteRow) -> AppResult<PerformanceMetric> {
    let id_str: String = row.get("id");
    let athlete_id_str: String = row.get("athlete_id");
    let metric_type_str: String = row.get("metric_type");
    let recorded_at_str: String = row.get("recorded_at");
    let created_at_str: String = row.get("created_at");
    let source_kind: String = row.get("source_kind");
    let assessment_id_str: Option<String> = row.get("source_assessment_result_id");
    let workout_id_str: Option<String> = row.get("source_workout_exercise_id");

    let assessment_result_id = assessment_id_str
        .as_deref()
        .map(|raw| parse_uuid("source_assessment_result_id", raw))
        .transpose()?;
    let workout_exercise_id = workout_id_str
        .as_deref()
        .map(|raw| parse_uuid("source_workout_exercise_id", raw))
        .transpose()?;

    Ok(PerformanceMetric {
        id: parse_uuid("id", &id_str)?,
        athlete_id: parse_uuid("athlete_id", &athlete_id_str)?,
        metric_type: metric_type_str.parse().map_err(|_| {
            AppError::database(format!("Unknown stored metric type '{metric_type_str}'"))
        })?,
        value: row.get("value"),
        unit: row.get("unit"),
        recorded_at: decode_timestamp("recorded_at", &recorded_at_str)?,
        notes: row.get("notes"),
        source: MetricSource::from_parts(&source_kind, assessment_result_id, workout_exercise_id)
            .map_err(|e| AppError::database(e.message))?,
        is_personal_record: row.get("is_personal_record"),
        created_at: decode_timestamp("created_at", &created_at_str)?,
    })
}
