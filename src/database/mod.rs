// ABOUTME: SQLite persistence for athletes and canonical performance metrics
// ABOUTME: Connection management, idempotent schema migration, and manager accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! # Database Management
//!
//! [`Database`] owns the `SQLite` pool. Table-specific SQL lives in the
//! managers ([`AthleteManager`], [`PerformanceMetricManager`]); the derivation
//! service talks to storage only through the
//! [`repositories::PerformanceMetricRepository`] port.

mod athletes;
mod performance_metrics;

/// Storage ports consumed by the services layer
pub mod repositories;

pub use athletes::AthleteManager;
pub use performance_metrics::{MetricHistoryFilter, PerformanceMetricManager, SaveOutcome};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, AppResult, DatabaseError};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

/// Connections kept for file-backed databases
const FILE_POOL_CONNECTIONS: u32 = 5;

/// Database handle shared by managers and repositories
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to a `SQLite` database.
    ///
    /// `sqlite::memory:` gets a single long-lived connection so every query
    /// sees the same schema; file databases are created when missing.
    ///
    /// # Errors
    ///
    /// Returns a database error if the URL is malformed or the connection fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let is_memory = database_url.contains(":memory:");
        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(FILE_POOL_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        info!(database.url = %database_url, database.memory = is_memory, "Connected to database");
        Ok(Self { pool })
    }

    /// Connect using configuration, migrating when `auto_migrate` is set
    ///
    /// # Errors
    ///
    /// Returns a database error if connecting or migrating fails
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        let database = Self::new(&config.url.to_connection_string()).await?;
        if config.auto_migrate {
            database.migrate().await?;
        }
        Ok(database)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Athlete reference-data manager
    #[must_use]
    pub fn athletes(&self) -> AthleteManager {
        AthleteManager::new(self.pool.clone())
    }

    /// Canonical metric manager
    #[must_use]
    pub fn performance_metrics(&self) -> PerformanceMetricManager {
        PerformanceMetricManager::new(self.pool.clone())
    }

    /// Create tables and indexes; safe to run repeatedly
    ///
    /// # Errors
    ///
    /// Returns a database error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_athletes().await?;
        self.migrate_performance_metrics().await?;
        debug!("Database schema is up to date");
        Ok(())
    }

    async fn migrate_athletes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS athletes (
                id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("athletes table: {e}")))?;

        Ok(())
    }

    async fn migrate_performance_metrics(&self) -> AppResult<()> {
        // One metric per originating observation: the source columns are UNIQUE
        // and at most one of them may be set.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS performance_metrics (
                id TEXT PRIMARY KEY,
                athlete_id TEXT NOT NULL REFERENCES athletes(id) ON DELETE CASCADE,
                metric_type TEXT NOT NULL,
                value REAL NOT NULL,
                unit TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                notes TEXT,
                source_kind TEXT NOT NULL
                    CHECK (source_kind IN ('MANUAL', 'ASSESSMENT', 'WORKOUT_PR')),
                source_assessment_result_id TEXT UNIQUE,
                source_workout_exercise_id TEXT UNIQUE,
                is_personal_record INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                CHECK (source_assessment_result_id IS NULL OR source_workout_exercise_id IS NULL)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("performance_metrics table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_performance_metrics_athlete_type_date \
             ON performance_metrics(athlete_id, metric_type, recorded_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("performance_metrics index: {e}")))?;

        Ok(())
    }
}

/// Fixed-width UTC timestamp so text ordering matches time ordering
pub(crate) fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored RFC 3339 timestamp
pub(crate) fn decode_timestamp(column: &str, raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid {column} timestamp '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_timestamps_sort_as_text() {
        let whole = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let later = whole + Duration::milliseconds(250);
        assert!(encode_timestamp(whole) < encode_timestamp(later));
        assert_eq!(
            decode_timestamp("recorded_at", &encode_timestamp(later)).unwrap(),
            later
        );
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let database = Database::new("sqlite::memory:").await.unwrap();
        database.migrate().await.unwrap();
        database.migrate().await.unwrap();
    }
}
