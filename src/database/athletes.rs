// ABOUTME: Database operations for athlete reference data
// ABOUTME: Minimal athlete registry backing existence checks and metric foreign keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use super::{decode_timestamp, encode_timestamp};
use crate::errors::{AppError, AppResult, ErrorCode};
use podium_core::models::Athlete;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Athlete registry
pub struct AthleteManager {
    pool: SqlitePool,
}

impl AthleteManager {
    /// Create a new athlete manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new athlete
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the id is taken, or a database
    /// error if the insert fails
    pub async fn create(&self, athlete: &Athlete) -> AppResult<()> {
        let display_name = athlete.display_name.trim();
        if display_name.is_empty() {
            return Err(AppError::invalid_input("Athlete display name must not be empty"));
        }

        let result = sqlx::query(
            r"
            INSERT INTO athletes (id, display_name, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(athlete.id.to_string())
        .bind(display_name)
        .bind(encode_timestamp(athlete.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create athlete: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::new(
                ErrorCode::ResourceAlreadyExists,
                format!("Athlete {} already exists", athlete.id),
            ));
        }
        Ok(())
    }

    /// Get an athlete by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, id: Uuid) -> AppResult<Option<Athlete>> {
        let row = sqlx::query(
            r"
            SELECT id, display_name, created_at
            FROM athletes
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get athlete: {e}")))?;

        row.map(|r| row_to_athlete(&r)).transpose()
    }

    /// Whether an athlete with this id exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM athletes WHERE id = $1")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check athlete: {e}")))?;

        Ok(count > 0)
    }

    /// List athletes ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self) -> AppResult<Vec<Athlete>> {
        let rows = sqlx::query(
            r"
            SELECT id, display_name, created_at
            FROM athletes
            ORDER BY display_name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list athletes: {e}")))?;

        rows.iter().map(row_to_athlete).collect()
    }
}

fn row_to_athlete(row: &SqliteRow) -> AppResult<Athlete> {
    let id_str: String = row.get("id");
    let created_at_str: String = row.get("created_at");

    Ok(Athlete {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::database(format!("Invalid athlete id '{id_str}': {e}")))?,
        display_name: row.get("display_name"),
        created_at: decode_timestamp("created_at", &created_at_str)?,
    })
}
