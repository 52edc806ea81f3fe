// ABOUTME: Structured error types for database operations
// ABOUTME: Provides domain-specific storage errors with context for better error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

#[cfg(feature = "database-errors")]
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Errors raised by the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Entity lookup came back empty where a row was required
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity (athlete, metric, ...)
        entity_type: &'static str,
        /// Identifier that was looked up
        entity_id: String,
    },

    /// Could not connect to or open the database
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// A query failed to execute
    #[error("Query failed: {context}")]
    QueryError {
        /// What the query was doing
        context: String,
    },

    /// A unique or check constraint rejected the write
    #[error("Constraint violation: {context}")]
    ConstraintViolation {
        /// Which constraint and why
        context: String,
    },

    /// A stored value could not be decoded into the domain model
    #[error("Invalid stored data: {context}")]
    InvalidData {
        /// Which column and value
        context: String,
    },

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    MigrationError(String),
}

#[cfg(feature = "database-errors")]
impl From<SqlxError> for DatabaseError {
    fn from(error: SqlxError) -> Self {
        match &error {
            SqlxError::RowNotFound => Self::NotFound {
                entity_type: "row",
                entity_id: "unknown".to_owned(),
            },
            SqlxError::Database(db_error) if db_error.is_unique_violation() => {
                Self::ConstraintViolation {
                    context: db_error.message().to_owned(),
                }
            }
            SqlxError::Database(db_error) if db_error.is_check_violation() => {
                Self::ConstraintViolation {
                    context: db_error.message().to_owned(),
                }
            }
            SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
                Self::ConnectionError(error.to_string())
            }
            _ => Self::QueryError {
                context: error.to_string(),
            },
        }
    }
}
