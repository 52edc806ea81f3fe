// ABOUTME: Main library entry point for the Podium performance analytics engine
// ABOUTME: Wires canonical metric derivation, storage, configuration, and logging together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

#![deny(unsafe_code)]

//! # Podium Performance
//!
//! Derives canonical performance metrics from supervised fitness assessments
//! and logged training workouts, detects personal records, and summarizes
//! progress over time.
//!
//! ## Architecture
//!
//! - **`podium-core`**: error types, metric models, constants
//! - **`podium-intelligence`**: metric mapping, 1RM estimation, PR detection,
//!   progress analysis (pure, no I/O)
//! - **database**: `SQLite` persistence for athletes and canonical metrics
//! - **services**: the derivation orchestrator and report builders
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use podium_performance::config::PodiumConfig;
//! use podium_performance::database::Database;
//! use podium_performance::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = PodiumConfig::from_env()?;
//!     let database = Database::new(&config.database.url.to_connection_string()).await?;
//!     database.migrate().await?;
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// `SQLite` persistence for athletes and canonical metrics
pub mod database;

/// Unified error handling (re-exported from `podium-core`)
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Derivation and reporting services
pub mod services;

/// Core models re-exported for binary crates and integration tests
pub use podium_core::models;

/// Constants re-exported for binary crates and integration tests
pub use podium_core::constants;

/// Pure analytics re-exported for binary crates and integration tests
pub use podium_intelligence as intelligence;
