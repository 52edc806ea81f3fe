// ABOUTME: Configuration management module for storage, derivation, and runtime settings
// ABOUTME: Environment-only configuration with typed, validated sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Configuration module
//!
//! - **environment**: `PodiumConfig` assembled from environment variables
//! - **database**: `DATABASE_URL` and migration settings
//! - **derivation**: 1RM formula, rep ceiling, and legacy name matching

/// Database location and migration settings
pub mod database;
/// Derivation engine settings
pub mod derivation;
/// Environment and top-level configuration
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use derivation::DerivationConfig;
pub use environment::{Environment, PodiumConfig};
