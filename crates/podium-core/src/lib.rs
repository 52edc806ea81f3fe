// ABOUTME: Core types and constants for the Podium performance analytics engine
// ABOUTME: Foundation crate with error handling, metric models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

#![deny(unsafe_code)]

//! # Podium Core
//!
//! Foundation crate providing shared types and constants for the Podium
//! performance analytics engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Formula coefficients, limits, and units organized by domain
//! - **models**: Metric types, scoring directions, raw observations, and canonical metrics

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`MetricType`, `PerformanceMetric`, observations)
pub mod models;
