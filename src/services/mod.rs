// ABOUTME: Domain service layer for metric derivation and progress reporting
// ABOUTME: Orchestrates the pure intelligence components over the storage port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Domain service layer
//!
//! Services hold no SQL. They compose the mapper, estimator, detector and
//! analyzer from `podium-intelligence` with the repository traits in
//! [`crate::database::repositories`].

/// Derivation of canonical metrics from assessments and workouts
pub mod metric_derivation;

/// Metric and assessment progress reports
pub mod progress_reports;

pub use metric_derivation::{best_effort, DerivationOutcome, MetricDerivationService, SkipReason};
pub use progress_reports::ProgressReportService;
