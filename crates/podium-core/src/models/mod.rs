// ABOUTME: Core data models for athlete performance tracking
// ABOUTME: Re-exports metric, observation, and athlete types used across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Core data models
//!
//! - [`MetricType`] and [`ScoringDirection`]: the closed metric catalogue with
//!   its fixed direction table
//! - [`PerformanceMetric`]: the canonical, derived-or-manual record
//! - [`AssessmentObservation`] / [`WorkoutObservation`]: upstream snapshots
//!   consumed read-only by the derivation engine

/// Athlete reference data
pub mod athlete;
/// Metric catalogue and canonical metric records
pub mod metric;
/// Raw upstream observations
pub mod observation;

pub use athlete::Athlete;
pub use metric::{MetricSource, MetricSourceKind, MetricType, PerformanceMetric, ScoringDirection};
pub use observation::{AssessmentObservation, MeasurementKind, MetricIdentity, WorkoutObservation};
