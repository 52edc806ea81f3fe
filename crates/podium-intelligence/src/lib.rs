// ABOUTME: Performance intelligence engine for personal records and progress analytics
// ABOUTME: Pure functions with no storage or network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

#![deny(unsafe_code)]

//! # Podium Intelligence
//!
//! The algorithmic half of the performance engine:
//!
//! - [`metric_mapper`]: exercise/assessment identity to canonical [`MetricType`]
//! - [`algorithms::one_rep_max`]: lifted weight and reps to an estimated 1RM
//! - [`personal_records`]: direction-aware personal-record verdicts
//! - [`progress_analyzer`]: baseline/latest/best/improvement/trend summaries
//!
//! [`MetricType`]: podium_core::models::MetricType

/// Estimation formulas with selectable variants
pub mod algorithms;

/// Canonical metric type resolution
pub mod metric_mapper;

/// Personal-record detection
pub mod personal_records;

/// Time-series progress summaries and reports
pub mod progress_analyzer;

pub use algorithms::OneRepMaxAlgorithm;
pub use metric_mapper::{
    CatalogResolver, KeywordHeuristicResolver, MetricTypeMapper, MetricTypeResolver,
};
pub use personal_records::{PersonalRecordDetector, PrVerdict};
pub use progress_analyzer::{
    AssessmentProgressReport, ChartPoint, MetricProgressReport, ProgressAnalyzer, ProgressEntry,
    ProgressSummary, TrendClassification,
};
