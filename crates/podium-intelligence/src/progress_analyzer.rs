// ABOUTME: Time-series progress summaries for assessments and canonical metrics
// ABOUTME: Baseline, latest, best, total improvement, trend, and chart-ready points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Progress analysis
//!
//! All functions here are pure: callers hand over the observations they have
//! already loaded and receive summaries back. Input order does not matter;
//! entries are sorted stably by date first, so entries sharing a date keep
//! the caller's order.

use chrono::{DateTime, Utc};
use podium_core::constants::analysis::{PERCENT, TREND_WINDOW};
use podium_core::models::{AssessmentObservation, MetricType, PerformanceMetric, ScoringDirection};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::personal_records::PersonalRecordDetector;

/// One dated value in a progress series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// When the value was observed
    pub recorded_at: DateTime<Utc>,
    /// Observed value
    pub value: f64,
    /// Whether this entry is the athlete's declared baseline
    #[serde(default)]
    pub is_baseline: bool,
    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ProgressEntry {
    /// Create an unlabeled, non-baseline entry
    #[must_use]
    pub const fn new(recorded_at: DateTime<Utc>, value: f64) -> Self {
        Self {
            recorded_at,
            value,
            is_baseline: false,
            label: None,
        }
    }

    /// Mark as baseline
    #[must_use]
    pub const fn baseline(mut self) -> Self {
        self.is_baseline = true;
        self
    }

    /// Attach a display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<&AssessmentObservation> for ProgressEntry {
    fn from(observation: &AssessmentObservation) -> Self {
        Self {
            recorded_at: observation.test_date,
            value: observation.value,
            is_baseline: observation.is_baseline,
            label: observation.notes.clone(),
        }
    }
}

impl From<&PerformanceMetric> for ProgressEntry {
    fn from(metric: &PerformanceMetric) -> Self {
        Self {
            recorded_at: metric.recorded_at,
            value: metric.value,
            is_baseline: false,
            label: metric.notes.clone(),
        }
    }
}

/// Short-term trend over the most recent entries
///
/// Only two states exist: a series is either improving or it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrendClassification {
    /// Every consecutive pair in the trend window is equal-or-better
    Improving,
    /// Anything else, including series too short to judge
    #[default]
    Stable,
}

impl TrendClassification {
    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
        }
    }
}

/// Summary of one athlete's series for one metric or assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Number of entries analyzed
    pub entry_count: usize,
    /// Direction used to pick the best value and the trend
    pub scoring_direction: ScoringDirection,
    /// First entry flagged baseline, else the earliest entry
    pub baseline: Option<f64>,
    /// Most recent entry
    pub latest: Option<f64>,
    /// Best entry by direction
    pub best: Option<f64>,
    /// `latest - baseline`
    pub total_improvement: Option<f64>,
    /// `total_improvement / baseline * 100`; `None` for a zero baseline
    pub total_improvement_percentage: Option<f64>,
    /// Trend over the last entries
    pub trend: TrendClassification,
}

/// Chart-ready point for progress visualizations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Observation date
    pub date: DateTime<Utc>,
    /// Observed value
    pub value: f64,
    /// Display label (entry label, else the ISO date)
    pub label: String,
    /// Whether this point is the baseline
    pub is_baseline: bool,
}

/// Progress report for one athlete on one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentProgressReport {
    /// Athlete the report covers
    pub athlete_id: Uuid,
    /// Assessment name
    pub assessment_name: String,
    /// Baseline, latest, best, improvements, and trend
    #[serde(flatten)]
    pub summary: ProgressSummary,
    /// Points ordered by date
    pub chart_points: Vec<ChartPoint>,
}

/// Progress report for one athlete on one canonical metric type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricProgressReport {
    /// Athlete the report covers
    pub athlete_id: Uuid,
    /// Canonical metric type
    pub metric_type: MetricType,
    /// Most recent value
    pub current_value: Option<f64>,
    /// Value before the most recent one
    pub previous_value: Option<f64>,
    /// `current - previous`
    pub improvement: Option<f64>,
    /// `improvement / previous * 100`; `None` for a zero previous value
    pub improvement_percentage: Option<f64>,
    /// Whether current is strictly better than previous by direction
    pub improved: bool,
    /// Full history ordered by date
    pub history: Vec<PerformanceMetric>,
}

/// Pure progress summarizer
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressAnalyzer;

impl ProgressAnalyzer {
    /// Summarize one series
    #[must_use]
    pub fn analyze(entries: &[ProgressEntry], direction: ScoringDirection) -> ProgressSummary {
        let sorted = Self::sorted(entries);

        let baseline_index = sorted
            .iter()
            .position(|entry| entry.is_baseline)
            .or_else(|| (!sorted.is_empty()).then_some(0));
        let latest_index = sorted.len().checked_sub(1);
        let baseline = baseline_index.map(|index| sorted[index].value);
        let latest = latest_index.map(|index| sorted[index].value);
        let values: Vec<f64> = sorted.iter().map(|entry| entry.value).collect();
        let best = PersonalRecordDetector::best_in(direction, &values);

        // No improvement when baseline and latest are the same observation
        let total_improvement = match (baseline_index, latest_index) {
            (Some(from), Some(to)) if from != to => Some(sorted[to].value - sorted[from].value),
            _ => None,
        };
        let total_improvement_percentage = percentage_of(total_improvement, baseline);

        ProgressSummary {
            entry_count: sorted.len(),
            scoring_direction: direction,
            baseline,
            latest,
            best,
            total_improvement,
            total_improvement_percentage,
            trend: Self::classify_trend(&values, direction),
        }
    }

    /// Summarize many independent series in parallel, preserving input order
    #[must_use]
    pub fn analyze_many(series: &[(ScoringDirection, Vec<ProgressEntry>)]) -> Vec<ProgressSummary> {
        series
            .par_iter()
            .map(|(direction, entries)| Self::analyze(entries, *direction))
            .collect()
    }

    /// Trend over the last [`TREND_WINDOW`] values, already in date order
    #[must_use]
    pub fn classify_trend(values: &[f64], direction: ScoringDirection) -> TrendClassification {
        if values.len() < TREND_WINDOW {
            return TrendClassification::Stable;
        }
        let window = &values[values.len() - TREND_WINDOW..];
        let improving = window
            .windows(2)
            .all(|pair| direction.is_at_least_as_good(pair[1], pair[0]));
        if improving {
            TrendClassification::Improving
        } else {
            TrendClassification::Stable
        }
    }

    /// Build an assessment progress report from raw assessment results.
    ///
    /// The direction comes from the first result that declares one and
    /// defaults to higher-is-better.
    #[must_use]
    pub fn assessment_report(
        athlete_id: Uuid,
        assessment_name: impl Into<String>,
        results: &[AssessmentObservation],
    ) -> AssessmentProgressReport {
        let direction = results
            .iter()
            .find_map(|result| result.scoring_direction)
            .unwrap_or_default();
        let entries: Vec<ProgressEntry> = results.iter().map(ProgressEntry::from).collect();

        AssessmentProgressReport {
            athlete_id,
            assessment_name: assessment_name.into(),
            summary: Self::analyze(&entries, direction),
            chart_points: Self::chart_points(&entries),
        }
    }

    /// Date-ordered chart points
    #[must_use]
    pub fn chart_points(entries: &[ProgressEntry]) -> Vec<ChartPoint> {
        Self::sorted(entries)
            .into_iter()
            .map(|entry| ChartPoint {
                date: entry.recorded_at,
                value: entry.value,
                label: entry
                    .label
                    .clone()
                    .unwrap_or_else(|| entry.recorded_at.format("%Y-%m-%d").to_string()),
                is_baseline: entry.is_baseline,
            })
            .collect()
    }

    /// Build a metric progress report from stored canonical metrics
    #[must_use]
    pub fn metric_report(
        athlete_id: Uuid,
        metric_type: MetricType,
        mut history: Vec<PerformanceMetric>,
    ) -> MetricProgressReport {
        history.sort_by_key(|metric| metric.recorded_at);

        let current_value = history.last().map(|metric| metric.value);
        let previous_value = history
            .len()
            .checked_sub(2)
            .and_then(|index| history.get(index))
            .map(|metric| metric.value);

        let improvement = match (current_value, previous_value) {
            (Some(current), Some(previous)) => Some(current - previous),
            _ => None,
        };
        let improved = match (current_value, previous_value) {
            (Some(current), Some(previous)) => {
                metric_type.scoring_direction().is_better(current, previous)
            }
            _ => false,
        };

        MetricProgressReport {
            athlete_id,
            metric_type,
            current_value,
            previous_value,
            improvement,
            improvement_percentage: percentage_of(improvement, previous_value),
            improved,
            history,
        }
    }

    fn sorted(entries: &[ProgressEntry]) -> Vec<&ProgressEntry> {
        let mut sorted: Vec<&ProgressEntry> = entries.iter().collect();
        sorted.sort_by_key(|entry| entry.recorded_at);
        sorted
    }
}

fn percentage_of(change: Option<f64>, reference: Option<f64>) -> Option<f64> {
    match (change, reference) {
        (Some(change), Some(reference)) if reference.abs() > f64::EPSILON => {
            Some(change / reference * PERCENT)
        }
        _ => None,
    }
}
