// ABOUTME: Raw upstream observations consumed by the derivation engine
// ABOUTME: Assessment results and workout exercise completions as immutable snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use super::metric::ScoringDirection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an assessment measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Load lifted
    Weight,
    /// Elapsed time
    Time,
    /// Distance or height
    Distance,
    /// Repetition count
    Reps,
    /// Composite or judged score
    Score,
    /// Anything else
    #[default]
    Other,
}

impl MeasurementKind {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Time => "time",
            Self::Distance => "distance",
            Self::Reps => "reps",
            Self::Score => "score",
            Self::Other => "other",
        }
    }

    /// Parse from the assessment catalogue's measurement string
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "weight" | "load" | "mass" => Self::Weight,
            "time" | "duration" => Self::Time,
            "distance" | "height" | "length" => Self::Distance,
            "reps" | "repetitions" | "count" => Self::Reps,
            "score" | "points" => Self::Score,
            // Default to Other for unrecognized values
            _ => Self::Other,
        }
    }

    /// Whether the measurement is a load
    #[must_use]
    pub const fn is_weight_based(&self) -> bool {
        matches!(self, Self::Weight)
    }
}

/// Identity descriptor handed to the metric type mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricIdentity<'a> {
    /// Free-text exercise or assessment name
    pub name: &'a str,
    /// Stable identifier from the upstream catalogue, if it has one
    pub code: Option<&'a str>,
    /// What is measured, if known
    pub measurement_kind: Option<MeasurementKind>,
}

impl<'a> MetricIdentity<'a> {
    /// Identity from a name only
    #[must_use]
    pub const fn named(name: &'a str) -> Self {
        Self {
            name,
            code: None,
            measurement_kind: None,
        }
    }

    /// Attach a stable catalogue code
    #[must_use]
    pub const fn with_code(mut self, code: Option<&'a str>) -> Self {
        self.code = code;
        self
    }

    /// Attach the measurement kind
    #[must_use]
    pub const fn with_measurement_kind(mut self, kind: MeasurementKind) -> Self {
        self.measurement_kind = Some(kind);
        self
    }
}

/// A recorded result of a supervised fitness assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentObservation {
    /// Assessment result identifier (idempotency key for derivation)
    pub id: Uuid,
    /// Athlete who was assessed
    pub athlete_id: Uuid,
    /// Assessment name from the catalogue
    pub assessment_name: String,
    /// Stable assessment identifier, when the catalogue provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_code: Option<String>,
    /// Unit the value was recorded in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// What the assessment measures
    #[serde(default)]
    pub measurement_kind: MeasurementKind,
    /// Catalogue scoring direction, when specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_direction: Option<ScoringDirection>,
    /// Whether results of this assessment should produce canonical metrics
    #[serde(default)]
    pub auto_generate_metric: bool,
    /// Recorded value
    pub value: f64,
    /// When the test was taken
    pub test_date: DateTime<Utc>,
    /// Whether this result is the athlete's baseline for the assessment
    #[serde(default)]
    pub is_baseline: bool,
    /// Coach or staff member who recorded the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<Uuid>,
    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AssessmentObservation {
    /// Identity descriptor for metric type resolution
    #[must_use]
    pub fn identity(&self) -> MetricIdentity<'_> {
        MetricIdentity::named(&self.assessment_name)
            .with_code(self.assessment_code.as_deref())
            .with_measurement_kind(self.measurement_kind)
    }
}

/// A completed exercise from a logged training workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutObservation {
    /// Workout exercise identifier (idempotency key for derivation)
    pub id: Uuid,
    /// Athlete who performed the exercise
    pub athlete_id: Uuid,
    /// Exercise name from the workout template
    pub exercise_name: String,
    /// Stable exercise identifier, when the template provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_code: Option<String>,
    /// Load actually lifted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_weight: Option<f64>,
    /// Repetitions actually completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_reps: Option<u32>,
    /// When the workout was performed
    pub workout_date: DateTime<Utc>,
}

impl WorkoutObservation {
    /// Identity descriptor for metric type resolution.
    ///
    /// Logged lifts are always load-based.
    #[must_use]
    pub fn identity(&self) -> MetricIdentity<'_> {
        MetricIdentity::named(&self.exercise_name)
            .with_code(self.exercise_code.as_deref())
            .with_measurement_kind(MeasurementKind::Weight)
    }
}
