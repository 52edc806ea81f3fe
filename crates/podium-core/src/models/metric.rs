// ABOUTME: Metric catalogue with fixed scoring directions and the canonical metric record
// ABOUTME: MetricType, ScoringDirection, MetricSource, and PerformanceMetric definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use crate::constants::units;
use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Whether lower or higher values are better for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScoringDirection {
    /// Smaller is better (sprint and drill times)
    #[serde(rename = "lower_better", alias = "lower_is_better")]
    LowerIsBetter,
    /// Larger is better (strength, power, distance)
    #[default]
    #[serde(rename = "higher_better", alias = "higher_is_better")]
    HigherIsBetter,
}

impl ScoringDirection {
    /// Keyword used by the assessment catalogue
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LowerIsBetter => "lower_better",
            Self::HigherIsBetter => "higher_better",
        }
    }

    /// Parse a scoring-direction keyword.
    ///
    /// Unknown keywords yield `None`; callers decide on the default.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "lower_better" | "lower_is_better" => Some(Self::LowerIsBetter),
            "higher_better" | "higher_is_better" => Some(Self::HigherIsBetter),
            _ => None,
        }
    }

    /// Strictly better: ties are not improvements
    #[must_use]
    pub fn is_better(&self, candidate: f64, reference: f64) -> bool {
        match self {
            Self::LowerIsBetter => candidate < reference,
            Self::HigherIsBetter => candidate > reference,
        }
    }

    /// Equal-or-better
    #[must_use]
    pub fn is_at_least_as_good(&self, candidate: f64, reference: f64) -> bool {
        match self {
            Self::LowerIsBetter => candidate <= reference,
            Self::HigherIsBetter => candidate >= reference,
        }
    }

    /// Pick the better of two values
    #[must_use]
    pub fn better_of(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::LowerIsBetter => a.min(b),
            Self::HigherIsBetter => a.max(b),
        }
    }
}

/// Canonical performance metric types
///
/// Every variant carries exactly one fixed [`ScoringDirection`] and a default
/// unit. The table lives in code; nothing is derived at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    /// Bench press one-rep max
    BenchPressMax,
    /// Back squat one-rep max
    SquatMax,
    /// Deadlift one-rep max
    DeadliftMax,
    /// Power clean one-rep max
    PowerCleanMax,
    /// Overhead press one-rep max
    OverheadPressMax,
    /// 40-yard dash time
    FortyYardDash,
    /// 10-yard split time
    TenYardSplit,
    /// Mile run time
    MileTime,
    /// 5-10-5 pro agility shuttle time
    ProAgilityShuttle,
    /// Three-cone drill time
    ThreeConeDrill,
    /// Vertical jump height
    VerticalJump,
    /// Standing broad jump distance
    BroadJump,
    /// Maximum strict pull-ups
    PullUpsMax,
    /// Body weight
    BodyWeight,
}

impl MetricType {
    /// Every metric type, in catalogue order
    pub const ALL: [Self; 14] = [
        Self::BenchPressMax,
        Self::SquatMax,
        Self::DeadliftMax,
        Self::PowerCleanMax,
        Self::OverheadPressMax,
        Self::FortyYardDash,
        Self::TenYardSplit,
        Self::MileTime,
        Self::ProAgilityShuttle,
        Self::ThreeConeDrill,
        Self::VerticalJump,
        Self::BroadJump,
        Self::PullUpsMax,
        Self::BodyWeight,
    ];

    /// Fixed scoring direction for this metric
    #[must_use]
    pub const fn scoring_direction(&self) -> ScoringDirection {
        match self {
            Self::FortyYardDash
            | Self::TenYardSplit
            | Self::MileTime
            | Self::ProAgilityShuttle
            | Self::ThreeConeDrill => ScoringDirection::LowerIsBetter,
            Self::BenchPressMax
            | Self::SquatMax
            | Self::DeadliftMax
            | Self::PowerCleanMax
            | Self::OverheadPressMax
            | Self::VerticalJump
            | Self::BroadJump
            | Self::PullUpsMax
            | Self::BodyWeight => ScoringDirection::HigherIsBetter,
        }
    }

    /// Unit used when an observation does not specify one
    #[must_use]
    pub const fn default_unit(&self) -> &'static str {
        match self {
            Self::BenchPressMax
            | Self::SquatMax
            | Self::DeadliftMax
            | Self::PowerCleanMax
            | Self::OverheadPressMax
            | Self::BodyWeight => units::POUNDS,
            Self::FortyYardDash
            | Self::TenYardSplit
            | Self::MileTime
            | Self::ProAgilityShuttle
            | Self::ThreeConeDrill => units::SECONDS,
            Self::VerticalJump | Self::BroadJump => units::INCHES,
            Self::PullUpsMax => units::REPS,
        }
    }

    /// Whether this metric is a barbell strength max (eligible for 1RM estimation)
    #[must_use]
    pub const fn is_strength_max(&self) -> bool {
        matches!(
            self,
            Self::BenchPressMax
                | Self::SquatMax
                | Self::DeadliftMax
                | Self::PowerCleanMax
                | Self::OverheadPressMax
        )
    }

    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BenchPressMax => "BENCH_PRESS_MAX",
            Self::SquatMax => "SQUAT_MAX",
            Self::DeadliftMax => "DEADLIFT_MAX",
            Self::PowerCleanMax => "POWER_CLEAN_MAX",
            Self::OverheadPressMax => "OVERHEAD_PRESS_MAX",
            Self::FortyYardDash => "FORTY_YARD_DASH",
            Self::TenYardSplit => "TEN_YARD_SPLIT",
            Self::MileTime => "MILE_TIME",
            Self::ProAgilityShuttle => "PRO_AGILITY_SHUTTLE",
            Self::ThreeConeDrill => "THREE_CONE_DRILL",
            Self::VerticalJump => "VERTICAL_JUMP",
            Self::BroadJump => "BROAD_JUMP",
            Self::PullUpsMax => "PULL_UPS_MAX",
            Self::BodyWeight => "BODY_WEIGHT",
        }
    }

    /// Human-readable label for reports
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::BenchPressMax => "Bench Press Max",
            Self::SquatMax => "Squat Max",
            Self::DeadliftMax => "Deadlift Max",
            Self::PowerCleanMax => "Power Clean Max",
            Self::OverheadPressMax => "Overhead Press Max",
            Self::FortyYardDash => "40-Yard Dash",
            Self::TenYardSplit => "10-Yard Split",
            Self::MileTime => "Mile Time",
            Self::ProAgilityShuttle => "Pro Agility Shuttle",
            Self::ThreeConeDrill => "Three-Cone Drill",
            Self::VerticalJump => "Vertical Jump",
            Self::BroadJump => "Broad Jump",
            Self::PullUpsMax => "Pull-Ups Max",
            Self::BodyWeight => "Body Weight",
        }
    }
}

impl Display for MetricType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|metric_type| metric_type.as_str() == normalized)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown metric type: '{s}'")))
    }
}

/// Where a canonical metric came from, without its back-reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricSourceKind {
    /// Entered by hand
    Manual,
    /// Derived from an assessment result
    Assessment,
    /// Derived from a workout set that set a personal record
    WorkoutPr,
}

impl MetricSourceKind {
    /// Storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Assessment => "ASSESSMENT",
            Self::WorkoutPr => "WORKOUT_PR",
        }
    }
}

impl Display for MetricSourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Origin of a canonical metric, including the originating observation.
///
/// The back-references are mutually exclusive by construction, and the source
/// kind always agrees with the reference it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricSource {
    /// Entered by hand; no originating observation
    Manual,
    /// Derived from exactly one assessment result
    Assessment {
        /// Originating assessment result
        assessment_result_id: Uuid,
    },
    /// Derived from exactly one workout exercise completion
    WorkoutPr {
        /// Originating workout exercise
        workout_exercise_id: Uuid,
    },
}

impl MetricSource {
    /// Source kind without the reference
    #[must_use]
    pub const fn kind(&self) -> MetricSourceKind {
        match self {
            Self::Manual => MetricSourceKind::Manual,
            Self::Assessment { .. } => MetricSourceKind::Assessment,
            Self::WorkoutPr { .. } => MetricSourceKind::WorkoutPr,
        }
    }

    /// Originating assessment result, if any
    #[must_use]
    pub const fn assessment_result_id(&self) -> Option<Uuid> {
        match self {
            Self::Assessment {
                assessment_result_id,
            } => Some(*assessment_result_id),
            _ => None,
        }
    }

    /// Originating workout exercise, if any
    #[must_use]
    pub const fn workout_exercise_id(&self) -> Option<Uuid> {
        match self {
            Self::WorkoutPr {
                workout_exercise_id,
            } => Some(*workout_exercise_id),
            _ => None,
        }
    }

    /// Rebuild a source from its stored columns
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` when the kind string is unknown or the
    /// reference columns disagree with the kind.
    pub fn from_parts(
        kind: &str,
        assessment_result_id: Option<Uuid>,
        workout_exercise_id: Option<Uuid>,
    ) -> Result<Self, AppError> {
        match (kind, assessment_result_id, workout_exercise_id) {
            ("MANUAL", None, None) => Ok(Self::Manual),
            ("ASSESSMENT", Some(assessment_result_id), None) => Ok(Self::Assessment {
                assessment_result_id,
            }),
            ("WORKOUT_PR", None, Some(workout_exercise_id)) => Ok(Self::WorkoutPr {
                workout_exercise_id,
            }),
            _ => Err(AppError::invalid_input(format!(
                "Inconsistent metric source: kind={kind}, \
                 assessment={assessment_result_id:?}, workout={workout_exercise_id:?}"
            ))),
        }
    }
}

/// Canonical performance measurement for one athlete
///
/// Created once by the derivation service (or a manual entry) and never
/// mutated afterwards by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    /// Unique identifier
    pub id: Uuid,
    /// Athlete the measurement belongs to
    pub athlete_id: Uuid,
    /// Canonical metric type
    pub metric_type: MetricType,
    /// Measured or estimated value
    pub value: f64,
    /// Unit of `value`
    pub unit: String,
    /// When the observation happened
    pub recorded_at: DateTime<Utc>,
    /// Free-text note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Origin, with back-reference to the raw observation
    pub source: MetricSource,
    /// Whether this was a personal record when recorded
    pub is_personal_record: bool,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl PerformanceMetric {
    /// Create a new record with a fresh identifier
    #[must_use]
    pub fn new(
        athlete_id: Uuid,
        metric_type: MetricType,
        value: f64,
        recorded_at: DateTime<Utc>,
        source: MetricSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            athlete_id,
            metric_type,
            value,
            unit: metric_type.default_unit().to_owned(),
            recorded_at,
            notes: None,
            source,
            is_personal_record: false,
            created_at: Utc::now(),
        }
    }

    /// Override the unit
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Attach a note
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Set the personal-record flag
    #[must_use]
    pub const fn with_personal_record(mut self, is_personal_record: bool) -> Self {
        self.is_personal_record = is_personal_record;
        self
    }

    /// Scoring direction of this record's metric type
    #[must_use]
    pub const fn scoring_direction(&self) -> ScoringDirection {
        self.metric_type.scoring_direction()
    }
}
