// ABOUTME: Direction-aware personal-record detection for canonical metric types
// ABOUTME: Pure decision function over a new value and the athlete's current best
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use podium_core::models::{MetricType, ScoringDirection};
use serde::{Deserialize, Serialize};

/// Outcome of comparing a new value against the current best
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrVerdict {
    /// Metric type the verdict was computed for
    pub metric_type: MetricType,
    /// Whether the new value is a personal record
    pub is_personal_record: bool,
    /// Candidate value
    pub value: f64,
    /// Best value before this observation, if any
    pub previous_best: Option<f64>,
    /// `value - previous_best`; negative for faster times
    pub delta: Option<f64>,
}

/// Personal-record detector
///
/// With no history every value is a record. Otherwise the new value must be
/// strictly better than the current best in the metric's scoring direction;
/// ties are not records. The caller reads the current best before writing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalRecordDetector;

impl PersonalRecordDetector {
    /// Whether `new_value` beats `current_best` for this metric type
    #[must_use]
    pub fn is_personal_record(
        metric_type: MetricType,
        new_value: f64,
        current_best: Option<f64>,
    ) -> bool {
        current_best.is_none_or(|best| metric_type.scoring_direction().is_better(new_value, best))
    }

    /// Full verdict including the previous best and the delta
    #[must_use]
    pub fn evaluate(
        metric_type: MetricType,
        new_value: f64,
        current_best: Option<f64>,
    ) -> PrVerdict {
        PrVerdict {
            metric_type,
            is_personal_record: Self::is_personal_record(metric_type, new_value, current_best),
            value: new_value,
            previous_best: current_best,
            delta: current_best.map(|best| new_value - best),
        }
    }

    /// Better of two values in the given direction
    #[must_use]
    pub fn best_of(direction: ScoringDirection, a: f64, b: f64) -> f64 {
        direction.better_of(a, b)
    }

    /// Best value of a series, or `None` for an empty series
    #[must_use]
    pub fn best_in(direction: ScoringDirection, values: &[f64]) -> Option<f64> {
        values
            .iter()
            .copied()
            .reduce(|best, value| Self::best_of(direction, best, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_history_is_always_a_record() {
        assert!(PersonalRecordDetector::is_personal_record(
            MetricType::BenchPressMax,
            1.0,
            None
        ));
        assert!(PersonalRecordDetector::is_personal_record(
            MetricType::FortyYardDash,
            9.9,
            None
        ));
    }

    #[test]
    fn test_ties_are_not_records() {
        assert!(!PersonalRecordDetector::is_personal_record(
            MetricType::SquatMax,
            300.0,
            Some(300.0)
        ));
        assert!(!PersonalRecordDetector::is_personal_record(
            MetricType::FortyYardDash,
            4.6,
            Some(4.6)
        ));
    }

    #[test]
    fn test_direction_matters() {
        assert!(PersonalRecordDetector::is_personal_record(
            MetricType::FortyYardDash,
            4.5,
            Some(4.6)
        ));
        assert!(!PersonalRecordDetector::is_personal_record(
            MetricType::FortyYardDash,
            4.7,
            Some(4.6)
        ));
        assert!(PersonalRecordDetector::is_personal_record(
            MetricType::VerticalJump,
            31.0,
            Some(30.0)
        ));
    }

    #[test]
    fn test_monotonically_favorable_sequence_is_all_records() {
        let times = [5.2, 5.0, 4.9, 4.75, 4.6];
        let mut best = None;
        for time in times {
            assert!(PersonalRecordDetector::is_personal_record(
                MetricType::FortyYardDash,
                time,
                best
            ));
            best = Some(best.map_or(time, |b| {
                PersonalRecordDetector::best_of(ScoringDirection::LowerIsBetter, b, time)
            }));
        }

        let lifts = [185.0, 195.0, 205.0, 225.0];
        let mut best = None;
        for lift in lifts {
            assert!(PersonalRecordDetector::is_personal_record(
                MetricType::BenchPressMax,
                lift,
                best
            ));
            best = Some(lift);
        }
    }

    #[test]
    fn test_value_between_recorded_values_is_not_a_record() {
        let recorded = [200.0, 240.0];
        let best = PersonalRecordDetector::best_in(ScoringDirection::HigherIsBetter, &recorded);
        assert!(!PersonalRecordDetector::is_personal_record(
            MetricType::DeadliftMax,
            220.0,
            best
        ));

        let recorded = [5.1, 4.7];
        let best = PersonalRecordDetector::best_in(ScoringDirection::LowerIsBetter, &recorded);
        assert!(!PersonalRecordDetector::is_personal_record(
            MetricType::ProAgilityShuttle,
            4.9,
            best
        ));
    }

    #[test]
    fn test_verdict_carries_delta() {
        let verdict =
            PersonalRecordDetector::evaluate(MetricType::BenchPressMax, 215.0, Some(208.0));
        assert!(verdict.is_personal_record);
        assert_eq!(verdict.previous_best, Some(208.0));
        assert!((verdict.delta.unwrap() - 7.0).abs() < f64::EPSILON);

        let first = PersonalRecordDetector::evaluate(MetricType::BenchPressMax, 215.0, None);
        assert!(first.is_personal_record);
        assert!(first.delta.is_none());
    }

    #[test]
    fn test_best_in_empty_series() {
        assert!(PersonalRecordDetector::best_in(ScoringDirection::HigherIsBetter, &[]).is_none());
    }
}
