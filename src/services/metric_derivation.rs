// ABOUTME: Turns assessment results and workout lifts into canonical performance metrics
// ABOUTME: Idempotent per source observation, serialized per athlete and metric type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Metric derivation service
//!
//! Every entry point follows the same discipline:
//!
//! 1. resolve the canonical [`MetricType`] (unmapped identities are skipped),
//! 2. take the per-(athlete, metric type) lock,
//! 3. return the existing metric if this source observation was already derived,
//! 4. read the current best fresh from storage and run the detector,
//! 5. persist, relying on the storage unique constraint for cross-process races.
//!
//! Errors are returned to the caller. Workflows that must not fail because of
//! derivation wrap the call in [`best_effort`].

use crate::config::DerivationConfig;
use crate::database::repositories::PerformanceMetricRepository;
use crate::database::SaveOutcome;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use podium_core::models::{
    AssessmentObservation, MetricSource, MetricSourceKind, MetricType, PerformanceMetric,
    WorkoutObservation,
};
use podium_intelligence::{MetricTypeMapper, PersonalRecordDetector, PrVerdict};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Why a derivation produced no metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The assessment is not configured to generate metrics
    AutoGenerateDisabled,
    /// No canonical metric type matches the observation
    UnmappedIdentity,
    /// The workout exercise has no recorded weight or reps
    MissingLoadData,
    /// The exercise maps to a metric that is not a one-rep max
    NotStrengthMetric,
}

impl SkipReason {
    /// Stable string form for logs and CLI output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AutoGenerateDisabled => "auto_generate_disabled",
            Self::UnmappedIdentity => "unmapped_identity",
            Self::MissingLoadData => "missing_load_data",
            Self::NotStrengthMetric => "not_strength_metric",
        }
    }
}

/// Result of one derivation attempt
#[derive(Debug, Clone, PartialEq)]
pub enum DerivationOutcome {
    /// A new metric was stored
    Created(PerformanceMetric),
    /// The source observation had already been derived; the stored metric is unchanged
    AlreadyDerived(PerformanceMetric),
    /// Nothing to derive
    Skipped(SkipReason),
    /// The workout estimate did not beat the current best
    NotPersonalRecord(PrVerdict),
    /// The derivation failed and was absorbed by [`best_effort`]
    Failed {
        /// Error code of the underlying failure
        code: ErrorCode,
        /// Error message of the underlying failure
        message: String,
    },
}

impl DerivationOutcome {
    /// Stable string form for logs and CLI output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::AlreadyDerived(_) => "already_derived",
            Self::Skipped(_) => "skipped",
            Self::NotPersonalRecord(_) => "not_personal_record",
            Self::Failed { .. } => "failed",
        }
    }

    /// The stored metric, when there is one
    #[must_use]
    pub const fn metric(&self) -> Option<&PerformanceMetric> {
        match self {
            Self::Created(metric) | Self::AlreadyDerived(metric) => Some(metric),
            Self::Skipped(_) | Self::NotPersonalRecord(_) | Self::Failed { .. } => None,
        }
    }

    /// Whether this attempt wrote a new metric
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    fn from_save(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Inserted(metric) => Self::Created(metric),
            SaveOutcome::AlreadyExists(metric) => Self::AlreadyDerived(metric),
        }
    }
}

/// Run a derivation without letting its failure escape
///
/// The error is logged at warn level with the athlete and source, and turned
/// into [`DerivationOutcome::Failed`].
pub async fn best_effort<F>(
    athlete_id: Uuid,
    source: MetricSourceKind,
    derivation: F,
) -> DerivationOutcome
where
    F: Future<Output = AppResult<DerivationOutcome>> + Send,
{
    match derivation.await {
        Ok(outcome) => outcome,
        Err(error) => {
            AppLogger::log_derivation_failure(athlete_id, source.as_str(), &error);
            DerivationOutcome::Failed {
                code: error.code,
                message: error.message,
            }
        }
    }
}

type DerivationKey = (Uuid, MetricType);

/// Held for the read-decide-write of one (athlete, metric type).
///
/// On drop the map entry is removed once no other task holds or awaits it.
struct KeyGuard<'a> {
    locks: &'a DashMap<DerivationKey, Arc<Mutex<()>>>,
    key: DerivationKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Clones are taken under the shard lock, so a count of one means idle
        self.locks.remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Derives canonical metrics from raw observations
pub struct MetricDerivationService {
    repository: Arc<dyn PerformanceMetricRepository>,
    mapper: MetricTypeMapper,
    config: DerivationConfig,
    locks: DashMap<DerivationKey, Arc<Mutex<()>>>,
}

impl MetricDerivationService {
    /// Create a service over the given repository
    #[must_use]
    pub fn new(repository: Arc<dyn PerformanceMetricRepository>, config: DerivationConfig) -> Self {
        Self {
            repository,
            mapper: config.mapper(),
            config,
            locks: DashMap::new(),
        }
    }

    /// Active derivation settings
    #[must_use]
    pub const fn config(&self) -> &DerivationConfig {
        &self.config
    }

    /// Derive a metric from a recorded assessment result
    ///
    /// The stored metric carries the assessment value and unit. It is flagged
    /// as a personal record when it beats the current best or when the result
    /// is the athlete's baseline.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown athlete, `INVALID_INPUT`
    /// for a non-finite value, or a storage error
    pub async fn derive_from_assessment(
        &self,
        assessment: &AssessmentObservation,
    ) -> AppResult<DerivationOutcome> {
        let source = MetricSourceKind::Assessment;
        let athlete_id = assessment.athlete_id;

        if !assessment.auto_generate_metric {
            return Ok(Self::skip(athlete_id, None, source, SkipReason::AutoGenerateDisabled));
        }
        let Some(metric_type) = self.mapper.map(&assessment.identity()) else {
            return Ok(Self::skip(athlete_id, None, source, SkipReason::UnmappedIdentity));
        };
        ensure_finite(assessment.value)?;

        let _guard = self.lock_for(athlete_id, metric_type).await;

        if let Some(existing) = self
            .repository
            .find_by_source_assessment(assessment.id)
            .await?
        {
            return Ok(Self::already_derived(existing, source));
        }
        self.ensure_athlete(athlete_id).await?;

        let verdict = self.verdict(athlete_id, metric_type, assessment.value).await?;
        let unit = assessment
            .unit
            .clone()
            .filter(|unit| !unit.trim().is_empty())
            .unwrap_or_else(|| metric_type.default_unit().to_owned());

        let metric = PerformanceMetric::new(
            athlete_id,
            metric_type,
            assessment.value,
            assessment.test_date,
            MetricSource::Assessment {
                assessment_result_id: assessment.id,
            },
        )
        .with_unit(unit)
        .with_notes(assessment.notes.clone())
        .with_personal_record(verdict.is_personal_record || assessment.is_baseline);

        self.persist(&metric, source).await
    }

    /// Store a workout personal record that the workout-completion workflow
    /// has already estimated and confirmed
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown athlete, `INVALID_INPUT`
    /// for a non-finite estimate, or a storage error
    pub async fn derive_from_workout_pr(
        &self,
        exercise: &WorkoutObservation,
        metric_type: MetricType,
        estimated_one_rep_max: f64,
    ) -> AppResult<DerivationOutcome> {
        ensure_finite(estimated_one_rep_max)?;
        let _guard = self.lock_for(exercise.athlete_id, metric_type).await;
        self.store_workout_pr(exercise, metric_type, estimated_one_rep_max)
            .await
    }

    /// Full workout-completion boundary for one logged exercise
    ///
    /// Maps the exercise, estimates the one-rep max with the configured
    /// formula, runs the detector against the stored best, and stores a
    /// `WORKOUT_PR` metric when the estimate is a record.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` or `VALUE_OUT_OF_RANGE` when the set cannot be
    /// estimated, `RESOURCE_NOT_FOUND` for an unknown athlete, or a storage
    /// error
    pub async fn process_workout_exercise(
        &self,
        exercise: &WorkoutObservation,
    ) -> AppResult<DerivationOutcome> {
        let source = MetricSourceKind::WorkoutPr;
        let athlete_id = exercise.athlete_id;

        let Some(metric_type) = self.mapper.map(&exercise.identity()) else {
            return Ok(Self::skip(athlete_id, None, source, SkipReason::UnmappedIdentity));
        };
        if !metric_type.is_strength_max() {
            return Ok(Self::skip(
                athlete_id,
                Some(metric_type),
                source,
                SkipReason::NotStrengthMetric,
            ));
        }
        let (Some(weight), Some(reps)) = (exercise.actual_weight, exercise.actual_reps) else {
            return Ok(Self::skip(
                athlete_id,
                Some(metric_type),
                source,
                SkipReason::MissingLoadData,
            ));
        };

        let estimate = self.config.one_rep_max_algorithm.estimate_with_limit(
            weight,
            reps,
            self.config.max_estimation_reps,
        )?;

        let _guard = self.lock_for(athlete_id, metric_type).await;

        if let Some(existing) = self
            .repository
            .find_by_source_workout_exercise(exercise.id)
            .await?
        {
            return Ok(Self::already_derived(existing, source));
        }
        self.ensure_athlete(athlete_id).await?;

        let verdict = self.verdict(athlete_id, metric_type, estimate).await?;
        if !verdict.is_personal_record {
            AppLogger::log_derivation_outcome(
                athlete_id,
                Some(metric_type),
                source.as_str(),
                "not_personal_record",
                &format!("estimate {estimate:.1} vs best {:?}", verdict.previous_best),
            );
            return Ok(DerivationOutcome::NotPersonalRecord(verdict));
        }

        self.store_workout_pr(exercise, metric_type, estimate).await
    }

    /// Record a hand-entered metric
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a non-finite value, `RESOURCE_NOT_FOUND`
    /// for an unknown athlete, or a storage error
    pub async fn record_manual(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
        value: f64,
        recorded_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> AppResult<PerformanceMetric> {
        ensure_finite(value)?;
        let _guard = self.lock_for(athlete_id, metric_type).await;

        self.ensure_athlete(athlete_id).await?;
        let verdict = self.verdict(athlete_id, metric_type, value).await?;

        let metric = PerformanceMetric::new(
            athlete_id,
            metric_type,
            value,
            recorded_at,
            MetricSource::Manual,
        )
        .with_notes(notes)
        .with_personal_record(verdict.is_personal_record);
        let stored = self.repository.save(&metric).await?.into_metric();

        AppLogger::log_manual_entry(athlete_id, metric_type, stored.is_personal_record);
        Ok(stored)
    }

    async fn store_workout_pr(
        &self,
        exercise: &WorkoutObservation,
        metric_type: MetricType,
        estimate: f64,
    ) -> AppResult<DerivationOutcome> {
        let source = MetricSourceKind::WorkoutPr;
        if let Some(existing) = self
            .repository
            .find_by_source_workout_exercise(exercise.id)
            .await?
        {
            return Ok(Self::already_derived(existing, source));
        }
        self.ensure_athlete(exercise.athlete_id).await?;

        let notes = match (exercise.actual_weight, exercise.actual_reps) {
            (Some(weight), Some(reps)) => Some(format!(
                "Estimated with {} from {weight} x {reps}",
                self.config.one_rep_max_algorithm.name()
            )),
            _ => None,
        };
        let metric = PerformanceMetric::new(
            exercise.athlete_id,
            metric_type,
            estimate,
            exercise.workout_date,
            MetricSource::WorkoutPr {
                workout_exercise_id: exercise.id,
            },
        )
        .with_notes(notes)
        .with_personal_record(true);

        self.persist(&metric, source).await
    }

    async fn persist(
        &self,
        metric: &PerformanceMetric,
        source: MetricSourceKind,
    ) -> AppResult<DerivationOutcome> {
        let outcome = DerivationOutcome::from_save(self.repository.save(metric).await?);
        match &outcome {
            DerivationOutcome::Created(stored) => AppLogger::log_metric_derived(
                stored.athlete_id,
                stored.metric_type,
                source.as_str(),
                stored.value,
                stored.is_personal_record,
            ),
            DerivationOutcome::AlreadyDerived(stored) => AppLogger::log_derivation_outcome(
                stored.athlete_id,
                Some(stored.metric_type),
                source.as_str(),
                "already_derived",
                "lost insert race to an identical source",
            ),
            DerivationOutcome::Skipped(_)
            | DerivationOutcome::NotPersonalRecord(_)
            | DerivationOutcome::Failed { .. } => {}
        }
        Ok(outcome)
    }

    async fn verdict(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
        value: f64,
    ) -> AppResult<PrVerdict> {
        let current_best = self
            .repository
            .find_current_best(athlete_id, metric_type)
            .await?
            .map(|metric| metric.value);
        Ok(PersonalRecordDetector::evaluate(metric_type, value, current_best))
    }

    async fn ensure_athlete(&self, athlete_id: Uuid) -> AppResult<()> {
        if self.repository.athlete_exists(athlete_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Athlete {athlete_id}")))
        }
    }

    async fn lock_for(&self, athlete_id: Uuid, metric_type: MetricType) -> KeyGuard<'_> {
        let key = (athlete_id, metric_type);
        let lock = Arc::clone(self.locks.entry(key).or_default().value());
        KeyGuard {
            locks: &self.locks,
            key,
            guard: Some(lock.lock_owned().await),
        }
    }

    fn skip(
        athlete_id: Uuid,
        metric_type: Option<MetricType>,
        source: MetricSourceKind,
        reason: SkipReason,
    ) -> DerivationOutcome {
        AppLogger::log_derivation_outcome(
            athlete_id,
            metric_type,
            source.as_str(),
            "skipped",
            reason.as_str(),
        );
        DerivationOutcome::Skipped(reason)
    }

    fn already_derived(existing: PerformanceMetric, source: MetricSourceKind) -> DerivationOutcome {
        AppLogger::log_derivation_outcome(
            existing.athlete_id,
            Some(existing.metric_type),
            source.as_str(),
            "already_derived",
            &existing.id.to_string(),
        );
        DerivationOutcome::AlreadyDerived(existing)
    }
}

fn ensure_finite(value: f64) -> AppResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "Metric value must be finite, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MetricHistoryFilter;
    use crate::errors::DatabaseError;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use podium_core::models::MeasurementKind;
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct InMemoryRepository {
        athletes: StdMutex<HashSet<Uuid>>,
        metrics: StdMutex<Vec<PerformanceMetric>>,
    }

    impl InMemoryRepository {
        fn with_athlete(athlete_id: Uuid) -> Self {
            let repository = Self::default();
            repository.athletes.lock().unwrap().insert(athlete_id);
            repository
        }

        fn count(&self) -> usize {
            self.metrics.lock().unwrap().len()
        }

        fn find(
            &self,
            predicate: impl Fn(&PerformanceMetric) -> bool,
        ) -> Option<PerformanceMetric> {
            self.metrics
                .lock()
                .unwrap()
                .iter()
                .find(|metric| predicate(metric))
                .cloned()
        }
    }

    #[async_trait]
    impl PerformanceMetricRepository for InMemoryRepository {
        async fn find_current_best(
            &self,
            athlete_id: Uuid,
            metric_type: MetricType,
        ) -> Result<Option<PerformanceMetric>, DatabaseError> {
            let direction = metric_type.scoring_direction();
            Ok(self
                .metrics
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.athlete_id == athlete_id && m.metric_type == metric_type)
                .fold(None, |best: Option<&PerformanceMetric>, m| match best {
                    Some(b) if !direction.is_better(m.value, b.value) => Some(b),
                    _ => Some(m),
                })
                .cloned())
        }

        async fn find_latest_by_athlete_and_metric_type(
            &self,
            athlete_id: Uuid,
            metric_type: MetricType,
        ) -> Result<Option<PerformanceMetric>, DatabaseError> {
            Ok(self
                .metrics
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.athlete_id == athlete_id && m.metric_type == metric_type)
                .max_by_key(|m| m.recorded_at)
                .cloned())
        }

        async fn find_by_source_assessment(
            &self,
            assessment_result_id: Uuid,
        ) -> Result<Option<PerformanceMetric>, DatabaseError> {
            Ok(self.find(|m| m.source.assessment_result_id() == Some(assessment_result_id)))
        }

        async fn find_by_source_workout_exercise(
            &self,
            workout_exercise_id: Uuid,
        ) -> Result<Option<PerformanceMetric>, DatabaseError> {
            Ok(self.find(|m| m.source.workout_exercise_id() == Some(workout_exercise_id)))
        }

        async fn save(&self, metric: &PerformanceMetric) -> Result<SaveOutcome, DatabaseError> {
            let mut metrics = self.metrics.lock().unwrap();
            let duplicate = metrics.iter().find(|m| {
                m.source.kind() != MetricSourceKind::Manual && m.source == metric.source
            });
            if let Some(existing) = duplicate {
                return Ok(SaveOutcome::AlreadyExists(existing.clone()));
            }
            metrics.push(metric.clone());
            drop(metrics);
            Ok(SaveOutcome::Inserted(metric.clone()))
        }

        async fn athlete_exists(&self, athlete_id: Uuid) -> Result<bool, DatabaseError> {
            Ok(self.athletes.lock().unwrap().contains(&athlete_id))
        }

        async fn list(
            &self,
            filter: &MetricHistoryFilter,
        ) -> Result<Vec<PerformanceMetric>, DatabaseError> {
            let mut metrics: Vec<PerformanceMetric> = self
                .metrics
                .lock()
                .unwrap()
                .iter()
                .filter(|m| filter.athlete_id.is_none_or(|id| id == m.athlete_id))
                .filter(|m| filter.metric_type.is_none_or(|t| t == m.metric_type))
                .cloned()
                .collect();
            metrics.sort_by_key(|m| m.recorded_at);
            Ok(metrics)
        }
    }

    fn service(repository: &Arc<InMemoryRepository>) -> MetricDerivationService {
        let port: Arc<dyn PerformanceMetricRepository> = repository.clone();
        MetricDerivationService::new(port, DerivationConfig::default())
    }

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + Duration::days(n)
    }

    fn forty(athlete_id: Uuid, value: f64, date: DateTime<Utc>) -> AssessmentObservation {
        AssessmentObservation {
            id: Uuid::new_v4(),
            athlete_id,
            assessment_name: "40 Yard Dash".into(),
            assessment_code: Some("FORTY_YARD_DASH".into()),
            unit: Some("seconds".into()),
            measurement_kind: MeasurementKind::Time,
            scoring_direction: None,
            auto_generate_metric: true,
            value,
            test_date: date,
            is_baseline: false,
            recorded_by: None,
            notes: None,
        }
    }

    fn bench(athlete_id: Uuid, weight: f64, reps: u32) -> WorkoutObservation {
        WorkoutObservation {
            id: Uuid::new_v4(),
            athlete_id,
            exercise_name: "Barbell Bench Press".into(),
            exercise_code: None,
            actual_weight: Some(weight),
            actual_reps: Some(reps),
            workout_date: day(0),
        }
    }

    #[tokio::test]
    async fn test_assessment_derivation_is_idempotent() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);
        let observation = forty(athlete, 4.8, day(0));

        let first = service.derive_from_assessment(&observation).await.unwrap();
        let second = service.derive_from_assessment(&observation).await.unwrap();

        assert!(first.is_created());
        assert_eq!(second.as_str(), "already_derived");
        assert_eq!(first.metric(), second.metric());
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test]
    async fn test_assessment_uses_direction_for_records() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);

        let first = service
            .derive_from_assessment(&forty(athlete, 4.8, day(0)))
            .await
            .unwrap();
        let slower = service
            .derive_from_assessment(&forty(athlete, 4.9, day(7)))
            .await
            .unwrap();
        let faster = service
            .derive_from_assessment(&forty(athlete, 4.6, day(14)))
            .await
            .unwrap();

        assert!(first.metric().unwrap().is_personal_record);
        assert!(!slower.metric().unwrap().is_personal_record);
        assert!(faster.metric().unwrap().is_personal_record);
        assert_eq!(faster.metric().unwrap().unit, "seconds");
        assert_eq!(repository.count(), 3);
    }

    #[tokio::test]
    async fn test_baseline_is_flagged_even_when_not_best() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);

        service
            .derive_from_assessment(&forty(athlete, 4.5, day(0)))
            .await
            .unwrap();
        let mut baseline = forty(athlete, 4.9, day(1));
        baseline.is_baseline = true;
        let outcome = service.derive_from_assessment(&baseline).await.unwrap();

        assert!(outcome.metric().unwrap().is_personal_record);
    }

    #[tokio::test]
    async fn test_assessment_skips() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);

        let mut disabled = forty(athlete, 4.8, day(0));
        disabled.auto_generate_metric = false;
        assert_eq!(
            service.derive_from_assessment(&disabled).await.unwrap(),
            DerivationOutcome::Skipped(SkipReason::AutoGenerateDisabled)
        );

        let mut unknown = forty(athlete, 12.0, day(0));
        unknown.assessment_name = "Sit and Reach".into();
        unknown.assessment_code = None;
        unknown.measurement_kind = MeasurementKind::Distance;
        assert_eq!(
            service.derive_from_assessment(&unknown).await.unwrap(),
            DerivationOutcome::Skipped(SkipReason::UnmappedIdentity)
        );
        assert_eq!(repository.count(), 0);
    }

    #[tokio::test]
    async fn test_missing_unit_falls_back_to_default() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);

        let mut observation = forty(athlete, 4.8, day(0));
        observation.unit = None;
        let outcome = service.derive_from_assessment(&observation).await.unwrap();

        assert_eq!(
            outcome.metric().unwrap().unit,
            MetricType::FortyYardDash.default_unit()
        );
    }

    #[tokio::test]
    async fn test_unknown_athlete_is_surfaced() {
        let repository = Arc::new(InMemoryRepository::default());
        let service = service(&repository);

        let error = service
            .derive_from_assessment(&forty(Uuid::new_v4(), 4.8, day(0)))
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);

        let outcome = best_effort(
            Uuid::new_v4(),
            MetricSourceKind::Assessment,
            service.derive_from_assessment(&forty(Uuid::new_v4(), 4.8, day(0))),
        )
        .await;
        assert!(matches!(
            outcome,
            DerivationOutcome::Failed {
                code: ErrorCode::ResourceNotFound,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_workout_pr_end_to_end() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);
        let exercise = bench(athlete, 185.0, 5);

        let outcome = service.process_workout_exercise(&exercise).await.unwrap();
        let metric = outcome.metric().unwrap();
        assert!(outcome.is_created());
        assert_eq!(metric.metric_type, MetricType::BenchPressMax);
        assert!((metric.value - 208.1).abs() < 0.1);
        assert!(metric.is_personal_record);
        assert_eq!(metric.source.workout_exercise_id(), Some(exercise.id));

        let again = service.process_workout_exercise(&exercise).await.unwrap();
        assert!(matches!(again, DerivationOutcome::AlreadyDerived(_)));
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test]
    async fn test_workout_below_best_is_not_a_record() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);

        service
            .process_workout_exercise(&bench(athlete, 225.0, 3))
            .await
            .unwrap();
        let outcome = service
            .process_workout_exercise(&bench(athlete, 185.0, 5))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            DerivationOutcome::NotPersonalRecord(v) if !v.is_personal_record
        ));
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test]
    async fn test_workout_skips_and_errors() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);

        let mut no_load = bench(athlete, 185.0, 5);
        no_load.actual_weight = None;
        assert_eq!(
            service.process_workout_exercise(&no_load).await.unwrap(),
            DerivationOutcome::Skipped(SkipReason::MissingLoadData)
        );

        let mut stretch = bench(athlete, 10.0, 5);
        stretch.exercise_name = "Hamstring Stretch".into();
        assert_eq!(
            service.process_workout_exercise(&stretch).await.unwrap(),
            DerivationOutcome::Skipped(SkipReason::UnmappedIdentity)
        );

        let error = service
            .process_workout_exercise(&bench(athlete, 95.0, 40))
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert_eq!(repository.count(), 0);
    }

    #[tokio::test]
    async fn test_confirmed_workout_pr_is_always_flagged() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);
        let exercise = bench(athlete, 200.0, 1);

        let outcome = service
            .derive_from_workout_pr(&exercise, MetricType::BenchPressMax, 200.0)
            .await
            .unwrap();
        assert!(outcome.metric().unwrap().is_personal_record);

        let again = service
            .derive_from_workout_pr(&exercise, MetricType::BenchPressMax, 200.0)
            .await
            .unwrap();
        assert_eq!(again.metric(), outcome.metric());
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test]
    async fn test_manual_entry_uses_detector() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = service(&repository);

        let first = service
            .record_manual(athlete, MetricType::VerticalJump, 30.0, day(0), None)
            .await
            .unwrap();
        let lower = service
            .record_manual(athlete, MetricType::VerticalJump, 28.0, day(1), None)
            .await
            .unwrap();

        assert!(first.is_personal_record);
        assert!(!lower.is_personal_record);
        assert_eq!(lower.source, MetricSource::Manual);

        let error = service
            .record_manual(athlete, MetricType::VerticalJump, f64::NAN, day(2), None)
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_concurrent_derivations_store_one_metric() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = Arc::new(service(&repository));
        let exercise = bench(athlete, 185.0, 5);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                let exercise = exercise.clone();
                tokio::spawn(async move { service.process_workout_exercise(&exercise).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_created() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_distinct_sets_never_share_a_stale_best() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = Arc::new(service(&repository));

        let handles: Vec<_> = [205.0, 225.0, 215.0, 235.0, 235.0, 195.0, 245.0, 240.0]
            .into_iter()
            .map(|weight| {
                let service = Arc::clone(&service);
                let exercise = bench(athlete, weight, 1);
                tokio::spawn(async move { service.process_workout_exercise(&exercise).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored: Vec<f64> = repository
            .metrics
            .lock()
            .unwrap()
            .iter()
            .map(|metric| metric.value)
            .collect();
        assert!(stored.windows(2).all(|pair| pair[1] > pair[0]), "{stored:?}");
        assert_eq!(stored.last(), Some(&245.0));
    }

    #[tokio::test]
    async fn test_idle_key_locks_are_released() {
        let athlete = Uuid::new_v4();
        let repository = Arc::new(InMemoryRepository::with_athlete(athlete));
        let service = Arc::new(service(&repository));

        let mut handles = Vec::new();
        for (metric_type, value) in [
            (MetricType::SquatMax, 315.0),
            (MetricType::SquatMax, 325.0),
            (MetricType::SquatMax, 320.0),
            (MetricType::VerticalJump, 29.5),
            (MetricType::VerticalJump, 30.0),
            (MetricType::VerticalJump, 31.5),
        ] {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .record_manual(athlete, metric_type, value, day(0), None)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(service.locks.is_empty());
        assert_eq!(repository.count(), 6);
    }
}
