// ABOUTME: Progress reports over stored metrics and raw assessment history
// ABOUTME: Reads history through the repository port and summarizes it with the analyzer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use crate::database::repositories::PerformanceMetricRepository;
use crate::database::MetricHistoryFilter;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use podium_core::constants::limits::MAX_HISTORY_LIMIT;
use podium_core::models::{AssessmentObservation, MetricType, PerformanceMetric};
use podium_intelligence::{AssessmentProgressReport, MetricProgressReport, ProgressAnalyzer};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Read-side reports for athletes' performance history
#[derive(Clone)]
pub struct ProgressReportService {
    repository: Arc<dyn PerformanceMetricRepository>,
}

impl ProgressReportService {
    /// Create a report service over the given repository
    #[must_use]
    pub fn new(repository: Arc<dyn PerformanceMetricRepository>) -> Self {
        Self { repository }
    }

    /// Metric history for one athlete and type, oldest first
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown athlete or a storage error
    pub async fn metric_history(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> AppResult<Vec<PerformanceMetric>> {
        self.ensure_athlete(athlete_id).await?;
        let filter = MetricHistoryFilter::for_metric(athlete_id, metric_type)
            .between(from, to)
            .page(limit, offset);
        Ok(self.repository.list(&filter).await?)
    }

    /// Personal-record metrics across all types, oldest first
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown athlete or a storage error
    pub async fn personal_records(&self, athlete_id: Uuid) -> AppResult<Vec<PerformanceMetric>> {
        self.ensure_athlete(athlete_id).await?;
        let filter = MetricHistoryFilter {
            athlete_id: Some(athlete_id),
            personal_records_only: true,
            limit: Some(MAX_HISTORY_LIMIT),
            ..MetricHistoryFilter::default()
        };
        Ok(self.repository.list(&filter).await?)
    }

    /// Current vs previous value for one metric type, with the full history
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown athlete or a storage error
    pub async fn metric_progress(
        &self,
        athlete_id: Uuid,
        metric_type: MetricType,
    ) -> AppResult<MetricProgressReport> {
        self.ensure_athlete(athlete_id).await?;
        let filter = MetricHistoryFilter::for_metric(athlete_id, metric_type)
            .page(Some(MAX_HISTORY_LIMIT), None);
        let history = self.repository.list(&filter).await?;

        debug!(
            athlete.id = %athlete_id,
            "metric.type" = %metric_type,
            history.len = history.len(),
            "Building metric progress report"
        );
        Ok(ProgressAnalyzer::metric_report(athlete_id, metric_type, history))
    }

    /// Assessment progress for one athlete and assessment name
    ///
    /// Results for other athletes or other assessments are ignored; the name
    /// comparison is case-insensitive.
    #[must_use]
    pub fn assessment_progress(
        athlete_id: Uuid,
        assessment_name: &str,
        results: &[AssessmentObservation],
    ) -> AssessmentProgressReport {
        let wanted = assessment_name.trim().to_lowercase();
        let matching: Vec<AssessmentObservation> = results
            .iter()
            .filter(|result| {
                result.athlete_id == athlete_id
                    && result.assessment_name.trim().to_lowercase() == wanted
            })
            .cloned()
            .collect();

        ProgressAnalyzer::assessment_report(athlete_id, assessment_name.trim(), &matching)
    }

    async fn ensure_athlete(&self, athlete_id: Uuid) -> AppResult<()> {
        if self.repository.athlete_exists(athlete_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Athlete {athlete_id}")))
        }
    }
}
