// ABOUTME: Assessment commands for podium-cli
// ABOUTME: Records assessment results through the derivation service
// ABOUTME: Reports assessment progress from JSON exports of results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use podium_performance::{
    errors::{AppError, AppResult, ErrorCode},
    models::{AssessmentObservation, MeasurementKind, MetricSourceKind},
    services::{best_effort, ProgressReportService},
};
use tokio::fs;
use tracing::info;

use crate::helpers::display::{display_assessment_progress, display_outcome, print_json};
use crate::helpers::input::{parse_date_or_now, parse_direction, parse_id, parse_id_or_new};
use crate::Context;

type Result<T> = AppResult<T>;

/// Flags of `assessment record`
pub struct RecordRequest {
    pub athlete: String,
    pub name: String,
    pub code: Option<String>,
    pub value: f64,
    pub unit: Option<String>,
    pub measurement: String,
    pub direction: Option<String>,
    pub date: Option<String>,
    pub baseline: bool,
    pub derive: bool,
    pub id: Option<String>,
    pub notes: Option<String>,
}

/// Record an assessment result
///
/// Derivation runs best-effort: a failure is reported but does not fail the
/// recording, matching how the assessment workflow treats it.
pub async fn record(context: &Context, request: RecordRequest) -> Result<()> {
    let observation = AssessmentObservation {
        id: parse_id_or_new("--id", request.id.as_deref())?,
        athlete_id: parse_id("--athlete", &request.athlete)?,
        assessment_name: request.name,
        assessment_code: request.code,
        unit: request.unit,
        measurement_kind: MeasurementKind::parse(&request.measurement),
        scoring_direction: request
            .direction
            .as_deref()
            .map(parse_direction)
            .transpose()?,
        auto_generate_metric: request.derive,
        value: request.value,
        test_date: parse_date_or_now(request.date.as_deref())?,
        is_baseline: request.baseline,
        recorded_by: None,
        notes: request.notes,
    };
    info!(
        assessment.id = %observation.id,
        assessment.name = %observation.assessment_name,
        "Recording assessment result"
    );

    let outcome = best_effort(
        observation.athlete_id,
        MetricSourceKind::Assessment,
        context.derivation.derive_from_assessment(&observation),
    )
    .await;

    if context.json {
        print_json(&serde_json::json!({
            "assessment_result_id": observation.id,
            "outcome": outcome.as_str(),
            "metric": outcome.metric(),
        }))
    } else {
        println!("Assessment result ID: {}", observation.id);
        display_outcome(&outcome);
        Ok(())
    }
}

/// Summarize assessment progress from a JSON array of results
pub async fn progress(context: &Context, athlete: &str, name: &str, file: &str) -> Result<()> {
    let athlete_id = parse_id("--athlete", athlete)?;
    let raw = fs::read_to_string(file)
        .await
        .map_err(|e| AppError::invalid_input(format!("Failed to read {file}: {e}")))?;
    let results: Vec<AssessmentObservation> = serde_json::from_str(&raw).map_err(|e| {
        AppError::new(
            ErrorCode::SerializationError,
            format!("Invalid assessment results in {file}: {e}"),
        )
    })?;

    let report = ProgressReportService::assessment_progress(athlete_id, name, &results);
    if context.json {
        print_json(&report)
    } else {
        display_assessment_progress(&report);
        Ok(())
    }
}
