// ABOUTME: Workout commands for podium-cli
// ABOUTME: Runs the workout-completion boundary for a single logged exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use podium_performance::{
    errors::AppResult,
    models::{MetricSourceKind, WorkoutObservation},
    services::best_effort,
};
use tracing::info;

use crate::helpers::display::{display_outcome, print_json};
use crate::helpers::input::{parse_date_or_now, parse_id, parse_id_or_new};
use crate::Context;

type Result<T> = AppResult<T>;

/// Flags of `workout record`
pub struct RecordRequest {
    pub athlete: String,
    pub exercise: String,
    pub code: Option<String>,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub date: Option<String>,
    pub id: Option<String>,
}

/// Record a completed exercise and store a PR metric when it is one
pub async fn record(context: &Context, request: RecordRequest) -> Result<()> {
    let exercise = WorkoutObservation {
        id: parse_id_or_new("--id", request.id.as_deref())?,
        athlete_id: parse_id("--athlete", &request.athlete)?,
        exercise_name: request.exercise,
        exercise_code: request.code,
        actual_weight: request.weight,
        actual_reps: request.reps,
        workout_date: parse_date_or_now(request.date.as_deref())?,
    };
    info!(
        workout_exercise.id = %exercise.id,
        exercise.name = %exercise.exercise_name,
        "Recording workout exercise"
    );

    let outcome = best_effort(
        exercise.athlete_id,
        MetricSourceKind::WorkoutPr,
        context.derivation.process_workout_exercise(&exercise),
    )
    .await;

    if context.json {
        print_json(&serde_json::json!({
            "workout_exercise_id": exercise.id,
            "outcome": outcome.as_str(),
            "metric": outcome.metric(),
        }))
    } else {
        println!("Workout exercise ID: {}", exercise.id);
        display_outcome(&outcome);
        Ok(())
    }
}
