// ABOUTME: Output formatting helpers for podium-cli
// ABOUTME: Provides consistent display functions for metrics, outcomes, and progress reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use podium_performance::{
    errors::{AppError, AppResult, ErrorCode},
    intelligence::{AssessmentProgressReport, MetricProgressReport},
    models::{Athlete, MetricType, PerformanceMetric},
    services::DerivationOutcome,
};
use serde::Serialize;

type Result<T> = AppResult<T>;

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::new(
            ErrorCode::SerializationError,
            format!("Failed to render JSON: {e}"),
        )
    })?;
    println!("{rendered}");
    Ok(())
}

fn format_optional(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.2} {unit}").trim_end().to_owned())
}

fn format_percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:+.1}%"))
}

/// Display a newly registered athlete
pub fn display_athlete(athlete: &Athlete) {
    println!("\nAthlete registered");
    println!("{}", "=".repeat(50));
    println!("   ID: {}", athlete.id);
    println!("   Name: {}", athlete.display_name);
    println!(
        "   Created: {}",
        athlete.created_at.format("%Y-%m-%d %H:%M UTC")
    );
}

/// Display all registered athletes
pub fn display_athletes(athletes: &[Athlete]) {
    if athletes.is_empty() {
        println!("No athletes registered");
        return;
    }
    println!("{:<38} {}", "ID", "NAME");
    for athlete in athletes {
        println!("{:<38} {}", athlete.id, athlete.display_name);
    }
}

/// Display one stored metric
pub fn display_metric(metric: &PerformanceMetric) {
    println!(
        "   {}: {:.2} {} on {}{}",
        metric.metric_type.display_name(),
        metric.value,
        metric.unit,
        metric.recorded_at.format("%Y-%m-%d"),
        if metric.is_personal_record {
            "  (personal record)"
        } else {
            ""
        }
    );
    println!("   Source: {}", metric.source.kind().as_str());
    println!("   Metric ID: {}", metric.id);
}

/// Display the outcome of a derivation attempt
pub fn display_outcome(outcome: &DerivationOutcome) {
    match outcome {
        DerivationOutcome::Created(metric) => {
            println!("\nPerformance metric created");
            display_metric(metric);
        }
        DerivationOutcome::AlreadyDerived(metric) => {
            println!("\nAlready derived from this observation; nothing stored");
            display_metric(metric);
        }
        DerivationOutcome::Skipped(reason) => {
            println!("\nNo metric derived ({})", reason.as_str());
        }
        DerivationOutcome::NotPersonalRecord(verdict) => {
            println!(
                "\nNot a personal record: estimate {:.2} vs best {}",
                verdict.value,
                verdict
                    .previous_best
                    .map_or_else(|| "-".to_owned(), |best| format!("{best:.2}"))
            );
        }
        DerivationOutcome::Failed { code, message } => {
            println!("\nMetric derivation failed ({code:?}): {message}");
        }
    }
}

/// Display a metric history table
pub fn display_metric_history(metric_type: MetricType, history: &[PerformanceMetric]) {
    println!("\n{} history", metric_type.display_name());
    println!("{}", "=".repeat(60));
    if history.is_empty() {
        println!("   No entries");
        return;
    }
    for metric in history {
        println!(
            "   {}  {:>10.2} {:<8} {:<11} {}",
            metric.recorded_at.format("%Y-%m-%d"),
            metric.value,
            metric.unit,
            metric.source.kind().as_str(),
            if metric.is_personal_record { "PR" } else { "" }
        );
    }
}

/// Display a metric progress report
pub fn display_metric_progress(report: &MetricProgressReport) {
    let unit = report.metric_type.default_unit();
    println!("\n{} progress", report.metric_type.display_name());
    println!("{}", "=".repeat(50));
    println!("   Current: {}", format_optional(report.current_value, unit));
    println!("   Previous: {}", format_optional(report.previous_value, unit));
    println!(
        "   Change: {} ({})",
        format_optional(report.improvement, unit),
        format_percentage(report.improvement_percentage)
    );
    println!(
        "   Improved: {}",
        if report.improved { "yes" } else { "no" }
    );
    println!("   Entries: {}", report.history.len());
}

/// Display an assessment progress report
pub fn display_assessment_progress(report: &AssessmentProgressReport) {
    let summary = &report.summary;
    println!("\n{} progress", report.assessment_name);
    println!("{}", "=".repeat(50));
    println!("   Results: {}", summary.entry_count);
    println!("   Baseline: {}", format_optional(summary.baseline, ""));
    println!("   Latest: {}", format_optional(summary.latest, ""));
    println!("   Best: {}", format_optional(summary.best, ""));
    println!(
        "   Total change: {} ({})",
        format_optional(summary.total_improvement, ""),
        format_percentage(summary.total_improvement_percentage)
    );
    println!("   Trend: {}", summary.trend.as_str());

    if !report.chart_points.is_empty() {
        println!("\n   Chart:");
        for point in &report.chart_points {
            println!(
                "   {:<12} {:>10.2}{}",
                point.label,
                point.value,
                if point.is_baseline { "  baseline" } else { "" }
            );
        }
    }
}
