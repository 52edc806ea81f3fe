// ABOUTME: Canonical metric commands for podium-cli
// ABOUTME: Handles manual entries, history, progress, and personal record listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use podium_performance::errors::AppResult;

use crate::helpers::display::{
    display_metric, display_metric_history, display_metric_progress, print_json,
};
use crate::helpers::input::{
    parse_date_or_now, parse_id, parse_metric_type, parse_optional_date,
};
use crate::Context;

type Result<T> = AppResult<T>;

/// Date range and paging for `metric history`
pub struct HistoryRange {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Add a manual metric entry
pub async fn add(
    context: &Context,
    athlete: &str,
    metric_type: &str,
    value: f64,
    date: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let athlete_id = parse_id("--athlete", athlete)?;
    let metric_type = parse_metric_type(metric_type)?;
    let recorded_at = parse_date_or_now(date.as_deref())?;

    let metric = context
        .derivation
        .record_manual(athlete_id, metric_type, value, recorded_at, notes)
        .await?;

    if context.json {
        print_json(&metric)
    } else {
        println!("\nManual metric recorded");
        display_metric(&metric);
        Ok(())
    }
}

/// Show metric history
pub async fn history(
    context: &Context,
    athlete: &str,
    metric_type: &str,
    range: HistoryRange,
) -> Result<()> {
    let athlete_id = parse_id("--athlete", athlete)?;
    let metric_type = parse_metric_type(metric_type)?;
    let from = parse_optional_date(range.from.as_deref())?;
    let to = parse_optional_date(range.to.as_deref())?;

    let history = context
        .reports
        .metric_history(athlete_id, metric_type, from, to, range.limit, range.offset)
        .await?;

    if context.json {
        print_json(&history)
    } else {
        display_metric_history(metric_type, &history);
        Ok(())
    }
}

/// Compare the latest value with the previous one
pub async fn progress(context: &Context, athlete: &str, metric_type: &str) -> Result<()> {
    let athlete_id = parse_id("--athlete", athlete)?;
    let metric_type = parse_metric_type(metric_type)?;

    let report = context
        .reports
        .metric_progress(athlete_id, metric_type)
        .await?;

    if context.json {
        print_json(&report)
    } else {
        display_metric_progress(&report);
        Ok(())
    }
}

/// List personal records across all metric types
pub async fn records(context: &Context, athlete: &str) -> Result<()> {
    let athlete_id = parse_id("--athlete", athlete)?;
    let records = context.reports.personal_records(athlete_id).await?;

    if context.json {
        print_json(&records)
    } else if records.is_empty() {
        println!("No personal records yet");
        Ok(())
    } else {
        println!("\nPersonal records");
        println!("{}", "=".repeat(50));
        for metric in &records {
            display_metric(metric);
        }
        Ok(())
    }
}
