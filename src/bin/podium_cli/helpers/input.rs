// ABOUTME: Argument parsing helpers for podium-cli
// ABOUTME: Converts string flags into ids, dates, metric types, and scoring directions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use chrono::{DateTime, NaiveDate, Utc};
use podium_performance::{
    errors::{AppError, AppResult},
    models::{MetricType, ScoringDirection},
};
use uuid::Uuid;

type Result<T> = AppResult<T>;

/// Parse a UUID flag
pub fn parse_id(flag: &str, raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| AppError::invalid_input(format!("Invalid {flag} '{raw}': {e}")))
}

/// Parse an optional UUID flag, generating a fresh id when absent
pub fn parse_id_or_new(flag: &str, raw: Option<&str>) -> Result<Uuid> {
    raw.map_or_else(|| Ok(Uuid::new_v4()), |raw| parse_id(flag, raw))
}

/// Parse `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AppError::invalid_input(format!(
                "Invalid date '{raw}': expected YYYY-MM-DD or RFC 3339"
            ))
        })
}

/// Parse an optional date flag, defaulting to now
pub fn parse_date_or_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    raw.map_or_else(|| Ok(Utc::now()), parse_date)
}

/// Parse an optional date flag
pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(parse_date).transpose()
}

/// Parse a metric type name such as `bench_press_max`
pub fn parse_metric_type(raw: &str) -> Result<MetricType> {
    raw.parse()
}

/// Parse `higher` / `lower` style direction keywords
pub fn parse_direction(raw: &str) -> Result<ScoringDirection> {
    match raw.trim().to_lowercase().as_str() {
        "higher" => Ok(ScoringDirection::HigherIsBetter),
        "lower" => Ok(ScoringDirection::LowerIsBetter),
        keyword => ScoringDirection::from_keyword(keyword).ok_or_else(|| {
            AppError::invalid_input(format!(
                "Invalid scoring direction '{raw}': expected higher or lower"
            ))
        }),
    }
}
