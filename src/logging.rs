// ABOUTME: Logging configuration and structured logging setup for observability and debugging
// ABOUTME: Configures log levels, formatters, and structured derivation events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Structured logging configuration

use crate::config::environment::{env_bool, env_var_or};
use crate::errors::{AppError, AppResult};
use anyhow::{anyhow, Result};
use podium_core::constants::service_names;
use podium_core::models::MetricType;
use serde_json::json;
use std::env;
use std::io;
use std::str::FromStr;
use tracing::{info, warn, Level};
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use uuid::Uuid;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, testing, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for CLI output
    Compact,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(AppError::config(format!(
                "Invalid LOG_FORMAT '{other}'. Valid options: json, pretty, compact"
            ))),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::PODIUM_PERFORMANCE.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for an unknown `LOG_FORMAT` or a non-boolean
    /// `LOG_INCLUDE_*` flag
    pub fn from_env() -> AppResult<Self> {
        let environment = env_var_or("ENVIRONMENT", "development");
        let is_production = environment == "production";

        let format = match env::var("LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) if is_production => LogFormat::Json,
            Err(_) => LogFormat::Pretty,
        };

        Ok(Self {
            level: env_var_or("RUST_LOG", "info"),
            format,
            include_location: env_bool("LOG_INCLUDE_LOCATION", is_production)?,
            include_thread: env_bool("LOG_INCLUDE_THREAD", is_production)?,
            include_spans: env_bool("LOG_INCLUDE_SPANS", false)?,
            service_name: env_var_or("SERVICE_NAME", service_names::PODIUM_PERFORMANCE),
            service_version: env_var_or("SERVICE_VERSION", env!("CARGO_PKG_VERSION")),
            environment,
        })
    }

    /// Quiet configuration for command-line use
    #[must_use]
    pub fn for_cli(verbose: bool) -> Self {
        Self {
            level: if verbose { "debug" } else { "warn" }.into(),
            format: LogFormat::Compact,
            ..Self::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let directive = |raw: &str, fallback: Level| -> Directive {
            raw.parse().unwrap_or_else(|_| fallback.into())
        };

        EnvFilter::new(&self.level)
            // Keep pool and statement chatter out of application logs
            .add_directive(directive("sqlx=warn", Level::WARN))
            .add_directive(directive("sqlx::query=warn", Level::WARN))
            .add_directive(directive(
                &format!("podium_performance={}", self.level),
                Level::INFO,
            ))
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_thread_names(self.include_thread)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events)
                        .json(),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_thread_names(self.include_thread)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stderr)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init(),
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            config = %config_summary,
            "Podium performance engine starting"
        );
    }
}

/// Structured events emitted by the derivation pipeline
pub struct AppLogger;

impl AppLogger {
    /// A canonical metric was derived and stored
    pub fn log_metric_derived(
        athlete_id: Uuid,
        metric_type: MetricType,
        source: &str,
        value: f64,
        is_personal_record: bool,
    ) {
        info!(
            athlete.id = %athlete_id,
            "metric.type" = %metric_type,
            derivation.source = %source,
            derivation.outcome = "created",
            metric.value = value,
            metric.personal_record = is_personal_record,
            "Derived performance metric"
        );
    }

    /// A derivation was a no-op (already derived, skipped, or not a record)
    pub fn log_derivation_outcome(
        athlete_id: Uuid,
        metric_type: Option<MetricType>,
        source: &str,
        outcome: &str,
        detail: &str,
    ) {
        info!(
            athlete.id = %athlete_id,
            "metric.type" = metric_type.map_or("none", |t| t.as_str()),
            derivation.source = %source,
            derivation.outcome = %outcome,
            derivation.detail = %detail,
            "Derivation finished without a new metric"
        );
    }

    /// A best-effort derivation failed and the triggering workflow continued
    pub fn log_derivation_failure(athlete_id: Uuid, source: &str, error: &AppError) {
        warn!(
            athlete.id = %athlete_id,
            derivation.source = %source,
            derivation.outcome = "failed",
            error.code = ?error.code,
            error.message = %error.message,
            "Metric derivation failed"
        );
    }

    /// A manual metric entry was recorded
    pub fn log_manual_entry(athlete_id: Uuid, metric_type: MetricType, is_personal_record: bool) {
        info!(
            athlete.id = %athlete_id,
            "metric.type" = %metric_type,
            derivation.source = "manual",
            metric.personal_record = is_personal_record,
            "Recorded manual performance metric"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_cli_config_is_quiet() {
        let config = LoggingConfig::for_cli(false);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(LoggingConfig::for_cli(true).level, "debug");
    }
}
