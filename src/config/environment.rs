// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Assembles PodiumConfig from environment variables with typed validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Environment-based configuration
//!
//! Configuration is environment-only: there is no config file. Unset
//! variables take their defaults; set-but-invalid variables are rejected with
//! `CONFIG_INVALID` rather than silently ignored.

use super::database::DatabaseConfig;
use super::derivation::DerivationConfig;
use crate::errors::{AppError, AppResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Complete configuration for the library and the CLI
#[derive(Debug, Clone)]
pub struct PodiumConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Storage settings
    pub database: DatabaseConfig,
    /// Derivation engine settings
    pub derivation: DerivationConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl PodiumConfig {
    /// Load the full configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if any set variable has an invalid value
    pub fn from_env() -> AppResult<Self> {
        let environment =
            Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        Ok(Self {
            environment,
            database: DatabaseConfig::from_env()?,
            derivation: DerivationConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Log a one-line summary of the loaded configuration
    pub fn log_summary(&self) {
        info!(
            environment = %self.environment,
            database.url = %self.database.url,
            database.auto_migrate = self.database.auto_migrate,
            derivation.algorithm = self.derivation.one_rep_max_algorithm.name(),
            derivation.max_estimation_reps = self.derivation.max_estimation_reps,
            derivation.legacy_name_matching = self.derivation.legacy_name_matching,
            "Configuration loaded"
        );
    }
}

/// Read an environment variable, falling back to a default when unset
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Read a boolean environment variable
///
/// Accepts `true/false`, `1/0`, `yes/no`, `on/off` (case-insensitive).
///
/// # Errors
///
/// Returns `CONFIG_INVALID` if the variable is set to anything else
pub(crate) fn env_bool(key: &str, default: bool) -> AppResult<bool> {
    match env::var(key) {
        Ok(value) => parse_bool(&value)
            .ok_or_else(|| AppError::config(format!("Invalid {key} value: '{value}'"))),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::from_str_or_default("prod"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("TEST"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("qa"), Environment::Development);
    }
}
