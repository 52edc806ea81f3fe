// ABOUTME: Derivation engine configuration for 1RM estimation and metric type resolution
// ABOUTME: Selects the estimation formula, the rep ceiling, and legacy name matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use super::environment::{env_bool, env_var_or};
use crate::errors::{AppError, AppResult};
use podium_core::constants::one_rep_max::MAX_ESTIMATION_REPS;
use podium_intelligence::{MetricTypeMapper, OneRepMaxAlgorithm};
use serde::{Deserialize, Serialize};
use std::env;

/// Settings for the metric derivation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationConfig {
    /// Formula used to turn a multi-rep set into a one-rep max
    pub one_rep_max_algorithm: OneRepMaxAlgorithm,
    /// Longest set (in reps) an estimate is computed from; at most 35
    pub max_estimation_reps: u32,
    /// Fall back to free-text keyword matching when no stable code resolves
    pub legacy_name_matching: bool,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            one_rep_max_algorithm: OneRepMaxAlgorithm::Brzycki,
            max_estimation_reps: MAX_ESTIMATION_REPS,
            legacy_name_matching: true,
        }
    }
}

impl DerivationConfig {
    /// Load derivation configuration from environment
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for an unknown algorithm, a rep ceiling outside
    /// `1..=35`, or a non-boolean legacy flag
    pub fn from_env() -> AppResult<Self> {
        let one_rep_max_algorithm = env_var_or("PODIUM_ONE_REP_MAX_ALGORITHM", "brzycki")
            .parse::<OneRepMaxAlgorithm>()
            .map_err(|e| AppError::config(e.message))?;

        let max_estimation_reps = match env::var("PODIUM_MAX_ESTIMATION_REPS") {
            Ok(raw) => Self::parse_max_reps(&raw)?,
            Err(_) => MAX_ESTIMATION_REPS,
        };

        Ok(Self {
            one_rep_max_algorithm,
            max_estimation_reps,
            legacy_name_matching: env_bool("PODIUM_LEGACY_NAME_MATCHING", true)?,
        })
    }

    fn parse_max_reps(raw: &str) -> AppResult<u32> {
        let reps: u32 = raw.trim().parse().map_err(|e| {
            AppError::config(format!("Invalid PODIUM_MAX_ESTIMATION_REPS '{raw}': {e}"))
        })?;
        if (1..=MAX_ESTIMATION_REPS).contains(&reps) {
            Ok(reps)
        } else {
            Err(AppError::config(format!(
                "PODIUM_MAX_ESTIMATION_REPS must be between 1 and {MAX_ESTIMATION_REPS}, got {reps}"
            )))
        }
    }

    /// Build the metric type mapper these settings describe
    #[must_use]
    pub fn mapper(&self) -> MetricTypeMapper {
        MetricTypeMapper::new(self.legacy_name_matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_reps_bounds() {
        assert_eq!(DerivationConfig::parse_max_reps("12").unwrap(), 12);
        assert_eq!(DerivationConfig::parse_max_reps("35").unwrap(), 35);
        assert!(DerivationConfig::parse_max_reps("0").is_err());
        assert!(DerivationConfig::parse_max_reps("36").is_err());
        assert!(DerivationConfig::parse_max_reps("ten").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = DerivationConfig::default();
        assert_eq!(config.one_rep_max_algorithm, OneRepMaxAlgorithm::Brzycki);
        assert_eq!(config.max_estimation_reps, 35);
        assert!(config.legacy_name_matching);
    }
}
