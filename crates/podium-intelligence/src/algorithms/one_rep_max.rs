// ABOUTME: One-rep-max estimation from a multi-rep set using validated strength formulas
// ABOUTME: Implements Brzycki (default), Epley, and Lombardi with a hard rep ceiling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use podium_core::constants::one_rep_max::{
    BRZYCKI_INTERCEPT, BRZYCKI_SLOPE, EPLEY_DIVISOR, LOMBARDI_EXPONENT, MAX_ESTIMATION_REPS,
};
use podium_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One-rep-max estimation algorithm
///
/// All formulas return the lifted weight unchanged for a single rep, and all
/// refuse to estimate from sets longer than [`MAX_ESTIMATION_REPS`].
///
/// - `Brzycki`: W / (1.0278 - 0.0278 x R), most accurate below 10 reps
/// - `Epley`: W x (1 + R / 30), slightly more generous at higher reps
/// - `Lombardi`: W x R^0.10, flattest curve
///
/// # Scientific References
///
/// - Brzycki, M. (1993). "Strength testing: predicting a one-rep max from
///   reps-to-fatigue." *JOPERD*, 64(1), 88-90.
/// - Epley, B. (1985). "Poundage chart." *Boyd Epley Workout*. Lincoln, NE.
/// - `LeSuer`, D.A. et al. (1997). "The accuracy of prediction equations for
///   estimating 1-RM performance." *J Strength Cond Res*, 11(4), 211-213.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OneRepMaxAlgorithm {
    /// Brzycki formula: W / (1.0278 - 0.0278 x R)
    ///
    /// The denominator reaches zero near 37 reps, which is why the rep
    /// ceiling exists.
    #[default]
    Brzycki,

    /// Epley formula: W x (1 + R / 30)
    Epley,

    /// Lombardi formula: W x R^0.10
    Lombardi,
}

impl OneRepMaxAlgorithm {
    /// Estimate a one-rep max using the hard rep ceiling
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if the weight is not a positive finite
    /// number or reps is zero, and `AppError::ValueOutOfRange` if reps exceeds
    /// the formula's valid range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use podium_intelligence::algorithms::OneRepMaxAlgorithm;
    ///
    /// let max = OneRepMaxAlgorithm::Brzycki.estimate(100.0, 1).unwrap();
    /// assert!((max - 100.0).abs() < f64::EPSILON);
    /// ```
    pub fn estimate(&self, weight: f64, reps: u32) -> Result<f64, AppError> {
        self.estimate_with_limit(weight, reps, MAX_ESTIMATION_REPS)
    }

    /// Estimate a one-rep max with a deployment-specific rep ceiling.
    ///
    /// The ceiling can only tighten the hard limit, never relax it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::estimate`], using `min(max_reps, MAX_ESTIMATION_REPS)`
    /// as the ceiling.
    pub fn estimate_with_limit(
        &self,
        weight: f64,
        reps: u32,
        max_reps: u32,
    ) -> Result<f64, AppError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "Weight must be a positive number, got {weight}"
            )));
        }
        if reps == 0 {
            return Err(AppError::invalid_input(
                "Reps must be at least 1".to_owned(),
            ));
        }

        let ceiling = max_reps.min(MAX_ESTIMATION_REPS);
        if reps > ceiling {
            return Err(AppError::value_out_of_range(format!(
                "Cannot estimate a one-rep max from {reps} reps with {}; maximum is {ceiling}",
                self.name()
            )));
        }

        if reps == 1 {
            return Ok(weight);
        }

        let reps_f64 = f64::from(reps);
        let estimate = match self {
            Self::Brzycki => weight / BRZYCKI_SLOPE.mul_add(-reps_f64, BRZYCKI_INTERCEPT),
            Self::Epley => weight * (1.0 + reps_f64 / EPLEY_DIVISOR),
            Self::Lombardi => weight * reps_f64.powf(LOMBARDI_EXPONENT),
        };

        Ok(estimate)
    }

    /// Get algorithm name for logging and debugging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Brzycki => "brzycki",
            Self::Epley => "epley",
            Self::Lombardi => "lombardi",
        }
    }

    /// Get the formula as a string
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::Brzycki => "W / (1.0278 - 0.0278 x R)",
            Self::Epley => "W x (1 + R / 30)",
            Self::Lombardi => "W x R^0.10",
        }
    }
}

impl FromStr for OneRepMaxAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brzycki" => Ok(Self::Brzycki),
            "epley" => Ok(Self::Epley),
            "lombardi" => Ok(Self::Lombardi),
            other => Err(AppError::invalid_input(format!(
                "Unknown one-rep-max algorithm: '{other}'. Valid options: brzycki, epley, lombardi"
            ))),
        }
    }
}
