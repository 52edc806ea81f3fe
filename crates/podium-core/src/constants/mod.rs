// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Formula coefficients, analysis windows, limits, and units for the performance engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list.

/// Unit strings attached to canonical metrics
pub mod units;

/// One-rep-max estimation coefficients
pub mod one_rep_max {
    /// Brzycki intercept term
    pub const BRZYCKI_INTERCEPT: f64 = 1.0278;
    /// Brzycki per-rep slope term
    pub const BRZYCKI_SLOPE: f64 = 0.0278;
    /// Epley per-rep divisor (`W * (1 + R / 30)`)
    pub const EPLEY_DIVISOR: f64 = 30.0;
    /// Lombardi exponent (`W * R^0.10`)
    pub const LOMBARDI_EXPONENT: f64 = 0.10;
    /// Highest rep count any formula will estimate from.
    ///
    /// At 36 reps the Brzycki denominator is 0.0270 (a 37x multiplier) and it
    /// turns negative past 37.
    pub const MAX_ESTIMATION_REPS: u32 = 35;
}

/// Progress analysis parameters
pub mod analysis {
    /// Number of trailing entries inspected by the trend classifier
    pub const TREND_WINDOW: usize = 3;
    /// Multiplier converting a ratio to a percentage
    pub const PERCENT: f64 = 100.0;
}

/// Query limits
pub mod limits {
    /// Default page size for metric history queries
    pub const DEFAULT_HISTORY_LIMIT: u32 = 100;
    /// Hard ceiling for metric history page size
    pub const MAX_HISTORY_LIMIT: u32 = 1_000;
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Library and CLI service name
    pub const PODIUM_PERFORMANCE: &str = "podium-performance";
}
