// ABOUTME: Algorithm abstraction layer enabling pluggable estimation formulas
// ABOUTME: Provides enum-based dispatch for one-rep-max estimation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Algorithm Selection Module
//!
//! Estimation formulas are enums rather than strings or booleans, so the
//! selected variant is type-checked and dispatch costs nothing.
//!
//! # Example
//!
//! ```rust
//! use podium_intelligence::algorithms::OneRepMaxAlgorithm;
//!
//! let estimate = OneRepMaxAlgorithm::Brzycki.estimate(185.0, 5).unwrap();
//! assert!((estimate - 208.1).abs() < 0.1);
//! ```

pub mod one_rep_max;

pub use one_rep_max::OneRepMaxAlgorithm;
