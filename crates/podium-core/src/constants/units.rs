// ABOUTME: Unit strings attached to canonical performance metrics
// ABOUTME: Used as the fallback unit when an observation does not supply one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

/// Pounds (strength maxes, body weight)
pub const POUNDS: &str = "lbs";

/// Seconds (sprints, agility drills)
pub const SECONDS: &str = "seconds";

/// Inches (vertical and broad jump)
pub const INCHES: &str = "inches";

/// Repetitions (bodyweight rep maxes)
pub const REPS: &str = "reps";
