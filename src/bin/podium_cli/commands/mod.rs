// ABOUTME: Re-exports command modules for podium-cli
// ABOUTME: Provides access to athlete, assessment, workout, and metric commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

pub mod assessment;
pub mod athlete;
pub mod metric;
pub mod workout;
