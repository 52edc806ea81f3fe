// ABOUTME: Re-exports helper modules for podium-cli
// ABOUTME: Provides argument parsing and display formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

pub mod display;
pub mod input;
