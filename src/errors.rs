// ABOUTME: Unified error handling re-exported from podium-core
// ABOUTME: Single import path for AppError, ErrorCode, and DatabaseError across the crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! # Unified Error Handling System
//!
//! Error types live in `podium-core` so the pure crates and the storage layer
//! share one vocabulary. This module re-exports them under `crate::errors`.

pub use podium_core::errors::database::DatabaseError;
pub use podium_core::errors::{AppError, AppResult, ErrorCode};
