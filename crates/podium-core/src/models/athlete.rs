// ABOUTME: Athlete reference model owned by the surrounding account system
// ABOUTME: Carries only what the performance engine needs to validate references
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An athlete whose performance is tracked
///
/// Account management lives outside this engine; this record exists so that
/// metrics can reference a known athlete and lookups can fail with "not found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    /// Unique identifier
    pub id: Uuid,
    /// Name shown on reports
    pub display_name: String,
    /// When the athlete was registered
    pub created_at: DateTime<Utc>,
}

impl Athlete {
    /// Create a new athlete with a fresh identifier
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            created_at: Utc::now(),
        }
    }
}
