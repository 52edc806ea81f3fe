// ABOUTME: Athlete management commands for podium-cli
// ABOUTME: Registers athletes and lists the registered roster
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

use podium_performance::{errors::AppResult, models::Athlete};
use tracing::info;

use crate::helpers::display::{display_athlete, display_athletes, print_json};
use crate::Context;

type Result<T> = AppResult<T>;

/// Register a new athlete
pub async fn create(context: &Context, name: String) -> Result<()> {
    let athlete = Athlete::new(name);
    context.database.athletes().create(&athlete).await?;
    info!(athlete.id = %athlete.id, "Registered athlete");

    if context.json {
        print_json(&athlete)
    } else {
        display_athlete(&athlete);
        Ok(())
    }
}

/// List registered athletes
pub async fn list(context: &Context) -> Result<()> {
    let athletes = context.database.athletes().list().await?;
    if context.json {
        print_json(&athletes)
    } else {
        display_athletes(&athletes);
        Ok(())
    }
}
