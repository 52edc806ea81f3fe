// ABOUTME: Podium CLI - command-line front end for the performance metric engine
// ABOUTME: Records athletes, assessments, workouts and manual metrics, and prints progress reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors
//!
//! Usage:
//! ```bash
//! # Register an athlete
//! podium-cli athlete create --name "Jordan Reyes"
//!
//! # Record an assessment result and derive a canonical metric from it
//! podium-cli assessment record --athlete <ID> --name "40 Yard Dash" --code forty_yard_dash \
//!     --value 4.62 --unit seconds --measurement time --date 2025-03-01
//!
//! # Log a workout set; a one-rep-max PR is stored when the estimate beats the best
//! podium-cli workout record --athlete <ID> --exercise "Bench Press" --weight 185 --reps 5
//!
//! # Add a manual metric entry
//! podium-cli metric add --athlete <ID> --type vertical_jump --value 31.5
//!
//! # History and progress for one metric type
//! podium-cli metric history --athlete <ID> --type bench_press_max --limit 20
//! podium-cli metric progress --athlete <ID> --type bench_press_max
//!
//! # Assessment progress from a JSON export of assessment results
//! podium-cli assessment progress --athlete <ID> --name "Vertical Jump" --file results.json
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use podium_performance::{
    config::{DatabaseUrl, PodiumConfig},
    database::{
        repositories::{PerformanceMetricRepository, PerformanceMetricRepositoryImpl},
        Database,
    },
    errors::{AppError, AppResult},
    logging::LoggingConfig,
    services::{MetricDerivationService, ProgressReportService},
};
use std::env;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

type Result<T> = AppResult<T>;

/// Database used when neither `--database-url` nor `DATABASE_URL` is given
const DEFAULT_CLI_DATABASE_URL: &str = "sqlite:./data/podium.db";

#[derive(Parser)]
#[command(
    name = "podium-cli",
    about = "Podium performance metric CLI",
    long_about = "Record observations, derive metrics and personal records, and report progress."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Athlete management commands
    Athlete {
        #[command(subcommand)]
        action: AthleteCommand,
    },

    /// Assessment result commands
    Assessment {
        #[command(subcommand)]
        action: AssessmentCommand,
    },

    /// Workout logging commands
    Workout {
        #[command(subcommand)]
        action: WorkoutCommand,
    },

    /// Canonical metric commands
    Metric {
        #[command(subcommand)]
        action: MetricCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AthleteCommand {
    /// Register a new athlete
    Create {
        /// Display name
        #[arg(long)]
        name: String,
    },

    /// List registered athletes
    List,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AssessmentCommand {
    /// Record an assessment result and derive a metric from it
    Record {
        /// Athlete ID
        #[arg(long)]
        athlete: String,

        /// Assessment name (e.g., "40 Yard Dash")
        #[arg(long)]
        name: String,

        /// Stable assessment code (e.g., "`forty_yard_dash`")
        #[arg(long)]
        code: Option<String>,

        /// Recorded value
        #[arg(long, allow_negative_numbers = true)]
        value: f64,

        /// Unit of the value (defaults to the metric type's unit)
        #[arg(long)]
        unit: Option<String>,

        /// What is measured: weight, time, distance, reps, score
        #[arg(long, default_value = "other")]
        measurement: String,

        /// Scoring direction: higher or lower
        #[arg(long)]
        direction: Option<String>,

        /// Test date (YYYY-MM-DD or RFC 3339, defaults to now)
        #[arg(long)]
        date: Option<String>,

        /// Mark this result as the athlete's baseline
        #[arg(long)]
        baseline: bool,

        /// Record the result without deriving a metric
        #[arg(long)]
        no_derive: bool,

        /// Result ID (generated when omitted; reuse it to resubmit)
        #[arg(long)]
        id: Option<String>,

        /// Free-text note
        #[arg(long)]
        notes: Option<String>,
    },

    /// Summarize assessment progress from a JSON file of results
    Progress {
        /// Athlete ID
        #[arg(long)]
        athlete: String,

        /// Assessment name
        #[arg(long)]
        name: String,

        /// JSON array of assessment results
        #[arg(long)]
        file: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum WorkoutCommand {
    /// Record a completed exercise and store a one-rep-max PR when it is one
    Record {
        /// Athlete ID
        #[arg(long)]
        athlete: String,

        /// Exercise name (e.g., "Barbell Bench Press")
        #[arg(long)]
        exercise: String,

        /// Stable exercise code
        #[arg(long)]
        code: Option<String>,

        /// Weight lifted
        #[arg(long)]
        weight: Option<f64>,

        /// Repetitions completed
        #[arg(long)]
        reps: Option<u32>,

        /// Workout date (YYYY-MM-DD or RFC 3339, defaults to now)
        #[arg(long)]
        date: Option<String>,

        /// Workout exercise ID (generated when omitted; reuse it to resubmit)
        #[arg(long)]
        id: Option<String>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum MetricCommand {
    /// Add a manual metric entry
    Add {
        /// Athlete ID
        #[arg(long)]
        athlete: String,

        /// Metric type (e.g., "`bench_press_max`")
        #[arg(long = "type")]
        metric_type: String,

        /// Value in the metric type's unit
        #[arg(long, allow_negative_numbers = true)]
        value: f64,

        /// Date (YYYY-MM-DD or RFC 3339, defaults to now)
        #[arg(long)]
        date: Option<String>,

        /// Free-text note
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show metric history, oldest first
    History {
        /// Athlete ID
        #[arg(long)]
        athlete: String,

        /// Metric type
        #[arg(long = "type")]
        metric_type: String,

        /// Earliest date (inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Latest date (inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Maximum number of entries
        #[arg(long)]
        limit: Option<u32>,

        /// Entries to skip
        #[arg(long)]
        offset: Option<u32>,
    },

    /// Compare the latest value with the previous one
    Progress {
        /// Athlete ID
        #[arg(long)]
        athlete: String,

        /// Metric type
        #[arg(long = "type")]
        metric_type: String,
    },

    /// List personal records across all metric types
    Records {
        /// Athlete ID
        #[arg(long)]
        athlete: String,
    },
}

/// Shared handles for command implementations
pub struct Context {
    /// Open database
    pub database: Database,
    /// Derivation service over the database
    pub derivation: MetricDerivationService,
    /// Report service over the database
    pub reports: ProgressReportService,
    /// Print JSON instead of text
    pub json: bool,
}

async fn ensure_parent_directory(url: &DatabaseUrl) -> Result<()> {
    if let DatabaseUrl::SQLite { path } = url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::internal(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose)
        .init()
        .map_err(|e| AppError::internal(e.to_string()))?;

    let mut config = PodiumConfig::from_env()?;
    let database_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_CLI_DATABASE_URL.to_owned());
    config.database.url = DatabaseUrl::parse_url(&database_url)?;
    config.database.auto_migrate = true;
    config.log_summary();

    ensure_parent_directory(&config.database.url).await?;
    info!(database.url = %config.database.url, "Opening database");
    let database = Database::from_config(&config.database).await?;

    let repository: Arc<dyn PerformanceMetricRepository> =
        Arc::new(PerformanceMetricRepositoryImpl::new(database.clone()));
    let context = Context {
        derivation: MetricDerivationService::new(Arc::clone(&repository), config.derivation),
        reports: ProgressReportService::new(repository),
        database,
        json: cli.json,
    };

    match cli.command {
        Command::Athlete { action } => match action {
            AthleteCommand::Create { name } => commands::athlete::create(&context, name).await?,
            AthleteCommand::List => commands::athlete::list(&context).await?,
        },
        Command::Assessment { action } => match action {
            AssessmentCommand::Record {
                athlete,
                name,
                code,
                value,
                unit,
                measurement,
                direction,
                date,
                baseline,
                no_derive,
                id,
                notes,
            } => {
                let request = commands::assessment::RecordRequest {
                    athlete,
                    name,
                    code,
                    value,
                    unit,
                    measurement,
                    direction,
                    date,
                    baseline,
                    derive: !no_derive,
                    id,
                    notes,
                };
                commands::assessment::record(&context, request).await?;
            }
            AssessmentCommand::Progress {
                athlete,
                name,
                file,
            } => commands::assessment::progress(&context, &athlete, &name, &file).await?,
        },
        Command::Workout { action } => match action {
            WorkoutCommand::Record {
                athlete,
                exercise,
                code,
                weight,
                reps,
                date,
                id,
            } => {
                let request = commands::workout::RecordRequest {
                    athlete,
                    exercise,
                    code,
                    weight,
                    reps,
                    date,
                    id,
                };
                commands::workout::record(&context, request).await?;
            }
        },
        Command::Metric { action } => match action {
            MetricCommand::Add {
                athlete,
                metric_type,
                value,
                date,
                notes,
            } => {
                commands::metric::add(&context, &athlete, &metric_type, value, date, notes)
                    .await?;
            }
            MetricCommand::History {
                athlete,
                metric_type,
                from,
                to,
                limit,
                offset,
            } => {
                let range = commands::metric::HistoryRange {
                    from,
                    to,
                    limit,
                    offset,
                };
                commands::metric::history(&context, &athlete, &metric_type, range).await?;
            }
            MetricCommand::Progress {
                athlete,
                metric_type,
            } => commands::metric::progress(&context, &athlete, &metric_type).await?,
            MetricCommand::Records { athlete } => {
                commands::metric::records(&context, &athlete).await?;
            }
        },
    }

    Ok(())
}
