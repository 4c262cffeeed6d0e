//! Command-line interface definitions.
//!
//! Defines the CLI structure for offerlens using `clap`: rollups for a day,
//! the daily driver, backfills over a range, and reading stored metrics.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Daily model-quality rollups for trade-offer acceptance predictions
#[derive(Parser, Debug)]
#[command(name = "offerlens")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file [default: offerlens.toml if present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database file (overrides config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Roll up one day (all configured modes unless --mode is given)
    Rollup(RollupArgs),

    /// Roll up yesterday (UTC) for every configured mode
    Daily,

    /// Roll up every day in an inclusive range
    Backfill(BackfillArgs),

    /// Show stored daily metrics and rolling calibration trend
    Metrics(MetricsArgs),
}

/// Arguments for `offerlens rollup`.
#[derive(Parser, Debug)]
pub struct RollupArgs {
    /// Day to roll up (YYYY-MM-DD, UTC)
    #[arg(long)]
    pub day: NaiveDate,

    /// Mode to roll up; repeatable
    #[arg(long = "mode")]
    pub modes: Vec<String>,
}

/// Arguments for `offerlens backfill`.
#[derive(Parser, Debug)]
pub struct BackfillArgs {
    /// First day (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: NaiveDate,

    /// Mode to roll up; repeatable
    #[arg(long = "mode")]
    pub modes: Vec<String>,
}

/// Arguments for `offerlens metrics`.
#[derive(Parser, Debug)]
pub struct MetricsArgs {
    /// First day (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: NaiveDate,

    /// Restrict to one mode
    #[arg(long)]
    pub mode: Option<String>,

    /// Restrict to one segment key
    #[arg(long)]
    pub segment: Option<String>,
}
