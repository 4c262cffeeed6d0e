//! CLI module graph.

pub mod command;
pub mod metrics;
pub mod output;
pub mod rollup;

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::{Cli, Commands};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "offerlens.toml";

/// Load configuration for a CLI invocation.
///
/// An explicit `--config` must exist. Without one, `offerlens.toml` is used
/// when present and built-in defaults otherwise. `--db` overrides the
/// configured database path.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG)?,
        None => Config::parse_toml("")?,
    };
    if let Some(db) = &cli.db {
        config.database = db.to_string_lossy().into_owned();
    }
    Ok(config)
}

/// Run the parsed command.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    debug!(command = ?cli.command, database = %config.database, "Executing command");
    match &cli.command {
        Commands::Rollup(args) => rollup::execute_rollup(config, args).await,
        Commands::Daily => rollup::execute_daily(config).await,
        Commands::Backfill(args) => rollup::execute_backfill(config, args).await,
        Commands::Metrics(args) => metrics::execute_metrics(config, args).await,
    }
}
