//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; `OFFERLENS_DATABASE` overrides the
//! database path.
//!
//! # Example
//!
//! ```no_run
//! use offerlens::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("offerlens.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::rollup::RollupConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Path to SQLite database file.
    ///
    /// Defaults to "offerlens.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Rollup tunables.
    #[serde(default)]
    pub rollup: RollupConfig,
}

fn default_database_path() -> String {
    "offerlens.db".to_string()
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(path) = std::env::var("OFFERLENS_DATABASE") {
            if !path.trim().is_empty() {
                config.database = path;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        let rollup = &self.rollup;
        if rollup.modes.is_empty() || rollup.modes.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "modes",
                reason: "must list at least one non-empty mode".to_string(),
            }
            .into());
        }
        if rollup.baseline_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "baseline_days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let t = &rollup.thresholds;
        let thresholds = [
            ("auc_min_per_class", t.auc_min_per_class),
            ("corr_min_total", t.corr_min_total),
            ("corr_min_per_class", t.corr_min_per_class),
            ("drift_min_baseline", t.drift_min_baseline),
            ("drift_min_current", t.drift_min_current),
            ("lift_min_labeled", t.lift_min_labeled),
        ];
        for (field, value) in thresholds {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
