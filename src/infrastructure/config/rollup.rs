//! Rollup configuration.

use serde::Deserialize;

use crate::application::rollup::{DuplicateOutcomePolicy, RollupSettings};
use crate::domain::stats::SampleThresholds;
use crate::domain::Mode;

/// `[rollup]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RollupConfig {
    /// Modes iterated by the daily driver.
    pub modes: Vec<String>,
    /// Days in the drift baseline window.
    pub baseline_days: u32,
    /// Minimum sample sizes per statistic.
    pub thresholds: SampleThresholds,
    /// `"latest"` or `"first"`.
    pub duplicate_outcomes: DuplicateOutcomePolicy,
}

impl Default for RollupConfig {
    fn default() -> Self {
        let settings = RollupSettings::default();
        Self {
            modes: settings.modes.iter().map(ToString::to_string).collect(),
            baseline_days: settings.baseline_days,
            thresholds: settings.thresholds,
            duplicate_outcomes: settings.duplicate_outcomes,
        }
    }
}

impl RollupConfig {
    /// Settings for the rollup service.
    #[must_use]
    pub fn to_settings(&self) -> RollupSettings {
        RollupSettings {
            modes: self.modes.iter().map(|m| Mode::new(m.trim())).collect(),
            baseline_days: self.baseline_days,
            thresholds: self.thresholds,
            duplicate_outcomes: self.duplicate_outcomes,
        }
    }
}
