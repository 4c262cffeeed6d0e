//! Tunables for the rollup use case.

use serde::{Deserialize, Serialize};

use crate::domain::stats::SampleThresholds;
use crate::domain::Mode;

/// Which outcome wins when an offer was resolved more than once.
///
/// Only meaningful outcomes (ACCEPTED, REJECTED, EXPIRED) are considered.
/// Ties on `resolved_at` fall back to row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateOutcomePolicy {
    /// Earliest resolution.
    First,
    /// Most recent resolution.
    #[default]
    Latest,
}

/// Settings handed to [`super::RollupService`].
#[derive(Debug, Clone, PartialEq)]
pub struct RollupSettings {
    /// Modes the daily driver iterates.
    pub modes: Vec<Mode>,
    /// Length of the drift baseline window ending at the day's start.
    pub baseline_days: u32,
    pub thresholds: SampleThresholds,
    pub duplicate_outcomes: DuplicateOutcomePolicy,
}

impl Default for RollupSettings {
    fn default() -> Self {
        Self {
            modes: ["trade_finder", "trade_analyzer", "counter_offer"]
                .into_iter()
                .map(Mode::new)
                .collect(),
            baseline_days: 30,
            thresholds: SampleThresholds::default(),
            duplicate_outcomes: DuplicateOutcomePolicy::default(),
        }
    }
}
