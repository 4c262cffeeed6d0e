//! Canonical test configurations.
//!
//! Single source of truth for rollup settings used across tests.

use crate::application::rollup::{DuplicateOutcomePolicy, RollupSettings};
use crate::domain::stats::SampleThresholds;
use crate::domain::Mode;

/// Default settings restricted to the given modes.
pub fn settings(modes: &[&str]) -> RollupSettings {
    RollupSettings {
        modes: modes.iter().map(|m| Mode::new(*m)).collect(),
        ..RollupSettings::default()
    }
}

/// Settings with a chosen duplicate-outcome policy.
pub fn with_policy(modes: &[&str], policy: DuplicateOutcomePolicy) -> RollupSettings {
    RollupSettings {
        duplicate_outcomes: policy,
        ..settings(modes)
    }
}

/// Thresholds low enough that every statistic is computed on tiny fixtures.
pub fn lenient_thresholds() -> SampleThresholds {
    SampleThresholds {
        auc_min_per_class: 1,
        corr_min_total: 2,
        corr_min_per_class: 1,
        drift_min_baseline: 1,
        drift_min_current: 1,
        lift_min_labeled: 1,
    }
}
