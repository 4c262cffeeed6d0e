//! Daily model-quality rollup.
//!
//! Reads one day of scored offers for a mode, joins their outcomes and league
//! configuration, groups them by segment and writes one aggregate row per
//! segment. A 30-day baseline window is regrouped on every run for drift.

mod group;
mod labels;
mod service;
mod settings;

pub use group::{group_baseline, group_current, SegmentGroup};
pub use labels::OutcomeIndex;
pub use service::{DailyRunReport, ModeFailure, RollupService, RollupSummary};
pub use settings::{DuplicateOutcomePolicy, RollupSettings};
