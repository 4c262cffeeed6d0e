//! Statistical primitives for model-quality monitoring.
//!
//! Pure functions over plain slices. Every statistic with a minimum-sample
//! requirement returns `Option<f64>`: `None` means "not enough data", never
//! "no effect".

mod calibration;
mod correlation;
mod discrimination;
mod drift;
mod summary;

pub use calibration::{banded_ece, brier, calibration_bins, ece, ece_in_range, BandedEce, CalibrationBin};
pub use correlation::point_biserial;
pub use discrimination::{auc, lift_at_top_decile};
pub use drift::{histogram, jsd, psi, DriftScore, DRIFT_EDGES, PROPORTION_FLOOR};
pub use summary::{mean, percentile, MinMax};

use serde::{Deserialize, Serialize};

/// Clamp a probability-like value to `[0, 1]`; non-finite values become 0.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A labeled prediction: clamped probability and binary outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPoint {
    pub prob: f64,
    pub label: bool,
}

impl LabeledPoint {
    /// Build a point, clamping the probability.
    #[must_use]
    pub fn new(prob: f64, label: bool) -> Self {
        Self {
            prob: clamp_unit(prob),
            label,
        }
    }

    /// Label as 0.0 / 1.0.
    #[must_use]
    pub fn observed(&self) -> f64 {
        if self.label {
            1.0
        } else {
            0.0
        }
    }
}

/// Minimum sample sizes below which a statistic is reported as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleThresholds {
    /// Positives and negatives each required for AUC.
    pub auc_min_per_class: usize,
    /// Labeled rows required for point-biserial correlation.
    pub corr_min_total: usize,
    /// Rows per class required for point-biserial correlation.
    pub corr_min_per_class: usize,
    /// Baseline-window values required per drift dimension.
    pub drift_min_baseline: usize,
    /// Current-day values required per drift dimension.
    pub drift_min_current: usize,
    /// Labeled rows required for lift at top decile.
    pub lift_min_labeled: usize,
}

impl Default for SampleThresholds {
    fn default() -> Self {
        Self {
            auc_min_per_class: 30,
            corr_min_total: 30,
            corr_min_per_class: 10,
            drift_min_baseline: 200,
            drift_min_current: 50,
            lift_min_labeled: 20,
        }
    }
}
