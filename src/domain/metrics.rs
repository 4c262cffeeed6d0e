//! The daily per-segment aggregate produced by a rollup.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bucket::BucketStats;
use super::id::Mode;
use super::segment::SegmentKey;
use super::series::DriftDimension;
use super::stats::DriftScore;

/// Per-dimension PSI and JSD. Dimensions lacking enough data are absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DriftReport {
    pub psi: BTreeMap<String, f64>,
    pub jsd: BTreeMap<String, f64>,
}

impl DriftReport {
    /// Record a dimension's score.
    pub fn insert(&mut self, dim: DriftDimension, score: DriftScore) {
        self.psi.insert(dim.as_str().to_string(), score.psi);
        self.jsd.insert(dim.as_str().to_string(), score.jsd);
    }

    /// PSI for a dimension, if it was reported.
    #[must_use]
    pub fn psi_for(&self, dim: DriftDimension) -> Option<f64> {
        self.psi.get(dim.as_str()).copied()
    }

    /// JSD for a dimension, if it was reported.
    #[must_use]
    pub fn jsd_for(&self, dim: DriftDimension) -> Option<f64> {
        self.jsd.get(dim.as_str()).copied()
    }

    /// True when no dimension had enough data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.psi.is_empty()
    }
}

/// One row of `model_metrics_daily`, keyed by `(day, mode, segment_key)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetricsDaily {
    pub day: NaiveDate,
    pub mode: Mode,
    pub segment_key: SegmentKey,
    pub n_offers: u32,
    pub n_labeled: u32,
    pub n_accepted: u32,
    pub mean_pred: f64,
    pub mean_obs: f64,
    pub ece: f64,
    pub brier: f64,
    pub auc: Option<f64>,
    pub drift: DriftReport,
    /// Share of offers on which each guardrail fired.
    pub cap_rates: BTreeMap<String, f64>,
    pub bucket_stats: BucketStats,
    pub narrative_fail_rate: f64,
}
