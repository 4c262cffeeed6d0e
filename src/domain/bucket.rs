//! Reliability and distribution diagnostics for one segment-day.
//!
//! Assembles the `bucketStatsJson` block from labeled rows, composite scores,
//! weight vectors and confidence ratings using the primitives in
//! [`crate::domain::stats`].

use serde::{Deserialize, Serialize};

use super::event::ConfidenceLabel;
use super::features::{SubScores, COMPONENTS};
use super::stats::{
    banded_ece, calibration_bins, lift_at_top_decile, mean, percentile, point_biserial,
    BandedEce, CalibrationBin, LabeledPoint, MinMax, SampleThresholds,
};

/// Bins in the reliability curve.
pub const RELIABILITY_BINS: usize = 10;

/// Mean and nearest-rank percentiles of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub mean: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl ScoreDistribution {
    #[must_use]
    pub fn from_scores(scores: &[f64]) -> Self {
        Self {
            mean: mean(scores),
            p10: percentile(scores, 0.10),
            p50: percentile(scores, 0.50),
            p90: percentile(scores, 0.90),
        }
    }
}

/// Mean/min/max of one weight component.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl From<&MinMax> for ComponentStats {
    fn from(acc: &MinMax) -> Self {
        Self {
            mean: acc.mean(),
            min: acc.min(),
            max: acc.max(),
        }
    }
}

/// Weight-vector statistics over offers with a valid vector.
///
/// Offers whose vector was missing or malformed are excluded; with no valid
/// vectors every component is zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightStats {
    pub lineup_impact: ComponentStats,
    pub vorp: ComponentStats,
    pub market: ComponentStats,
    pub behavior: ComponentStats,
    pub valid_vectors: usize,
}

impl WeightStats {
    pub fn from_vectors<'a, I>(vectors: I) -> Self
    where
        I: IntoIterator<Item = &'a Option<[f64; COMPONENTS]>>,
    {
        let mut acc = [MinMax::default(); COMPONENTS];
        let mut valid = 0;
        for weights in vectors.into_iter().flatten() {
            valid += 1;
            for (slot, w) in acc.iter_mut().zip(weights) {
                slot.push(*w);
            }
        }
        Self {
            lineup_impact: ComponentStats::from(&acc[0]),
            vorp: ComponentStats::from(&acc[1]),
            market: ComponentStats::from(&acc[2]),
            behavior: ComponentStats::from(&acc[3]),
            valid_vectors: valid,
        }
    }
}

/// Point-biserial correlation of each sub-score with acceptance.
///
/// Insufficient samples are persisted as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationBlock {
    pub lineup_impact: f64,
    pub vorp: f64,
    pub market: f64,
    pub behavior: f64,
}

impl CorrelationBlock {
    /// Correlate the sub-scores of labeled offers with their labels.
    #[must_use]
    pub fn compute(labeled: &[(SubScores, bool)], thresholds: &SampleThresholds) -> Self {
        let corr = |pick: fn(&SubScores) -> f64| {
            let pairs: Vec<(f64, bool)> = labeled.iter().map(|(s, l)| (pick(s), *l)).collect();
            point_biserial(
                &pairs,
                thresholds.corr_min_total,
                thresholds.corr_min_per_class,
            )
            .unwrap_or(0.0)
        };
        Self {
            lineup_impact: corr(|s| s.lineup_impact),
            vorp: corr(|s| s.vorp),
            market: corr(|s| s.market),
            behavior: corr(|s| s.behavior),
        }
    }
}

/// Signed over/under-prediction for the segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptDrift {
    pub mean_pred: f64,
    pub mean_obs: f64,
    /// `mean_obs - mean_pred`
    pub delta: f64,
}

impl InterceptDrift {
    #[must_use]
    pub fn new(mean_pred: f64, mean_obs: f64) -> Self {
        Self {
            mean_pred,
            mean_obs,
            delta: mean_obs - mean_pred,
        }
    }
}

/// Confidence score mean and label shares.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceCoverage {
    pub mean_score: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl ConfidenceCoverage {
    /// Shares are over offers that carry a label; all zero when none do.
    #[must_use]
    pub fn compute(scores: &[f64], labels: &[ConfidenceLabel]) -> Self {
        let total = labels.len() as f64;
        let share = |target: ConfidenceLabel| {
            if labels.is_empty() {
                0.0
            } else {
                labels.iter().filter(|l| **l == target).count() as f64 / total
            }
        };
        Self {
            mean_score: mean(scores),
            high: share(ConfidenceLabel::High),
            medium: share(ConfidenceLabel::Medium),
            low: share(ConfidenceLabel::Low),
        }
    }
}

/// Everything persisted in `bucketStatsJson`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStats {
    pub reliability: Vec<CalibrationBin>,
    pub banded_ece: BandedEce,
    pub score_distribution: ScoreDistribution,
    pub weight_stats: WeightStats,
    pub correlations: CorrelationBlock,
    pub intercept_drift: InterceptDrift,
    pub confidence_coverage: ConfidenceCoverage,
    pub lift_top_decile: Option<f64>,
}

/// Inputs for [`BucketStats::build`], borrowed from a segment group.
#[derive(Debug, Clone, Copy)]
pub struct BucketInputs<'a> {
    pub labeled: &'a [LabeledPoint],
    pub composite_scores: &'a [f64],
    pub weight_vectors: &'a [Option<[f64; COMPONENTS]>],
    pub correlations: CorrelationBlock,
    pub mean_pred: f64,
    pub mean_obs: f64,
    pub confidence_scores: &'a [f64],
    pub confidence_labels: &'a [ConfidenceLabel],
}

impl BucketStats {
    #[must_use]
    pub fn build(inputs: BucketInputs<'_>, thresholds: &SampleThresholds) -> Self {
        Self {
            reliability: calibration_bins(inputs.labeled, RELIABILITY_BINS),
            banded_ece: banded_ece(inputs.labeled),
            score_distribution: ScoreDistribution::from_scores(inputs.composite_scores),
            weight_stats: WeightStats::from_vectors(inputs.weight_vectors),
            correlations: inputs.correlations,
            intercept_drift: InterceptDrift::new(inputs.mean_pred, inputs.mean_obs),
            confidence_coverage: ConfidenceCoverage::compute(
                inputs.confidence_scores,
                inputs.confidence_labels,
            ),
            lift_top_decile: lift_at_top_decile(inputs.labeled, thresholds.lift_min_labeled),
        }
    }
}
