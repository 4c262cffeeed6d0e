//! Calibration metrics: Brier score, ECE and reliability bins.

use serde::{Deserialize, Serialize};

use super::LabeledPoint;

/// Mean squared error between probability and label. 0 when empty.
#[must_use]
pub fn brier(points: &[LabeledPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points
        .iter()
        .map(|p| (p.prob - p.observed()).powi(2))
        .sum();
    sum / points.len() as f64
}

/// One bin of a reliability table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationBin {
    pub bucket: usize,
    pub n: usize,
    pub mean_pred: f64,
    pub mean_obs: f64,
}

/// Equal-width bins over `[0, 1]`, the last bin inclusive of 1.0.
///
/// Every bin is returned, empty ones with zero means.
#[must_use]
pub fn calibration_bins(points: &[LabeledPoint], bins: usize) -> Vec<CalibrationBin> {
    bin_range(points, 0.0, 1.0, bins, true)
}

/// Expected calibration error over `bins` equal-width bins of `[0, 1]`.
///
/// Sum over bins of population share times `|mean predicted - mean observed|`.
#[must_use]
pub fn ece(points: &[LabeledPoint], bins: usize) -> f64 {
    weighted_gap(&calibration_bins(points, bins), points.len())
}

/// ECE restricted to predictions in `[lo, hi)`.
///
/// Shares are relative to the points inside the range. `None` when no
/// prediction falls in the range.
#[must_use]
pub fn ece_in_range(points: &[LabeledPoint], lo: f64, hi: f64, bins: usize) -> Option<f64> {
    let table = bin_range(points, lo, hi, bins, false);
    let total: usize = table.iter().map(|b| b.n).sum();
    if total == 0 {
        return None;
    }
    Some(weighted_gap(&table, total))
}

/// ECE in the decision-relevant probability bands.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BandedEce {
    /// `[0.40, 0.60)`
    pub mid: Option<f64>,
    /// `[0.60, 0.80)`
    pub high: Option<f64>,
    /// `[0.20, 0.40)`
    pub low: Option<f64>,
}

/// Compute [`BandedEce`] with four bins per band.
#[must_use]
pub fn banded_ece(points: &[LabeledPoint]) -> BandedEce {
    BandedEce {
        mid: ece_in_range(points, 0.40, 0.60, 4),
        high: ece_in_range(points, 0.60, 0.80, 4),
        low: ece_in_range(points, 0.20, 0.40, 4),
    }
}

fn weighted_gap(table: &[CalibrationBin], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    table
        .iter()
        .filter(|b| b.n > 0)
        .map(|b| (b.n as f64 / n) * (b.mean_pred - b.mean_obs).abs())
        .sum()
}

fn bin_range(
    points: &[LabeledPoint],
    lo: f64,
    hi: f64,
    bins: usize,
    inclusive_hi: bool,
) -> Vec<CalibrationBin> {
    if bins == 0 || hi <= lo {
        return Vec::new();
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    let mut pred_sums = vec![0.0f64; bins];
    let mut obs_sums = vec![0.0f64; bins];

    for point in points {
        let p = point.prob;
        let in_range = p >= lo && (p < hi || (inclusive_hi && p <= hi));
        if !in_range {
            continue;
        }
        let idx = (((p - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
        pred_sums[idx] += p;
        obs_sums[idx] += point.observed();
    }

    (0..bins)
        .map(|bucket| {
            let n = counts[bucket];
            let (mean_pred, mean_obs) = if n == 0 {
                (0.0, 0.0)
            } else {
                (pred_sums[bucket] / n as f64, obs_sums[bucket] / n as f64)
            };
            CalibrationBin {
                bucket,
                n,
                mean_pred,
                mean_obs,
            }
        })
        .collect()
}
