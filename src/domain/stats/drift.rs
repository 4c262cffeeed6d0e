//! Distribution drift: PSI and Jensen-Shannon divergence over fixed bins.

use serde::{Deserialize, Serialize};

use super::{clamp_unit, SampleThresholds};

/// Shared bin edges for every drift dimension.
///
/// Finer around the 0.45-0.55 decision boundary, coarser toward the tails.
/// The same edges are used for every run so daily values stay comparable.
pub const DRIFT_EDGES: [f64; 15] = [
    0.0, 0.10, 0.20, 0.30, 0.40, 0.45, 0.475, 0.50, 0.525, 0.55, 0.60, 0.70, 0.80, 0.90, 1.0,
];

/// Lower bound applied to every bin proportion before taking logs.
pub const PROPORTION_FLOOR: f64 = 1e-6;

/// Normalized histogram of `values` over `edges`.
///
/// Bins are `[edges[i], edges[i + 1])`, the last inclusive of its upper
/// edge. Values are clamped to `[0, 1]` first. Empty input gives all zeros.
#[must_use]
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<f64> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return Vec::new();
    }

    for &raw in values {
        let v = clamp_unit(raw);
        let idx = edges.partition_point(|&edge| edge <= v).saturating_sub(1);
        counts[idx.min(bins - 1)] += 1;
    }

    let total = values.len() as f64;
    counts
        .into_iter()
        .map(|c| if total > 0.0 { c as f64 / total } else { 0.0 })
        .collect()
}

/// Population stability index of `current` against `baseline`.
#[must_use]
pub fn psi(current: &[f64], baseline: &[f64]) -> f64 {
    let actual = floored(histogram(current, &DRIFT_EDGES));
    let expected = floored(histogram(baseline, &DRIFT_EDGES));
    actual
        .iter()
        .zip(&expected)
        .map(|(a, e)| (a - e) * (a / e).ln())
        .sum()
}

/// Jensen-Shannon divergence (natural log) of `current` and `baseline`.
#[must_use]
pub fn jsd(current: &[f64], baseline: &[f64]) -> f64 {
    let p = floored(histogram(current, &DRIFT_EDGES));
    let q = floored(histogram(baseline, &DRIFT_EDGES));
    let m: Vec<f64> = p.iter().zip(&q).map(|(a, b)| 0.5 * (a + b)).collect();
    0.5 * kl(&p, &m) + 0.5 * kl(&q, &m)
}

/// PSI and JSD for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftScore {
    pub psi: f64,
    pub jsd: f64,
}

impl DriftScore {
    /// Compare a dimension's current values to its baseline.
    ///
    /// `None` when either sample is below its threshold; the dimension is
    /// then omitted rather than reported as zero drift.
    #[must_use]
    pub fn compute(current: &[f64], baseline: &[f64], thresholds: &SampleThresholds) -> Option<Self> {
        if baseline.len() < thresholds.drift_min_baseline.max(1)
            || current.len() < thresholds.drift_min_current.max(1)
        {
            return None;
        }
        Some(Self {
            psi: psi(current, baseline),
            jsd: jsd(current, baseline),
        })
    }
}

fn floored(props: Vec<f64>) -> Vec<f64> {
    props.into_iter().map(|p| p.max(PROPORTION_FLOOR)).collect()
}

fn kl(p: &[f64], q: &[f64]) -> f64 {
    p.iter().zip(q).map(|(a, b)| a * (a / b).ln()).sum()
}
