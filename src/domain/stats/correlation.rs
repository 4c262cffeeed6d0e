//! Point-biserial correlation between a continuous score and a binary outcome.

/// Point-biserial correlation of `(value, label)` pairs.
///
/// `((mean1 - mean0) / sd) * sqrt(p * q)` where `sd` is the sample standard
/// deviation (n - 1) of all values and `p`, `q` are the class proportions.
/// `None` below `min_total` rows or `min_per_class` rows in either class;
/// `Some(0.0)` when every value is identical.
#[must_use]
pub fn point_biserial(
    pairs: &[(f64, bool)],
    min_total: usize,
    min_per_class: usize,
) -> Option<f64> {
    let n = pairs.len();
    let n1 = pairs.iter().filter(|(_, label)| *label).count();
    let n0 = n - n1;
    if n < min_total.max(2) || n1 < min_per_class.max(1) || n0 < min_per_class.max(1) {
        return None;
    }

    let nf = n as f64;
    let mean_all = pairs.iter().map(|(v, _)| v).sum::<f64>() / nf;
    let variance = pairs
        .iter()
        .map(|(v, _)| (v - mean_all).powi(2))
        .sum::<f64>()
        / (nf - 1.0);
    let sd = variance.sqrt();
    if !sd.is_finite() || sd == 0.0 {
        return Some(0.0);
    }

    let mean1 = pairs
        .iter()
        .filter(|(_, label)| *label)
        .map(|(v, _)| v)
        .sum::<f64>()
        / n1 as f64;
    let mean0 = pairs
        .iter()
        .filter(|(_, label)| !*label)
        .map(|(v, _)| v)
        .sum::<f64>()
        / n0 as f64;

    let p = n1 as f64 / nf;
    let q = n0 as f64 / nf;
    Some(((mean1 - mean0) / sd) * (p * q).sqrt())
}
