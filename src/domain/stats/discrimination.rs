//! Discrimination metrics: rank-based AUC and lift at the top decile.

use super::LabeledPoint;

/// Rank-based (Mann-Whitney) AUC.
///
/// Requires at least `min_per_class` positives and negatives. Each positive
/// wins against every negative scored strictly below it and ties with every
/// negative scored equal to it; ties count half.
#[must_use]
pub fn auc(points: &[LabeledPoint], min_per_class: usize) -> Option<f64> {
    let (mut pos, mut neg): (Vec<f64>, Vec<f64>) = (Vec::new(), Vec::new());
    for point in points {
        if point.label {
            pos.push(point.prob);
        } else {
            neg.push(point.prob);
        }
    }

    let required = min_per_class.max(1);
    if pos.len() < required || neg.len() < required {
        return None;
    }

    pos.sort_by(f64::total_cmp);
    neg.sort_by(f64::total_cmp);

    let mut wins = 0.0;
    let mut ties = 0.0;
    for &p in &pos {
        let below = neg.partition_point(|&n| n < p);
        let at_or_below = neg.partition_point(|&n| n <= p);
        wins += below as f64;
        ties += (at_or_below - below) as f64;
    }

    Some((wins + 0.5 * ties) / (pos.len() as f64 * neg.len() as f64))
}

/// Observed acceptance rate of the top 10% of predictions (rounded up)
/// divided by the overall acceptance rate.
///
/// `None` below `min_labeled` rows or when nothing was accepted.
#[must_use]
pub fn lift_at_top_decile(points: &[LabeledPoint], min_labeled: usize) -> Option<f64> {
    if points.is_empty() || points.len() < min_labeled {
        return None;
    }

    let n = points.len();
    let positives = points.iter().filter(|p| p.label).count();
    let overall = positives as f64 / n as f64;
    if overall == 0.0 {
        return None;
    }

    let mut ranked: Vec<&LabeledPoint> = points.iter().collect();
    ranked.sort_by(|a, b| b.prob.total_cmp(&a.prob));

    let top_n = n.div_ceil(10);
    let top_positives = ranked.iter().take(top_n).filter(|p| p.label).count();
    let top_rate = top_positives as f64 / top_n as f64;

    Some(top_rate / overall)
}
