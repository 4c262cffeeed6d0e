//! Rolling calibration trend over stored daily rows.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::metrics::ModelMetricsDaily;

/// Labeled-count weighted ECE and Brier for the window ending on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub window_days: u32,
    pub n_labeled: u64,
    /// `None` when the window holds no labeled offers.
    pub ece: Option<f64>,
    pub brier: Option<f64>,
}

/// One trend point per distinct day in `rows`, each aggregating the rows of
/// the trailing `window_days` days (inclusive of the day itself).
#[must_use]
pub fn rolling_weighted(rows: &[ModelMetricsDaily], window_days: u32) -> Vec<TrendPoint> {
    let days: BTreeSet<NaiveDate> = rows.iter().map(|r| r.day).collect();
    let span = Duration::days(i64::from(window_days.max(1)));

    days.into_iter()
        .map(|day| {
            let start = day - span;
            let (mut weight, mut ece_sum, mut brier_sum) = (0u64, 0.0, 0.0);
            for row in rows.iter().filter(|r| r.day > start && r.day <= day) {
                let w = u64::from(row.n_labeled);
                weight += w;
                ece_sum += row.ece * w as f64;
                brier_sum += row.brier * w as f64;
            }
            let (ece, brier) = if weight == 0 {
                (None, None)
            } else {
                (Some(ece_sum / weight as f64), Some(brier_sum / weight as f64))
            };
            TrendPoint {
                day,
                window_days,
                n_labeled: weight,
                ece,
                brier,
            }
        })
        .collect()
}

/// First day whose rows can fall inside a `window_days` window ending on
/// `from`. Load history from here so early points see a full window.
#[must_use]
pub fn history_start(from: NaiveDate, window_days: u32) -> NaiveDate {
    from - Duration::days(i64::from(window_days.max(1)) - 1)
}

/// [`rolling_weighted`] over all of `rows`, keeping only points on or after
/// `from`. Rows before `from` still count toward the windows they fall in.
#[must_use]
pub fn rolling_weighted_since(
    rows: &[ModelMetricsDaily],
    window_days: u32,
    from: NaiveDate,
) -> Vec<TrendPoint> {
    rolling_weighted(rows, window_days)
        .into_iter()
        .filter(|point| point.day >= from)
        .collect()
}
