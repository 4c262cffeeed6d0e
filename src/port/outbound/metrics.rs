//! Write and read ports for the `model_metrics_daily` aggregate.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{ModelMetricsDaily, Mode, SegmentKey};
use crate::error::Result;

/// Writes daily aggregate rows.
pub trait DailyMetricsWriter: Send + Sync {
    /// Upsert rows matched on `(day, mode, segment_key)`: create if absent,
    /// otherwise replace in place. The batch is applied atomically.
    fn upsert_daily_metrics(
        &self,
        rows: &[ModelMetricsDaily],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Make `rows` the complete set stored for `(day, mode)`.
    ///
    /// Upserts every row and deletes rows of that day and mode whose segment
    /// key is absent from `rows`, in one transaction. Rows for other days or
    /// modes are untouched.
    fn replace_daily_metrics(
        &self,
        day: NaiveDate,
        mode: &Mode,
        rows: &[ModelMetricsDaily],
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Filter for reading stored aggregate rows.
#[derive(Debug, Clone)]
pub struct MetricsQuery {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
    pub mode: Option<Mode>,
    pub segment: Option<SegmentKey>,
}

impl MetricsQuery {
    /// Query every mode and segment between two days.
    #[must_use]
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            mode: None,
            segment: None,
        }
    }

    /// True when `row` satisfies the filter.
    #[must_use]
    pub fn matches(&self, row: &ModelMetricsDaily) -> bool {
        row.day >= self.from
            && row.day <= self.to
            && self.mode.as_ref().map_or(true, |m| *m == row.mode)
            && self.segment.as_ref().map_or(true, |s| *s == row.segment_key)
    }
}

/// Reads stored aggregate rows for downstream reporting.
pub trait DailyMetricsReader: Send + Sync {
    /// Rows matching `query`, ordered by `(day, mode, segment_key)`.
    fn list_daily_metrics(
        &self,
        query: &MetricsQuery,
    ) -> impl Future<Output = Result<Vec<ModelMetricsDaily>>> + Send;
}
