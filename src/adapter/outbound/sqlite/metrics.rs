//! SQLite store for the `model_metrics_daily` aggregate.

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use tracing::debug;

use super::database::connection::DbPool;
use super::database::model::MetricsDailyRow;
use super::database::schema::model_metrics_daily;
use super::format_timestamp;
use crate::domain::{ModelMetricsDaily, Mode, SegmentKey};
use crate::error::{Error, Result};
use crate::port::outbound::metrics::{DailyMetricsReader, DailyMetricsWriter, MetricsQuery};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed daily aggregate store.
pub struct SqliteMetricsStore {
    pool: DbPool,
}

impl SqliteMetricsStore {
    /// Create a new metrics store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(metrics: &ModelMetricsDaily, computed_at: &str) -> Result<MetricsDailyRow> {
        Ok(MetricsDailyRow {
            day: metrics.day.format(DAY_FORMAT).to_string(),
            mode: metrics.mode.to_string(),
            segment_key: metrics.segment_key.to_string(),
            n_offers: to_i32(metrics.n_offers),
            n_labeled: to_i32(metrics.n_labeled),
            n_accepted: to_i32(metrics.n_accepted),
            mean_pred: metrics.mean_pred,
            mean_obs: metrics.mean_obs,
            ece: metrics.ece,
            brier: metrics.brier,
            auc: metrics.auc,
            psi_json: serde_json::to_string(&metrics.drift)?,
            cap_rate_json: serde_json::to_string(&metrics.cap_rates)?,
            bucket_stats_json: serde_json::to_string(&metrics.bucket_stats)?,
            narrative_fail_rate: metrics.narrative_fail_rate,
            computed_at: computed_at.to_string(),
        })
    }

    fn from_row(row: MetricsDailyRow) -> Result<ModelMetricsDaily> {
        let day = NaiveDate::parse_from_str(&row.day, DAY_FORMAT)
            .map_err(|e| Error::Parse(format!("invalid day {:?}: {e}", row.day)))?;
        Ok(ModelMetricsDaily {
            day,
            mode: Mode::from(row.mode),
            segment_key: SegmentKey::new(row.segment_key),
            n_offers: to_u32(row.n_offers),
            n_labeled: to_u32(row.n_labeled),
            n_accepted: to_u32(row.n_accepted),
            mean_pred: row.mean_pred,
            mean_obs: row.mean_obs,
            ece: row.ece,
            brier: row.brier,
            auc: row.auc,
            drift: serde_json::from_str(&row.psi_json)?,
            cap_rates: serde_json::from_str(&row.cap_rate_json)?,
            bucket_stats: serde_json::from_str(&row.bucket_stats_json)?,
            narrative_fail_rate: row.narrative_fail_rate,
        })
    }
}

fn to_i32(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

fn to_u32(n: i32) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

impl DailyMetricsWriter for SqliteMetricsStore {
    async fn upsert_daily_metrics(&self, rows: &[ModelMetricsDaily]) -> Result<()> {
        let computed_at = format_timestamp(Utc::now());
        let rows = rows
            .iter()
            .map(|m| Self::to_row(m, &computed_at))
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for row in &rows {
                diesel::replace_into(model_metrics_daily::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(())
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn replace_daily_metrics(
        &self,
        day: NaiveDate,
        mode: &Mode,
        rows: &[ModelMetricsDaily],
    ) -> Result<()> {
        let computed_at = format_timestamp(Utc::now());
        let rows = rows
            .iter()
            .map(|m| Self::to_row(m, &computed_at))
            .collect::<Result<Vec<_>>>()?;
        let day = day.format(DAY_FORMAT).to_string();
        let mode = mode.to_string();
        let keep: Vec<&str> = rows.iter().map(|r| r.segment_key.as_str()).collect();

        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let stale = diesel::delete(
                model_metrics_daily::table
                    .filter(model_metrics_daily::day.eq(&day))
                    .filter(model_metrics_daily::mode.eq(&mode))
                    .filter(model_metrics_daily::segment_key.ne_all(keep)),
            )
            .execute(conn)?;
            if stale > 0 {
                debug!(day = %day, mode = %mode, stale, "Removed stale segment rows");
            }
            for row in &rows {
                diesel::replace_into(model_metrics_daily::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(())
        })
        .map_err(|e| Error::Database(e.to_string()))
    }
}

impl DailyMetricsReader for SqliteMetricsStore {
    async fn list_daily_metrics(&self, query: &MetricsQuery) -> Result<Vec<ModelMetricsDaily>> {
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        let mut select = model_metrics_daily::table
            .select(MetricsDailyRow::as_select())
            .filter(model_metrics_daily::day.ge(query.from.format(DAY_FORMAT).to_string()))
            .filter(model_metrics_daily::day.le(query.to.format(DAY_FORMAT).to_string()))
            .into_boxed();
        if let Some(mode) = &query.mode {
            select = select.filter(model_metrics_daily::mode.eq(mode.to_string()));
        }
        if let Some(segment) = &query.segment {
            select = select.filter(model_metrics_daily::segment_key.eq(segment.to_string()));
        }

        let rows: Vec<MetricsDailyRow> = select
            .order((
                model_metrics_daily::day.asc(),
                model_metrics_daily::mode.asc(),
                model_metrics_daily::segment_key.asc(),
            ))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
