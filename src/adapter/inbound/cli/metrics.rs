//! `offerlens metrics`: stored rows and rolling calibration trend.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::MetricsArgs;
use super::output;
use crate::domain::trend::{history_start, rolling_weighted_since, TrendPoint};
use crate::domain::{ModelMetricsDaily, Mode, SegmentKey};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::persistence::build_persistence;
use crate::port::outbound::metrics::{DailyMetricsReader, MetricsQuery};

const WEEK_DAYS: u32 = 7;
const MONTH_DAYS: u32 = 30;

#[derive(Tabled)]
struct MetricsRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Segment")]
    segment: String,
    #[tabled(rename = "Offers")]
    offers: u32,
    #[tabled(rename = "Labeled")]
    labeled: u32,
    #[tabled(rename = "ECE")]
    ece: String,
    #[tabled(rename = "Brier")]
    brier: String,
    #[tabled(rename = "AUC")]
    auc: String,
    #[tabled(rename = "Narr. fail")]
    narrative_fail: String,
}

impl From<&ModelMetricsDaily> for MetricsRow {
    fn from(row: &ModelMetricsDaily) -> Self {
        Self {
            day: row.day.to_string(),
            mode: row.mode.to_string(),
            segment: row.segment_key.to_string(),
            offers: row.n_offers,
            labeled: row.n_labeled,
            ece: format!("{:.3}", row.ece),
            brier: format!("{:.3}", row.brier),
            auc: output::optional(row.auc),
            narrative_fail: output::percent(row.narrative_fail_rate),
        }
    }
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Labeled (7d)")]
    labeled_7d: u64,
    #[tabled(rename = "ECE 7d")]
    ece_7d: String,
    #[tabled(rename = "Brier 7d")]
    brier_7d: String,
    #[tabled(rename = "ECE 30d")]
    ece_30d: String,
    #[tabled(rename = "Brier 30d")]
    brier_30d: String,
}

fn trend_rows(week: &[TrendPoint], month: &[TrendPoint]) -> Vec<TrendRow> {
    week.iter()
        .zip(month)
        .map(|(w, m)| TrendRow {
            day: w.day.to_string(),
            labeled_7d: w.n_labeled,
            ece_7d: output::optional(w.ece),
            brier_7d: output::optional(w.brier),
            ece_30d: output::optional(m.ece),
            brier_30d: output::optional(m.brier),
        })
        .collect()
}

/// Print stored rows for the requested range and filters.
pub async fn execute_metrics(config: &Config, args: &MetricsArgs) -> Result<()> {
    let persistence = build_persistence(&config.database)?;
    let query = MetricsQuery {
        from: history_start(args.from, MONTH_DAYS),
        to: args.to,
        mode: args.mode.as_deref().map(Mode::new),
        segment: args.segment.as_deref().map(SegmentKey::new),
    };
    let history = persistence.metrics.list_daily_metrics(&query).await?;

    let week = rolling_weighted_since(&history, WEEK_DAYS, args.from);
    let month = rolling_weighted_since(&history, MONTH_DAYS, args.from);
    let rows: Vec<ModelMetricsDaily> =
        history.into_iter().filter(|r| r.day >= args.from).collect();

    if output::is_json() {
        output::json_output(json!({
            "command": "metrics",
            "rows": rows,
            "trend": { "7d": week, "30d": month },
        }));
        return Ok(());
    }

    if rows.is_empty() {
        output::warning("No stored metrics match the query");
        return Ok(());
    }

    output::section("Daily metrics");
    let table_rows: Vec<MetricsRow> = rows.iter().map(MetricsRow::from).collect();
    output::table(Table::new(table_rows));

    output::section("Calibration trend (weighted by labeled offers)");
    output::table(Table::new(trend_rows(&week, &month)));
    output::field("Rows", rows.len());
    Ok(())
}
