//! Rollup, daily and backfill command handlers.

use chrono::Utc;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{BackfillArgs, RollupArgs};
use super::output;
use crate::application::rollup::{ModeFailure, RollupSummary};
use crate::domain::Mode;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::persistence::build_persistence;
use crate::infrastructure::factory::rollup::{build_rollup_service, SqliteRollupService};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Offers")]
    offers: usize,
    #[tabled(rename = "Labeled")]
    labeled: usize,
    #[tabled(rename = "Segments")]
    segments: usize,
}

impl From<&RollupSummary> for SummaryRow {
    fn from(summary: &RollupSummary) -> Self {
        Self {
            day: summary.day.to_string(),
            mode: summary.mode.to_string(),
            offers: summary.offers,
            labeled: summary.labeled,
            segments: summary.segments,
        }
    }
}

fn service(config: &Config) -> Result<SqliteRollupService> {
    let persistence = build_persistence(&config.database)?;
    Ok(build_rollup_service(config, &persistence))
}

/// Modes named on the command line, or every configured mode.
fn selected_modes(requested: &[String], service: &SqliteRollupService) -> Vec<Mode> {
    if requested.is_empty() {
        service.settings().modes.clone()
    } else {
        requested.iter().map(|m| Mode::new(m.trim())).collect()
    }
}

fn print_summaries(command: &str, summaries: &[RollupSummary], failures: &[ModeFailure]) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "completed": summaries,
            "failed": failures,
        }));
        return;
    }

    output::section("Rollups");
    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
    output::table(Table::new(rows));
    for failure in failures {
        output::error(&format!("{}: {}", failure.mode, failure.error));
    }
    if failures.is_empty() {
        let written: usize = summaries.iter().map(|s| s.segments).sum();
        output::success(&format!("{written} segment rows written"));
    }
}

/// `offerlens rollup --day D [--mode M]...`
pub async fn execute_rollup(config: &Config, args: &RollupArgs) -> Result<()> {
    let service = service(config)?;
    let modes = selected_modes(&args.modes, &service);
    let summaries = service.backfill(args.day, args.day, &modes).await?;
    print_summaries("rollup", &summaries, &[]);
    Ok(())
}

/// `offerlens daily`: yesterday for every configured mode.
pub async fn execute_daily(config: &Config) -> Result<()> {
    let service = service(config)?;
    let report = service.run_daily(Utc::now()).await;
    print_summaries("daily", &report.completed, &report.failed);
    if report.is_success() {
        Ok(())
    } else {
        Err(Error::Rollup(format!(
            "{} of {} modes failed",
            report.failed.len(),
            report.failed.len() + report.completed.len()
        )))
    }
}

/// `offerlens backfill --from D --to D [--mode M]...`
pub async fn execute_backfill(config: &Config, args: &BackfillArgs) -> Result<()> {
    let service = service(config)?;
    let modes = selected_modes(&args.modes, &service);
    let summaries = service.backfill(args.from, args.to, &modes).await?;
    print_summaries("backfill", &summaries, &[]);
    Ok(())
}
