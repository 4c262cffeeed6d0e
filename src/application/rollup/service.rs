//! Rollup orchestration.
//!
//! # Flow
//!
//! ```text
//! offers(day) ──┬─▶ outcomes ─▶ OutcomeIndex ─┐
//!               │                             ├─▶ SegmentGroup per key ─▶ rows ─▶ replace
//! offers(base) ─┴─▶ league configs ───────────┘         ▲
//!               └────────────▶ baseline ScoreSeries ─────┘
//! ```
//!
//! Every read happens before any row is computed, and all rows for a run are
//! written in one batch, so a failed fetch never leaves partial segments.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use super::group::{group_baseline, group_current};
use super::labels::OutcomeIndex;
use super::settings::RollupSettings;
use crate::domain::{DriftDimension, LeagueConfig, LeagueId, ModelMetricsDaily, Mode, OfferEventId};
use crate::error::{Error, Result};
use crate::port::outbound::events::EventSource;
use crate::port::outbound::metrics::DailyMetricsWriter;

/// Outcome of a single `(day, mode)` rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupSummary {
    pub day: NaiveDate,
    pub mode: Mode,
    pub offers: usize,
    pub labeled: usize,
    /// Rows written; zero when the day had no offers.
    pub segments: usize,
}

/// A mode whose daily rollup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeFailure {
    pub mode: Mode,
    pub error: String,
}

/// Result of the daily driver across every configured mode.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DailyRunReport {
    pub completed: Vec<RollupSummary>,
    pub failed: Vec<ModeFailure>,
}

impl DailyRunReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Computes and persists daily per-segment model-quality rows.
pub struct RollupService<E, W> {
    events: Arc<E>,
    sink: Arc<W>,
    settings: RollupSettings,
}

impl<E, W> RollupService<E, W>
where
    E: EventSource,
    W: DailyMetricsWriter,
{
    pub fn new(events: Arc<E>, sink: Arc<W>, settings: RollupSettings) -> Self {
        Self {
            events,
            sink,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &RollupSettings {
        &self.settings
    }

    /// Compute the rows for `(day, mode)` without writing them.
    ///
    /// Returns an empty list when the day has no offers.
    pub async fn compute(&self, day: NaiveDate, mode: &Mode) -> Result<Vec<ModelMetricsDaily>> {
        let day_start = day.and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Duration::days(1);
        let baseline_start = day_start - Duration::days(i64::from(self.settings.baseline_days));

        let offers = self.events.list_offer_events(mode, day_start, day_end).await?;
        if offers.is_empty() {
            info!(day = %day, mode = %mode, "No offers for day, nothing to roll up");
            return Ok(Vec::new());
        }

        let offer_ids: Vec<OfferEventId> = offers.iter().map(|o| o.id.clone()).collect();
        let outcome_rows = self.events.list_outcomes_for_offers(&offer_ids).await?;
        let outcomes = OutcomeIndex::build(outcome_rows, self.settings.duplicate_outcomes);

        let baseline_offers = self
            .events
            .list_offer_events(mode, baseline_start, day_start)
            .await?;

        let league_ids: Vec<LeagueId> = offers
            .iter()
            .chain(baseline_offers.iter())
            .filter_map(|o| o.league_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let leagues: HashMap<LeagueId, LeagueConfig> = if league_ids.is_empty() {
            HashMap::new()
        } else {
            self.events
                .get_league_configs(&league_ids)
                .await?
                .into_iter()
                .map(|c| (c.league_id.clone(), c))
                .collect()
        };

        debug!(
            day = %day,
            mode = %mode,
            offers = offers.len(),
            outcomes = outcomes.len(),
            baseline_offers = baseline_offers.len(),
            leagues = leagues.len(),
            "Fetched rollup inputs"
        );

        let groups = group_current(&offers, &leagues, |o| outcomes.label(&o.id));
        let baseline = group_baseline(&baseline_offers, &leagues);

        let rows: Vec<ModelMetricsDaily> = groups
            .into_iter()
            .map(|(key, group)| {
                let base = baseline.get(&key);
                debug!(
                    segment = %key,
                    n_offers = group.n_offers(),
                    n_labeled = group.n_labeled(),
                    baseline = base.map_or(0, |s| s.len()),
                    "Summarizing segment"
                );
                let row = group.summarize(day, mode, key, base, &self.settings.thresholds);
                if row.drift.psi.len() < DriftDimension::ALL.len() {
                    debug!(
                        segment = %row.segment_key,
                        reported = row.drift.psi.len(),
                        "Drift dimensions omitted for insufficient sample"
                    );
                }
                row
            })
            .collect();

        Ok(rows)
    }

    /// Roll up one `(day, mode)` and store the resulting rows.
    ///
    /// Idempotent: the stored rows for `(day, mode)` become exactly the
    /// segments of this run, so a segment that no longer receives offers is
    /// removed.
    pub async fn rollup(&self, day: NaiveDate, mode: &Mode) -> Result<RollupSummary> {
        info!(day = %day, mode = %mode, "Starting rollup");

        let rows = self.compute(day, mode).await?;
        let summary = RollupSummary {
            day,
            mode: mode.clone(),
            offers: rows.iter().map(|r| r.n_offers as usize).sum(),
            labeled: rows.iter().map(|r| r.n_labeled as usize).sum(),
            segments: rows.len(),
        };

        if !rows.is_empty() {
            self.sink.replace_daily_metrics(day, mode, &rows).await?;
            info!(
                day = %day,
                mode = %mode,
                segments = summary.segments,
                offers = summary.offers,
                labeled = summary.labeled,
                "Upserted daily metrics"
            );
        }

        Ok(summary)
    }

    /// Roll up yesterday (relative to `now`, UTC) for every configured mode.
    ///
    /// A failing mode is logged and reported; the remaining modes still run.
    pub async fn run_daily(&self, now: DateTime<Utc>) -> DailyRunReport {
        let day = (now - Duration::hours(24)).date_naive();
        let mut report = DailyRunReport::default();

        for mode in &self.settings.modes {
            match self.rollup(day, mode).await {
                Ok(summary) => report.completed.push(summary),
                Err(e) => {
                    error!(day = %day, mode = %mode, error = %e, "Rollup failed");
                    report.failed.push(ModeFailure {
                        mode: mode.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            day = %day,
            completed = report.completed.len(),
            failed = report.failed.len(),
            "Daily rollup finished"
        );
        report
    }

    /// Roll up every day in `from..=to` for each of `modes`, sequentially.
    ///
    /// Stops at the first failure.
    pub async fn backfill(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        modes: &[Mode],
    ) -> Result<Vec<RollupSummary>> {
        if from > to {
            return Err(Error::InvalidDay(format!("{from} is after {to}")));
        }

        let mut summaries = Vec::new();
        for day in from.iter_days().take_while(|d| *d <= to) {
            for mode in modes {
                summaries.push(self.rollup(day, mode).await?);
            }
        }

        info!(from = %from, to = %to, runs = summaries.len(), "Backfill finished");
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::{FailPoint, MemoryGateway};
    use crate::testkit::domain::{at, day, league, offer, outcome};

    fn service(gateway: &Arc<MemoryGateway>) -> RollupService<MemoryGateway, MemoryGateway> {
        RollupService::new(gateway.clone(), gateway.clone(), RollupSettings::default())
    }

    #[tokio::test]
    async fn no_offers_writes_nothing() {
        let gateway = Arc::new(MemoryGateway::new());
        let summary = service(&gateway)
            .rollup(day(2026, 5, 2), &Mode::new("trade_finder"))
            .await
            .unwrap();
        assert_eq!(summary.segments, 0);
        assert_eq!(gateway.upsert_calls(), 0);
        assert!(gateway.metrics().is_empty());
    }

    #[tokio::test]
    async fn offers_outside_window_are_ignored() {
        let gateway = Arc::new(MemoryGateway::new());
        let d = day(2026, 5, 2);
        gateway.insert_offer(offer("in", "trade_finder", 0.4, at(d, 23)));
        gateway.insert_offer(offer("next", "trade_finder", 0.4, at(day(2026, 5, 3), 0)));
        gateway.insert_offer(offer("other", "counter_offer", 0.4, at(d, 12)));

        let summary = service(&gateway).rollup(d, &Mode::new("trade_finder")).await.unwrap();
        assert_eq!(summary.offers, 1);
        assert_eq!(gateway.metrics()[0].n_offers, 1);
    }

    #[tokio::test]
    async fn league_fetch_failure_aborts_without_writes() {
        let gateway = Arc::new(MemoryGateway::new());
        let d = day(2026, 5, 2);
        let mut o = offer("a", "trade_finder", 0.5, at(d, 9));
        o.league_id = Some("L1".into());
        gateway.insert_offer(o);
        gateway.insert_league(league("L1", "dynasty", true, false, 12));
        gateway.fail_on(FailPoint::Leagues);

        let result = service(&gateway).rollup(d, &Mode::new("trade_finder")).await;
        assert!(matches!(result, Err(Error::Connection(_))));
        assert_eq!(gateway.upsert_calls(), 0);
        assert!(gateway.metrics().is_empty());
    }

    #[tokio::test]
    async fn baseline_league_is_resolved_per_event() {
        let gateway = Arc::new(MemoryGateway::new());
        let d = day(2026, 5, 2);
        let mut today = offer("t", "trade_finder", 0.5, at(d, 9));
        today.league_id = Some("L1".into());
        let mut earlier = offer("b", "trade_finder", 0.5, at(day(2026, 4, 20), 9));
        earlier.league_id = Some("L2".into());
        gateway.insert_offer(today);
        gateway.insert_offer(earlier);
        gateway.insert_league(league("L1", "dynasty", true, false, 12));
        gateway.insert_league(league("L2", "redraft", false, false, 10));

        let rows = service(&gateway).compute(d, &Mode::new("trade_finder")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].segment_key.as_str(), "DYN_SF_NONTEP_SZ12_H0_2");
        assert!(gateway.league_requests().iter().any(|ids| ids.len() == 2));
    }

    #[tokio::test]
    async fn outcomes_label_offers() {
        let gateway = Arc::new(MemoryGateway::new());
        let d = day(2026, 5, 2);
        gateway.insert_offer(offer("a", "trade_finder", 0.8, at(d, 1)));
        gateway.insert_offer(offer("b", "trade_finder", 0.2, at(d, 2)));
        gateway.insert_offer(offer("c", "trade_finder", 0.2, at(d, 3)));
        gateway.insert_outcome(outcome("a", "ACCEPTED", at(d, 5)));
        gateway.insert_outcome(outcome("b", "EXPIRED", at(d, 5)));
        gateway.insert_outcome(outcome("c", "COUNTERED", at(d, 5)));

        service(&gateway).rollup(d, &Mode::new("trade_finder")).await.unwrap();
        let row = &gateway.metrics()[0];
        assert_eq!(row.n_offers, 3);
        assert_eq!(row.n_labeled, 2);
        assert_eq!(row.n_accepted, 1);
        assert!((row.mean_pred - 0.5).abs() < 1e-12);
        assert!((row.mean_obs - 0.5).abs() < 1e-12);
    }

    #[tokio::test]
    async fn run_daily_targets_yesterday_for_each_mode() {
        let gateway = Arc::new(MemoryGateway::new());
        let yesterday = day(2026, 5, 1);
        gateway.insert_offer(offer("a", "trade_finder", 0.5, at(yesterday, 10)));
        gateway.insert_offer(offer("b", "counter_offer", 0.5, at(yesterday, 10)));

        let report = service(&gateway).run_daily(at(day(2026, 5, 2), 3)).await;
        assert!(report.is_success());
        assert_eq!(report.completed.len(), 3);
        assert!(report.completed.iter().all(|s| s.day == yesterday));
        assert_eq!(gateway.metrics().len(), 2);
    }

    #[tokio::test]
    async fn run_daily_reports_failed_modes() {
        let gateway = Arc::new(MemoryGateway::new());
        gateway.fail_on(FailPoint::Offers);
        let report = service(&gateway).run_daily(at(day(2026, 5, 2), 3)).await;
        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 3);
        assert!(report.completed.is_empty());
    }

    #[tokio::test]
    async fn backfill_rejects_inverted_range() {
        let gateway = Arc::new(MemoryGateway::new());
        let result = service(&gateway)
            .backfill(day(2026, 5, 3), day(2026, 5, 1), &[Mode::new("trade_finder")])
            .await;
        assert!(matches!(result, Err(Error::InvalidDay(_))));
    }

    #[tokio::test]
    async fn backfill_runs_each_day_and_mode() {
        let gateway = Arc::new(MemoryGateway::new());
        for (i, d) in [day(2026, 5, 1), day(2026, 5, 2), day(2026, 5, 3)].into_iter().enumerate() {
            gateway.insert_offer(offer(&format!("o{i}"), "trade_finder", 0.5, at(d, 8)));
        }
        let modes = [Mode::new("trade_finder"), Mode::new("trade_analyzer")];
        let summaries = service(&gateway)
            .backfill(day(2026, 5, 1), day(2026, 5, 3), &modes)
            .await
            .unwrap();
        assert_eq!(summaries.len(), 6);
        assert_eq!(gateway.metrics().len(), 3);
    }
}
