//! In-memory gateway for tests and dry runs.
//!
//! Implements every read and write port over `parking_lot` locks. A
//! [`FailPoint`] can be armed to make one call site fail, which lets tests
//! check that a failed fetch leaves the aggregate table untouched.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};

use crate::domain::{
    LeagueConfig, LeagueId, ModelMetricsDaily, Mode, OfferEventId, SegmentKey, TradeOfferEvent,
    TradeOutcomeEvent,
};
use crate::error::{Error, Result};
use crate::port::outbound::events::{LeagueConfigReader, OfferEventReader, OutcomeEventReader};
use crate::port::outbound::metrics::{DailyMetricsReader, DailyMetricsWriter, MetricsQuery};

/// Call site that an armed gateway fails at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Offers,
    Outcomes,
    Leagues,
    Upsert,
}

type MetricsKey = (NaiveDate, Mode, SegmentKey);

/// Gateway holding events and aggregates in process memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    offers: RwLock<Vec<TradeOfferEvent>>,
    outcomes: RwLock<Vec<TradeOutcomeEvent>>,
    leagues: RwLock<HashMap<LeagueId, LeagueConfig>>,
    metrics: RwLock<BTreeMap<MetricsKey, ModelMetricsDaily>>,
    fail_on: RwLock<Option<FailPoint>>,
    upsert_calls: Mutex<usize>,
    league_requests: Mutex<Vec<Vec<LeagueId>>>,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_offer(&self, event: TradeOfferEvent) {
        self.offers.write().push(event);
    }

    pub fn insert_offers(&self, events: impl IntoIterator<Item = TradeOfferEvent>) {
        self.offers.write().extend(events);
    }

    pub fn insert_outcome(&self, event: TradeOutcomeEvent) {
        self.outcomes.write().push(event);
    }

    pub fn insert_outcomes(&self, events: impl IntoIterator<Item = TradeOutcomeEvent>) {
        self.outcomes.write().extend(events);
    }

    /// Insert or replace a league's configuration.
    pub fn insert_league(&self, config: LeagueConfig) {
        self.leagues.write().insert(config.league_id.clone(), config);
    }

    /// Make every subsequent call at `point` fail with a connection error.
    pub fn fail_on(&self, point: FailPoint) {
        *self.fail_on.write() = Some(point);
    }

    pub fn clear_failure(&self) {
        *self.fail_on.write() = None;
    }

    /// Stored aggregate rows ordered by key.
    #[must_use]
    pub fn metrics(&self) -> Vec<ModelMetricsDaily> {
        self.metrics.read().values().cloned().collect()
    }

    /// Number of successful upsert batches.
    #[must_use]
    pub fn upsert_calls(&self) -> usize {
        *self.upsert_calls.lock()
    }

    /// League ids requested by each `get_league_configs` call.
    #[must_use]
    pub fn league_requests(&self) -> Vec<Vec<LeagueId>> {
        self.league_requests.lock().clone()
    }

    fn check(&self, point: FailPoint) -> Result<()> {
        if *self.fail_on.read() == Some(point) {
            return Err(Error::Connection(format!("injected failure at {point:?}")));
        }
        Ok(())
    }
}

impl OfferEventReader for MemoryGateway {
    async fn list_offer_events(
        &self,
        mode: &Mode,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TradeOfferEvent>> {
        self.check(FailPoint::Offers)?;
        let mut events: Vec<TradeOfferEvent> = self
            .offers
            .read()
            .iter()
            .filter(|e| e.mode == *mode && e.created_at >= from && e.created_at < to)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(events)
    }
}

impl OutcomeEventReader for MemoryGateway {
    async fn list_outcomes_for_offers(
        &self,
        offer_ids: &[OfferEventId],
    ) -> Result<Vec<TradeOutcomeEvent>> {
        self.check(FailPoint::Outcomes)?;
        Ok(self
            .outcomes
            .read()
            .iter()
            .filter(|o| offer_ids.contains(&o.offer_event_id))
            .cloned()
            .collect())
    }
}

impl LeagueConfigReader for MemoryGateway {
    async fn get_league_configs(&self, league_ids: &[LeagueId]) -> Result<Vec<LeagueConfig>> {
        self.league_requests.lock().push(league_ids.to_vec());
        self.check(FailPoint::Leagues)?;
        let leagues = self.leagues.read();
        Ok(league_ids
            .iter()
            .filter_map(|id| leagues.get(id).cloned())
            .collect())
    }
}

impl DailyMetricsWriter for MemoryGateway {
    async fn upsert_daily_metrics(&self, rows: &[ModelMetricsDaily]) -> Result<()> {
        self.check(FailPoint::Upsert)?;
        let mut metrics = self.metrics.write();
        for row in rows {
            let key = (row.day, row.mode.clone(), row.segment_key.clone());
            metrics.insert(key, row.clone());
        }
        *self.upsert_calls.lock() += 1;
        Ok(())
    }

    async fn replace_daily_metrics(
        &self,
        day: NaiveDate,
        mode: &Mode,
        rows: &[ModelMetricsDaily],
    ) -> Result<()> {
        self.check(FailPoint::Upsert)?;
        let mut metrics = self.metrics.write();
        metrics.retain(|(d, m, segment), _| {
            *d != day || m != mode || rows.iter().any(|r| r.segment_key == *segment)
        });
        for row in rows {
            let key = (row.day, row.mode.clone(), row.segment_key.clone());
            metrics.insert(key, row.clone());
        }
        *self.upsert_calls.lock() += 1;
        Ok(())
    }
}

impl DailyMetricsReader for MemoryGateway {
    async fn list_daily_metrics(&self, query: &MetricsQuery) -> Result<Vec<ModelMetricsDaily>> {
        Ok(self
            .metrics
            .read()
            .values()
            .filter(|row| query.matches(row))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{at, day, metrics_row};

    #[tokio::test]
    async fn upsert_replaces_rows_with_same_key() {
        let gateway = MemoryGateway::new();
        let mut row = metrics_row(day(2026, 5, 1), "trade_finder", "UNK_1QB_NONTEP_SZUNK_H0_2");
        gateway.upsert_daily_metrics(&[row.clone()]).await.unwrap();
        row.n_offers = 42;
        gateway.upsert_daily_metrics(&[row]).await.unwrap();

        let rows = gateway.metrics();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].n_offers, 42);
        assert_eq!(gateway.upsert_calls(), 2);
    }

    #[tokio::test]
    async fn replace_drops_segments_missing_from_batch() {
        let gateway = MemoryGateway::new();
        let d = day(2026, 5, 1);
        gateway
            .upsert_daily_metrics(&[
                metrics_row(d, "trade_finder", "A"),
                metrics_row(d, "trade_finder", "B"),
                metrics_row(d, "counter_offer", "A"),
                metrics_row(day(2026, 5, 2), "trade_finder", "A"),
            ])
            .await
            .unwrap();

        let replacement = [metrics_row(d, "trade_finder", "C")];
        gateway
            .replace_daily_metrics(d, &Mode::new("trade_finder"), &replacement)
            .await
            .unwrap();

        let keys: Vec<(NaiveDate, String, String)> = gateway
            .metrics()
            .iter()
            .map(|r| (r.day, r.mode.to_string(), r.segment_key.to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (d, "counter_offer".to_string(), "A".to_string()),
                (d, "trade_finder".to_string(), "C".to_string()),
                (day(2026, 5, 2), "trade_finder".to_string(), "A".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn query_filters_by_mode_and_segment() {
        let gateway = MemoryGateway::new();
        let d = day(2026, 5, 1);
        let rows = vec![
            metrics_row(d, "trade_finder", "A"),
            metrics_row(d, "trade_finder", "B"),
            metrics_row(d, "counter_offer", "A"),
            metrics_row(day(2026, 5, 9), "trade_finder", "A"),
        ];
        gateway.upsert_daily_metrics(&rows).await.unwrap();

        let mut query = MetricsQuery::between(d, day(2026, 5, 2));
        assert_eq!(gateway.list_daily_metrics(&query).await.unwrap().len(), 3);

        query.mode = Some(Mode::new("trade_finder"));
        query.segment = Some(SegmentKey::new("A"));
        let found = gateway.list_daily_metrics(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].segment_key.as_str(), "A");
    }

    #[tokio::test]
    async fn armed_failure_is_cleared() {
        let gateway = MemoryGateway::new();
        gateway.fail_on(FailPoint::Offers);
        let mode = Mode::new("trade_finder");
        let (from, to) = (at(day(2026, 5, 1), 0), at(day(2026, 5, 2), 0));
        assert!(gateway.list_offer_events(&mode, from, to).await.is_err());
        gateway.clear_failure();
        assert!(gateway.list_offer_events(&mode, from, to).await.is_ok());
    }
}
