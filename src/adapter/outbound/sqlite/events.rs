//! SQLite event store.
//!
//! Reads offer events, outcomes and league configuration written by the
//! upstream scoring and resolution processes. The `record_*` methods are the
//! write side used for seeding and tests.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::database::connection::DbPool;
use super::database::model::{LeagueConfigRow, NewOutcomeEventRow, OfferEventRow, OutcomeEventRow};
use super::database::schema::{league_configs, trade_offer_events, trade_outcome_events};
use super::{format_timestamp, parse_timestamp, ID_CHUNK};
use crate::domain::{
    ConfidenceLabel, LeagueConfig, LeagueId, Mode, OfferEventId, OfferFeatures, Outcome,
    TradeOfferEvent, TradeOutcomeEvent,
};
use crate::error::{Error, Result};
use crate::port::outbound::events::{LeagueConfigReader, OfferEventReader, OutcomeEventReader};

/// SQLite-backed reader for offers, outcomes and league configs.
pub struct SqliteEventStore {
    pool: DbPool,
}

impl SqliteEventStore {
    /// Create a new event store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert or replace an offer event.
    pub fn record_offer(&self, event: &TradeOfferEvent) -> Result<()> {
        let row = Self::offer_to_row(event)?;
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        diesel::replace_into(trade_offer_events::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    /// Insert many offer events in one transaction.
    pub fn record_offers(&self, events: &[TradeOfferEvent]) -> Result<()> {
        let rows = events
            .iter()
            .map(Self::offer_to_row)
            .collect::<Result<Vec<_>>>()?;
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for row in &rows {
                diesel::replace_into(trade_offer_events::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(())
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    /// Append an outcome row.
    pub fn record_outcome(&self, event: &TradeOutcomeEvent) -> Result<()> {
        let row = NewOutcomeEventRow {
            offer_event_id: event.offer_event_id.to_string(),
            outcome: event.outcome.as_str().to_string(),
            resolved_at: format_timestamp(event.resolved_at),
        };
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        diesel::insert_into(trade_outcome_events::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    /// Insert or replace a league configuration.
    pub fn record_league(&self, config: &LeagueConfig) -> Result<()> {
        let row = LeagueConfigRow {
            league_id: config.league_id.to_string(),
            is_superflex: config.is_superflex,
            is_tep: config.is_tep,
            team_count: config.team_count.and_then(|n| i32::try_from(n).ok()),
            league_type: config.league_type.clone(),
            specialty_format: config.specialty_format.clone(),
        };
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        diesel::replace_into(league_configs::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    fn offer_to_row(event: &TradeOfferEvent) -> Result<OfferEventRow> {
        Ok(OfferEventRow {
            id: event.id.to_string(),
            mode: event.mode.to_string(),
            league_id: event.league_id.as_ref().map(ToString::to_string),
            accept_prob: event.accept_prob,
            features_json: serde_json::to_string(&event.features.to_value())?,
            narrative_valid: event.narrative_valid,
            driver_set_complete: event.driver_set_complete,
            confidence_score: event.confidence_score,
            confidence_label: event.confidence_label.map(|l| l.as_str().to_string()),
            created_at: format_timestamp(event.created_at),
        })
    }

    /// Map a stored row. A malformed features payload falls back to defaults.
    fn offer_from_row(row: OfferEventRow) -> Result<TradeOfferEvent> {
        Ok(TradeOfferEvent {
            id: OfferEventId::from(row.id),
            mode: Mode::from(row.mode),
            league_id: row.league_id.map(LeagueId::from),
            accept_prob: row.accept_prob,
            features: OfferFeatures::parse(&row.features_json),
            narrative_valid: row.narrative_valid,
            driver_set_complete: row.driver_set_complete,
            confidence_score: row.confidence_score,
            confidence_label: row.confidence_label.as_deref().and_then(ConfidenceLabel::parse),
            created_at: parse_timestamp(&row.created_at)?,
        })
    }

    fn outcome_from_row(row: OutcomeEventRow) -> Result<TradeOutcomeEvent> {
        Ok(TradeOutcomeEvent {
            offer_event_id: OfferEventId::from(row.offer_event_id),
            outcome: Outcome::parse(&row.outcome),
            resolved_at: parse_timestamp(&row.resolved_at)?,
        })
    }

    fn league_from_row(row: LeagueConfigRow) -> LeagueConfig {
        LeagueConfig {
            league_id: LeagueId::from(row.league_id),
            is_superflex: row.is_superflex,
            is_tep: row.is_tep,
            team_count: row.team_count.and_then(|n| u32::try_from(n).ok()),
            league_type: row.league_type,
            specialty_format: row.specialty_format,
        }
    }
}

impl OfferEventReader for SqliteEventStore {
    async fn list_offer_events(
        &self,
        mode: &Mode,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TradeOfferEvent>> {
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<OfferEventRow> = trade_offer_events::table
            .filter(trade_offer_events::mode.eq(mode.as_str()))
            .filter(trade_offer_events::created_at.ge(format_timestamp(from)))
            .filter(trade_offer_events::created_at.lt(format_timestamp(to)))
            .order((trade_offer_events::created_at.asc(), trade_offer_events::id.asc()))
            .select(OfferEventRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::offer_from_row).collect()
    }
}

impl OutcomeEventReader for SqliteEventStore {
    async fn list_outcomes_for_offers(
        &self,
        offer_ids: &[OfferEventId],
    ) -> Result<Vec<TradeOutcomeEvent>> {
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        let mut rows: Vec<OutcomeEventRow> = Vec::new();
        for chunk in offer_ids.chunks(ID_CHUNK) {
            let ids: Vec<&str> = chunk.iter().map(OfferEventId::as_str).collect();
            let mut batch: Vec<OutcomeEventRow> = trade_outcome_events::table
                .filter(trade_outcome_events::offer_event_id.eq_any(ids))
                .select(OutcomeEventRow::as_select())
                .load(&mut conn)
                .map_err(|e| Error::Database(e.to_string()))?;
            rows.append(&mut batch);
        }
        rows.sort_by_key(|r| r.id);

        rows.into_iter().map(Self::outcome_from_row).collect()
    }
}

impl LeagueConfigReader for SqliteEventStore {
    async fn get_league_configs(&self, league_ids: &[LeagueId]) -> Result<Vec<LeagueConfig>> {
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        let mut configs = Vec::new();
        for chunk in league_ids.chunks(ID_CHUNK) {
            let ids: Vec<&str> = chunk.iter().map(LeagueId::as_str).collect();
            let rows: Vec<LeagueConfigRow> = league_configs::table
                .filter(league_configs::league_id.eq_any(ids))
                .select(LeagueConfigRow::as_select())
                .load(&mut conn)
                .map_err(|e| Error::Database(e.to_string()))?;
            configs.extend(rows.into_iter().map(Self::league_from_row));
        }
        Ok(configs)
    }
}
