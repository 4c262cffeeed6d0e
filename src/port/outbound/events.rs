//! Read ports for offer events, outcomes and league configuration.
//!
//! Every call is a fallible I/O boundary. The rollup does not retry; a
//! failure aborts the whole (day, mode) run.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::{
    LeagueConfig, LeagueId, Mode, OfferEventId, TradeOfferEvent, TradeOutcomeEvent,
};
use crate::error::Result;

/// Reads scored offer events.
pub trait OfferEventReader: Send + Sync {
    /// Offers for `mode` with `from <= created_at < to`.
    fn list_offer_events(
        &self,
        mode: &Mode,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<TradeOfferEvent>>> + Send;
}

/// Reads resolved outcomes.
pub trait OutcomeEventReader: Send + Sync {
    /// All outcome rows referencing any of `offer_ids`, in insertion order.
    fn list_outcomes_for_offers(
        &self,
        offer_ids: &[OfferEventId],
    ) -> impl Future<Output = Result<Vec<TradeOutcomeEvent>>> + Send;
}

/// Reads league configuration.
pub trait LeagueConfigReader: Send + Sync {
    /// Configs for the given leagues. Unknown ids are simply absent.
    fn get_league_configs(
        &self,
        league_ids: &[LeagueId],
    ) -> impl Future<Output = Result<Vec<LeagueConfig>>> + Send;
}

/// Everything the rollup reads, in one bound.
pub trait EventSource: OfferEventReader + OutcomeEventReader + LeagueConfigReader {}

impl<T> EventSource for T where T: OfferEventReader + OutcomeEventReader + LeagueConfigReader {}
