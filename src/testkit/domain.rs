//! Builders for domain primitives used across tests.
//!
//! Concise factory functions so tests focus on assertions rather than
//! construction boilerplate. Fields are public; tweak the returned value
//! for anything the builders don't cover.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::bucket::BucketStats;
use crate::domain::{
    DriftReport, LeagueConfig, LeagueId, ModelMetricsDaily, Mode, OfferFeatures, Outcome,
    SegmentKey, TradeOfferEvent, TradeOutcomeEvent,
};

/// Calendar day; panics on an invalid date.
pub fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).expect("valid date")
}

/// `hour` o'clock UTC on `day`.
pub fn at(day: NaiveDate, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).expect("valid hour");
    Utc.from_utc_datetime(&day.and_time(time))
}

/// Offer with default features, valid narrative and no league.
pub fn offer(id: &str, mode: &str, accept_prob: f64, created_at: DateTime<Utc>) -> TradeOfferEvent {
    TradeOfferEvent {
        id: id.into(),
        mode: Mode::new(mode),
        league_id: None,
        accept_prob,
        features: OfferFeatures::default(),
        narrative_valid: true,
        driver_set_complete: true,
        confidence_score: None,
        confidence_label: None,
        created_at,
    }
}

pub fn outcome(offer_id: &str, outcome: &str, resolved_at: DateTime<Utc>) -> TradeOutcomeEvent {
    TradeOutcomeEvent {
        offer_event_id: offer_id.into(),
        outcome: Outcome::parse(outcome),
        resolved_at,
    }
}

pub fn league(id: &str, league_type: &str, superflex: bool, tep: bool, teams: u32) -> LeagueConfig {
    LeagueConfig {
        league_id: LeagueId::new(id),
        is_superflex: superflex,
        is_tep: tep,
        team_count: Some(teams),
        league_type: Some(league_type.to_string()),
        specialty_format: None,
    }
}

/// Aggregate row with zeroed statistics.
pub fn metrics_row(day: NaiveDate, mode: &str, segment: &str) -> ModelMetricsDaily {
    ModelMetricsDaily {
        day,
        mode: Mode::new(mode),
        segment_key: SegmentKey::new(segment),
        n_offers: 1,
        n_labeled: 0,
        n_accepted: 0,
        mean_pred: 0.0,
        mean_obs: 0.0,
        ece: 0.0,
        brier: 0.0,
        auc: None,
        drift: DriftReport::default(),
        cap_rates: Default::default(),
        bucket_stats: BucketStats::default(),
        narrative_fail_rate: 0.0,
    }
}

/// 100 offers at probability 0.5 on `day`, 40 accepted, 20 rejected and
/// 40 unresolved. Ids are `{prefix}{n}`.
pub fn half_accepted_day(
    day: NaiveDate,
    mode: &str,
    prefix: &str,
) -> (Vec<TradeOfferEvent>, Vec<TradeOutcomeEvent>) {
    let created = at(day, 12);
    let resolved = at(day, 18);
    let offers = (0..100)
        .map(|n| offer(&format!("{prefix}{n}"), mode, 0.5, created))
        .collect();
    let outcomes = (0..60)
        .map(|n| {
            let result = if n < 40 { "ACCEPTED" } else { "REJECTED" };
            outcome(&format!("{prefix}{n}"), result, resolved)
        })
        .collect();
    (offers, outcomes)
}
