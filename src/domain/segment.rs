//! Segment resolution.
//!
//! Every offer is bucketed into a coarse categorical segment of the form
//! `{class}_{format}_{tep}_{size}_{history}`. The key is computed from each
//! event's own league context at lookup time, so a league that changes
//! format mid-window is bucketed per event.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::TradeOfferEvent;
use super::league::{LeagueClass, LeagueConfig};

/// Stable categorical segment key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentKey(String);

impl SegmentKey {
    /// Wrap an already-formatted key (e.g. one read back from storage).
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inputs to the segment key, independent of where they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentContext {
    pub class: LeagueClass,
    pub superflex: bool,
    pub tep: bool,
    pub team_count: Option<u32>,
    pub opponent_trade_samples: u32,
}

impl SegmentContext {
    /// Build the context for an offer.
    ///
    /// With a league config, its flags, team count and class are used.
    /// Without one, the offer's own segment parts are used and the class
    /// stays unknown. History always comes from the offer.
    #[must_use]
    pub fn for_offer(event: &TradeOfferEvent, league: Option<&LeagueConfig>) -> Self {
        let parts = &event.features.segment_parts;
        match league {
            Some(config) => Self {
                class: config.class(),
                superflex: config.is_superflex,
                tep: config.is_tep,
                team_count: config.team_count,
                opponent_trade_samples: parts.opponent_trade_samples,
            },
            None => Self {
                class: LeagueClass::Unknown,
                superflex: parts.is_superflex,
                tep: parts.is_tep,
                team_count: parts.league_size,
                opponent_trade_samples: parts.opponent_trade_samples,
            },
        }
    }

    /// Format the segment key.
    #[must_use]
    pub fn key(&self) -> SegmentKey {
        SegmentKey(format!(
            "{}_{}_{}_{}_{}",
            self.class.as_str(),
            format_bucket(self.superflex),
            tep_bucket(self.tep),
            size_bucket(self.team_count),
            history_bucket(self.opponent_trade_samples),
        ))
    }
}

/// Resolve an offer's segment key.
#[must_use]
pub fn resolve_segment(event: &TradeOfferEvent, league: Option<&LeagueConfig>) -> SegmentKey {
    SegmentContext::for_offer(event, league).key()
}

fn format_bucket(superflex: bool) -> &'static str {
    if superflex {
        "SF"
    } else {
        "1QB"
    }
}

fn tep_bucket(tep: bool) -> &'static str {
    if tep {
        "TEP"
    } else {
        "NONTEP"
    }
}

fn size_bucket(team_count: Option<u32>) -> String {
    match team_count {
        Some(n) if n >= 14 => "SZ14P".to_string(),
        Some(12) => "SZ12".to_string(),
        Some(10) => "SZ10".to_string(),
        Some(n) if n > 0 => format!("SZ{n}"),
        _ => "SZUNK".to_string(),
    }
}

fn history_bucket(samples: u32) -> &'static str {
    if samples >= 10 {
        "H10P"
    } else if samples >= 3 {
        "H3_9"
    } else {
        "H0_2"
    }
}
