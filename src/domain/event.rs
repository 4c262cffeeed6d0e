//! Offer and outcome events consumed by the rollup.
//!
//! Both event kinds are immutable snapshots written by upstream systems; the
//! rollup only reads them.

use std::fmt;

use chrono::{DateTime, Utc};

use super::features::OfferFeatures;
use super::id::{LeagueId, Mode, OfferEventId};
use super::stats::clamp_unit;

/// Confidence rating attached to an offer by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl ConfidenceLabel {
    /// Parse a stored label, case-insensitively. Unknown labels yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    /// Canonical upper-case spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved fate of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    Rejected,
    Expired,
    /// Any other resolution value; ignored for labeling.
    Other(String),
}

impl Outcome {
    /// Parse a stored outcome value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACCEPTED" => Self::Accepted,
            "REJECTED" => Self::Rejected,
            "EXPIRED" => Self::Expired,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Binary label: accepted is positive, rejected/expired negative,
    /// anything else is not a label at all.
    #[must_use]
    pub fn label(&self) -> Option<bool> {
        match self {
            Self::Accepted => Some(true),
            Self::Rejected | Self::Expired => Some(false),
            Self::Other(_) => None,
        }
    }

    /// Stored spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot taken when a trade offer was scored.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOfferEvent {
    pub id: OfferEventId,
    pub mode: Mode,
    pub league_id: Option<LeagueId>,
    /// Raw predicted probability; read through [`TradeOfferEvent::prob`].
    pub accept_prob: f64,
    pub features: OfferFeatures,
    pub narrative_valid: bool,
    pub driver_set_complete: bool,
    pub confidence_score: Option<f64>,
    pub confidence_label: Option<ConfidenceLabel>,
    pub created_at: DateTime<Utc>,
}

impl TradeOfferEvent {
    /// Predicted acceptance probability clamped to `[0, 1]`.
    #[must_use]
    pub fn prob(&self) -> f64 {
        clamp_unit(self.accept_prob)
    }

    /// True when the explanation output failed validation.
    #[must_use]
    pub fn narrative_failed(&self) -> bool {
        !self.narrative_valid || !self.driver_set_complete
    }
}

/// Resolution recorded for an offer, possibly long after it was scored.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcomeEvent {
    pub offer_event_id: OfferEventId,
    pub outcome: Outcome,
    pub resolved_at: DateTime<Utc>,
}
