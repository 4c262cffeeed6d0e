//! Per-dimension score series used for drift comparison.

use std::fmt;

use super::event::TradeOfferEvent;

/// A score dimension tracked for drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DriftDimension {
    AcceptProb,
    Composite,
    LineupImpact,
    Vorp,
    Market,
    Behavior,
}

impl DriftDimension {
    /// Every tracked dimension, in report order.
    pub const ALL: [DriftDimension; 6] = [
        Self::AcceptProb,
        Self::Composite,
        Self::LineupImpact,
        Self::Vorp,
        Self::Market,
        Self::Behavior,
    ];

    /// Key used in the persisted drift maps.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptProb => "acceptProb",
            Self::Composite => "composite",
            Self::LineupImpact => "lineupImpact",
            Self::Vorp => "vorp",
            Self::Market => "market",
            Self::Behavior => "behavior",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    fn value(self, event: &TradeOfferEvent) -> f64 {
        let scores = &event.features.scores;
        match self {
            Self::AcceptProb => event.prob(),
            Self::Composite => event.features.composite(),
            Self::LineupImpact => scores.lineup_impact,
            Self::Vorp => scores.vorp,
            Self::Market => scores.market,
            Self::Behavior => scores.behavior,
        }
    }
}

impl fmt::Display for DriftDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score values per dimension for one segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSeries {
    values: [Vec<f64>; 6],
}

impl ScoreSeries {
    /// Append every dimension of an offer.
    pub fn push(&mut self, event: &TradeOfferEvent) {
        for dim in DriftDimension::ALL {
            self.values[dim.index()].push(dim.value(event));
        }
    }

    /// Values recorded for a dimension.
    #[must_use]
    pub fn get(&self, dim: DriftDimension) -> &[f64] {
        &self.values[dim.index()]
    }

    /// Number of offers recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values[0].len()
    }

    /// True when no offers were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::{OfferFeatures, SubScores};
    use crate::domain::id::{Mode, OfferEventId};
    use chrono::Utc;

    #[test]
    fn push_records_every_dimension() {
        let event = TradeOfferEvent {
            id: OfferEventId::generate(),
            mode: Mode::new("trade_finder"),
            league_id: None,
            accept_prob: 1.3,
            features: OfferFeatures {
                scores: SubScores {
                    lineup_impact: 0.1,
                    vorp: 0.2,
                    market: 0.3,
                    behavior: 0.4,
                },
                weights: Some([0.25; 4]),
                ..OfferFeatures::default()
            },
            narrative_valid: true,
            driver_set_complete: true,
            confidence_score: None,
            confidence_label: None,
            created_at: Utc::now(),
        };

        let mut series = ScoreSeries::default();
        series.push(&event);

        assert_eq!(series.len(), 1);
        assert_eq!(series.get(DriftDimension::AcceptProb), &[1.0]);
        assert!((series.get(DriftDimension::Composite)[0] - 0.25).abs() < 1e-12);
        assert_eq!(series.get(DriftDimension::Behavior), &[0.4]);
    }

    #[test]
    fn dimension_keys_are_camel_case() {
        let keys: Vec<&str> = DriftDimension::ALL.iter().map(DriftDimension::as_str).collect();
        assert_eq!(
            keys,
            ["acceptProb", "composite", "lineupImpact", "vorp", "market", "behavior"]
        );
    }
}
