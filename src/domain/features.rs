//! Typed view of an offer's free-form feature payload.
//!
//! The scoring engine writes `featuresJson` as an untyped document. It is
//! parsed exactly once, here, into [`OfferFeatures`]; every field is
//! defaulted and validated so the statistics code never touches raw JSON.

use serde_json::{json, Value};

use super::stats::clamp_unit;

/// Blend weights substituted when an offer's weight vector is missing or
/// malformed. Order matches [`SubScores::as_array`].
pub const DEFAULT_WEIGHTS: [f64; 4] = [0.35, 0.30, 0.20, 0.15];

/// Number of sub-scores / weight components.
pub const COMPONENTS: usize = 4;

/// The four model sub-scores, each clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubScores {
    pub lineup_impact: f64,
    pub vorp: f64,
    pub market: f64,
    pub behavior: f64,
}

impl SubScores {
    /// Sub-scores in weight-vector order.
    #[must_use]
    pub fn as_array(&self) -> [f64; COMPONENTS] {
        [self.lineup_impact, self.vorp, self.market, self.behavior]
    }

    /// Weighted blend of the sub-scores, clamped to `[0, 1]`.
    #[must_use]
    pub fn composite(&self, weights: &[f64; COMPONENTS]) -> f64 {
        let blended: f64 = self
            .as_array()
            .iter()
            .zip(weights.iter())
            .map(|(s, w)| s * w)
            .sum();
        clamp_unit(blended)
    }
}

/// Segment context captured by the scoring engine at offer time.
///
/// Used as a fallback when no league configuration is available, and always
/// as the source of the opponent trade-history sample size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentParts {
    pub is_superflex: bool,
    pub is_tep: bool,
    pub league_size: Option<u32>,
    pub opponent_trade_samples: u32,
}

/// Validated feature payload of a single offer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OfferFeatures {
    pub scores: SubScores,
    /// `None` when the payload's weight vector is missing or malformed.
    pub weights: Option<[f64; COMPONENTS]>,
    pub segment_parts: SegmentParts,
    /// Guardrail identifiers that fired while producing the offer.
    pub caps_applied: Vec<String>,
}

impl OfferFeatures {
    /// Parse a raw payload string. Unparseable text yields all defaults.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::default(),
        }
    }

    /// Extract features from an already-decoded JSON document.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let scores = SubScores {
            lineup_impact: score_field(value, "lineupImpact"),
            vorp: score_field(value, "vorp"),
            market: score_field(value, "market"),
            behavior: score_field(value, "behavior"),
        };

        let weights = value.get("weights").and_then(parse_weights);

        let segment_parts = value
            .get("segmentParts")
            .map(parse_segment_parts)
            .unwrap_or_default();

        let caps_applied = value
            .get("capsApplied")
            .and_then(Value::as_array)
            .map(|caps| {
                caps.iter()
                    .filter_map(Value::as_str)
                    .filter(|cap| !cap.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            scores,
            weights,
            segment_parts,
            caps_applied,
        }
    }

    /// Weights used for blending: the payload's vector, or [`DEFAULT_WEIGHTS`].
    #[must_use]
    pub fn effective_weights(&self) -> [f64; COMPONENTS] {
        self.weights.unwrap_or(DEFAULT_WEIGHTS)
    }

    /// Composite score under the effective weights.
    #[must_use]
    pub fn composite(&self) -> f64 {
        self.scores.composite(&self.effective_weights())
    }

    /// Render back to the stored payload shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let parts = &self.segment_parts;
        let mut value = json!({
            "lineupImpact": self.scores.lineup_impact,
            "vorp": self.scores.vorp,
            "market": self.scores.market,
            "behavior": self.scores.behavior,
            "segmentParts": {
                "isSuperflex": parts.is_superflex,
                "isTep": parts.is_tep,
                "leagueSize": parts.league_size,
                "opponentTradeSamples": parts.opponent_trade_samples,
            },
            "capsApplied": self.caps_applied,
        });
        if let Some(weights) = self.weights {
            value["weights"] = json!(weights);
        }
        value
    }
}

fn score_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).map_or(0.0, clamp_unit)
}

/// A weight vector is valid only when it has exactly four finite numbers.
fn parse_weights(value: &Value) -> Option<[f64; COMPONENTS]> {
    let items = value.as_array()?;
    if items.len() != COMPONENTS {
        return None;
    }
    let mut weights = [0.0; COMPONENTS];
    for (slot, item) in weights.iter_mut().zip(items) {
        let w = item.as_f64()?;
        if !w.is_finite() {
            return None;
        }
        *slot = w;
    }
    Some(weights)
}

fn parse_segment_parts(value: &Value) -> SegmentParts {
    SegmentParts {
        is_superflex: flag_field(value, "isSuperflex"),
        is_tep: flag_field(value, "isTep"),
        league_size: count_field(value, "leagueSize").filter(|n| *n > 0),
        opponent_trade_samples: count_field(value, "opponentTradeSamples").unwrap_or(0),
    }
}

/// Flags may arrive as booleans or as 0/1 numbers.
fn flag_field(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

fn count_field(value: &Value, key: &str) -> Option<u32> {
    let raw = value.get(key)?.as_f64()?;
    if raw.is_finite() && raw >= 0.0 {
        Some(raw.min(f64::from(u32::MAX)) as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_payload_is_extracted() {
        let features = OfferFeatures::from_value(&json!({
            "lineupImpact": 0.8,
            "vorp": 0.6,
            "market": 0.4,
            "behavior": 0.2,
            "weights": [0.25, 0.25, 0.25, 0.25],
            "segmentParts": {
                "isSuperflex": true,
                "isTep": 1,
                "leagueSize": 12,
                "opponentTradeSamples": 7
            },
            "capsApplied": ["max_value_gap", "roster_limit"]
        }));

        assert_eq!(features.scores.as_array(), [0.8, 0.6, 0.4, 0.2]);
        assert_eq!(features.weights, Some([0.25; 4]));
        assert!(features.segment_parts.is_superflex);
        assert!(features.segment_parts.is_tep);
        assert_eq!(features.segment_parts.league_size, Some(12));
        assert_eq!(features.segment_parts.opponent_trade_samples, 7);
        assert_eq!(features.caps_applied, vec!["max_value_gap", "roster_limit"]);
        assert!((features.composite() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn short_weight_vector_falls_back_to_default() {
        let features = OfferFeatures::from_value(&json!({ "weights": [0.5, 0.5] }));
        assert_eq!(features.weights, None);
        assert_eq!(features.effective_weights(), DEFAULT_WEIGHTS);
    }

    #[test]
    fn non_numeric_weight_is_malformed() {
        let features = OfferFeatures::from_value(&json!({ "weights": [0.5, "x", 0.2, 0.1] }));
        assert_eq!(features.weights, None);
    }

    #[test]
    fn unparseable_payload_yields_defaults() {
        let features = OfferFeatures::parse("{not json");
        assert_eq!(features, OfferFeatures::default());
        assert_eq!(features.effective_weights(), DEFAULT_WEIGHTS);
    }

    #[test]
    fn sub_scores_are_clamped() {
        let features = OfferFeatures::from_value(&json!({ "lineupImpact": 1.7, "vorp": -0.3 }));
        assert_eq!(features.scores.lineup_impact, 1.0);
        assert_eq!(features.scores.vorp, 0.0);
    }

    #[test]
    fn zero_league_size_is_unknown() {
        let features =
            OfferFeatures::from_value(&json!({ "segmentParts": { "leagueSize": 0 } }));
        assert_eq!(features.segment_parts.league_size, None);
    }

    #[test]
    fn composite_uses_default_weights_when_missing() {
        let features = OfferFeatures::from_value(&json!({
            "lineupImpact": 1.0, "vorp": 0.0, "market": 0.0, "behavior": 0.0
        }));
        assert!((features.composite() - DEFAULT_WEIGHTS[0]).abs() < 1e-12);
    }

    #[test]
    fn to_value_is_read_back_unchanged() {
        let features = OfferFeatures {
            scores: SubScores { lineup_impact: 0.9, vorp: 0.1, market: 0.5, behavior: 0.3 },
            weights: Some([0.4, 0.3, 0.2, 0.1]),
            segment_parts: SegmentParts {
                is_superflex: true,
                is_tep: false,
                league_size: Some(14),
                opponent_trade_samples: 3,
            },
            caps_applied: vec!["fairness_cap".into()],
        };
        assert_eq!(OfferFeatures::from_value(&features.to_value()), features);
    }
}
