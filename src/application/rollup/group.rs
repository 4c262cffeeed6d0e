//! Per-segment accumulation of a day's offers and the baseline window.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::domain::bucket::{BucketInputs, BucketStats, CorrelationBlock, RELIABILITY_BINS};
use crate::domain::features::COMPONENTS;
use crate::domain::stats::{auc, brier, ece, mean, DriftScore, LabeledPoint, SampleThresholds};
use crate::domain::{
    resolve_segment, ConfidenceLabel, DriftDimension, DriftReport, LeagueConfig, LeagueId,
    ModelMetricsDaily, Mode, ScoreSeries, SegmentKey, SubScores, TradeOfferEvent,
};

/// Everything collected for one segment of one day.
#[derive(Debug, Clone, Default)]
pub struct SegmentGroup {
    n_offers: usize,
    narrative_failures: usize,
    labeled: Vec<LabeledPoint>,
    labeled_scores: Vec<(SubScores, bool)>,
    composite_scores: Vec<f64>,
    weight_vectors: Vec<Option<[f64; COMPONENTS]>>,
    cap_counts: BTreeMap<String, usize>,
    confidence_scores: Vec<f64>,
    confidence_labels: Vec<ConfidenceLabel>,
    series: ScoreSeries,
}

impl SegmentGroup {
    /// Add one offer with its label, if it has one.
    pub fn push(&mut self, event: &TradeOfferEvent, label: Option<bool>) {
        self.n_offers += 1;
        if event.narrative_failed() {
            self.narrative_failures += 1;
        }

        let features = &event.features;
        if let Some(label) = label {
            self.labeled.push(LabeledPoint::new(event.prob(), label));
            self.labeled_scores.push((features.scores, label));
        }
        self.composite_scores.push(features.composite());
        self.weight_vectors.push(features.weights);

        // A guardrail listed twice on one offer still counts once.
        let caps: BTreeSet<&str> = features.caps_applied.iter().map(String::as_str).collect();
        for cap in caps {
            *self.cap_counts.entry(cap.to_string()).or_default() += 1;
        }

        if let Some(score) = event.confidence_score.filter(|s| s.is_finite()) {
            self.confidence_scores.push(score);
        }
        if let Some(label) = event.confidence_label {
            self.confidence_labels.push(label);
        }
        self.series.push(event);
    }

    #[must_use]
    pub fn n_offers(&self) -> usize {
        self.n_offers
    }

    #[must_use]
    pub fn n_labeled(&self) -> usize {
        self.labeled.len()
    }

    #[must_use]
    pub fn n_accepted(&self) -> usize {
        self.labeled.iter().filter(|p| p.label).count()
    }

    /// Turn the group into the persisted row.
    ///
    /// `baseline` is the segment's series over the baseline window; when it
    /// is missing every drift dimension is omitted.
    #[must_use]
    pub fn summarize(
        &self,
        day: NaiveDate,
        mode: &Mode,
        segment_key: SegmentKey,
        baseline: Option<&ScoreSeries>,
        thresholds: &SampleThresholds,
    ) -> ModelMetricsDaily {
        let n_offers = self.n_offers as f64;
        let probs: Vec<f64> = self.labeled.iter().map(|p| p.prob).collect();
        let observed: Vec<f64> = self.labeled.iter().map(LabeledPoint::observed).collect();
        let mean_pred = mean(&probs);
        let mean_obs = mean(&observed);

        let narrative_fail_rate = if self.n_offers == 0 {
            0.0
        } else {
            self.narrative_failures as f64 / n_offers
        };
        let cap_rates = self
            .cap_counts
            .iter()
            .map(|(cap, count)| (cap.clone(), *count as f64 / n_offers))
            .collect();

        let empty = ScoreSeries::default();
        let baseline = baseline.unwrap_or(&empty);
        let mut drift = DriftReport::default();
        for dim in DriftDimension::ALL {
            if let Some(score) =
                DriftScore::compute(self.series.get(dim), baseline.get(dim), thresholds)
            {
                drift.insert(dim, score);
            }
        }

        let bucket_stats = BucketStats::build(
            BucketInputs {
                labeled: &self.labeled,
                composite_scores: &self.composite_scores,
                weight_vectors: &self.weight_vectors,
                correlations: CorrelationBlock::compute(&self.labeled_scores, thresholds),
                mean_pred,
                mean_obs,
                confidence_scores: &self.confidence_scores,
                confidence_labels: &self.confidence_labels,
            },
            thresholds,
        );

        ModelMetricsDaily {
            day,
            mode: mode.clone(),
            segment_key,
            n_offers: count(self.n_offers),
            n_labeled: count(self.labeled.len()),
            n_accepted: count(self.n_accepted()),
            mean_pred,
            mean_obs,
            ece: ece(&self.labeled, RELIABILITY_BINS),
            brier: brier(&self.labeled),
            auc: auc(&self.labeled, thresholds.auc_min_per_class),
            drift,
            cap_rates,
            bucket_stats,
            narrative_fail_rate,
        }
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn league_for<'a>(
    event: &TradeOfferEvent,
    leagues: &'a HashMap<LeagueId, LeagueConfig>,
) -> Option<&'a LeagueConfig> {
    event.league_id.as_ref().and_then(|id| leagues.get(id))
}

/// Group a day's offers by segment, labeling each through `label`.
pub fn group_current<F>(
    offers: &[TradeOfferEvent],
    leagues: &HashMap<LeagueId, LeagueConfig>,
    label: F,
) -> BTreeMap<SegmentKey, SegmentGroup>
where
    F: Fn(&TradeOfferEvent) -> Option<bool>,
{
    let mut groups: BTreeMap<SegmentKey, SegmentGroup> = BTreeMap::new();
    for event in offers {
        let key = resolve_segment(event, league_for(event, leagues));
        groups.entry(key).or_default().push(event, label(event));
    }
    groups
}

/// Group baseline-window offers by segment, keeping only score series.
pub fn group_baseline(
    offers: &[TradeOfferEvent],
    leagues: &HashMap<LeagueId, LeagueConfig>,
) -> BTreeMap<SegmentKey, ScoreSeries> {
    let mut series: BTreeMap<SegmentKey, ScoreSeries> = BTreeMap::new();
    for event in offers {
        let key = resolve_segment(event, league_for(event, leagues));
        series.entry(key).or_default().push(event);
    }
    series
}
