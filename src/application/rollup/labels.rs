//! Outcome lookup keyed by offer id.

use std::collections::HashMap;

use tracing::debug;

use super::settings::DuplicateOutcomePolicy;
use crate::domain::{OfferEventId, Outcome, TradeOutcomeEvent};

/// The single outcome consumed for each resolved offer.
#[derive(Debug, Default)]
pub struct OutcomeIndex {
    outcomes: HashMap<OfferEventId, TradeOutcomeEvent>,
}

impl OutcomeIndex {
    /// Index outcome rows, keeping one meaningful outcome per offer.
    ///
    /// Rows with an unrecognised outcome are skipped entirely, so such an
    /// offer stays unlabeled unless it also has a meaningful row.
    pub fn build(rows: Vec<TradeOutcomeEvent>, policy: DuplicateOutcomePolicy) -> Self {
        let mut outcomes: HashMap<OfferEventId, TradeOutcomeEvent> = HashMap::new();
        let mut duplicates = 0usize;

        for row in rows.into_iter().filter(|r| r.outcome.label().is_some()) {
            match outcomes.get(&row.offer_event_id) {
                None => {
                    outcomes.insert(row.offer_event_id.clone(), row);
                }
                Some(current) => {
                    duplicates += 1;
                    let replace = match policy {
                        DuplicateOutcomePolicy::First => row.resolved_at < current.resolved_at,
                        DuplicateOutcomePolicy::Latest => row.resolved_at >= current.resolved_at,
                    };
                    if replace {
                        outcomes.insert(row.offer_event_id.clone(), row);
                    }
                }
            }
        }

        if duplicates > 0 {
            debug!(duplicates, policy = ?policy, "Resolved duplicate outcome rows");
        }

        Self { outcomes }
    }

    /// Binary label for an offer: `Some(true)` when accepted, `None` when
    /// the offer has no meaningful outcome.
    #[must_use]
    pub fn label(&self, offer: &OfferEventId) -> Option<bool> {
        self.outcomes.get(offer).and_then(|o| o.outcome.label())
    }

    /// The consumed outcome for an offer.
    #[must_use]
    pub fn outcome(&self, offer: &OfferEventId) -> Option<&Outcome> {
        self.outcomes.get(offer).map(|o| &o.outcome)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
