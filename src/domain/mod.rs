//! Model-quality domain logic.
//!
//! Pure types and computations with no I/O: offer/outcome events, segment
//! resolution, statistical primitives, and the daily aggregate they produce.

pub mod bucket;
pub mod event;
pub mod features;
pub mod id;
pub mod league;
pub mod metrics;
pub mod segment;
pub mod series;
pub mod stats;
pub mod trend;

pub use event::{ConfidenceLabel, Outcome, TradeOfferEvent, TradeOutcomeEvent};
pub use features::{OfferFeatures, SegmentParts, SubScores, DEFAULT_WEIGHTS};
pub use id::{LeagueId, Mode, OfferEventId};
pub use league::{LeagueClass, LeagueConfig};
pub use metrics::{DriftReport, ModelMetricsDaily};
pub use segment::{resolve_segment, SegmentContext, SegmentKey};
pub use series::{DriftDimension, ScoreSeries};
