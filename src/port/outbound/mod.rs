//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the persistence gateway: event readers on the
//! input side and the daily aggregate table on the output side.

pub mod events;
pub mod metrics;
