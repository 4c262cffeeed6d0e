//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations of the event reader ports and
//! the daily aggregate table using Diesel ORM.

pub mod database;
pub mod events;
pub mod metrics;

pub use events::SqliteEventStore;
pub use metrics::SqliteMetricsStore;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};

/// SQLite caps bound parameters per statement; id lists are queried in chunks.
const ID_CHUNK: usize = 500;

/// Fixed-width RFC 3339 UTC text, so string order matches time order.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("invalid timestamp {raw:?}: {e}")))
}
