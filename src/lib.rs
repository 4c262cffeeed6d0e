//! Offerlens - daily quality rollups for a trade-offer acceptance model.
//!
//! Every scored trade offer carries a predicted acceptance probability and a
//! features payload. Once a day the rollup joins those offers with their
//! eventual outcomes, buckets them into coarse league segments and writes one
//! aggregate row per `(day, mode, segment)` with calibration (ECE, Brier),
//! discrimination (AUC, lift), drift (PSI, JSD) and guardrail diagnostics.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Pure types and statistics: events, segments, metrics
//! - [`port`] - Traits for the event readers and the aggregate sink
//! - [`application`] - The rollup use case
//! - [`adapter`] - SQLite and in-memory gateways, CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Expose fixture builders for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use offerlens::adapter::outbound::memory::MemoryGateway;
//! use offerlens::application::rollup::{RollupService, RollupSettings};
//! use offerlens::domain::Mode;
//!
//! # async fn run() -> offerlens::error::Result<()> {
//! let gateway = Arc::new(MemoryGateway::new());
//! let service = RollupService::new(gateway.clone(), gateway, RollupSettings::default());
//! let day = chrono::NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
//! service.rollup(day, &Mode::new("trade_finder")).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
