//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the rollup engine and the systems it reads
//! from and writes to. Adapters implement them for SQLite and for an
//! in-memory gateway used in tests.
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────────┐      ┌─────────────────────┐      ┌──────────────┐
//!   │ Event store  │─────▶│   RollupService     │─────▶│ Metrics sink │
//!   │ (offers,     │      │ (segment, compute,  │      │ (upsert by   │
//!   │  outcomes,   │      │  assemble rows)     │      │  day/mode/   │
//!   │  leagues)    │      └─────────────────────┘      │  segment)    │
//!   └──────────────┘                                   └──────────────┘
//! ```

pub mod outbound;
