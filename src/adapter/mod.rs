//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving side: the command-line interface.
//! - [`outbound`] - Driven side: SQLite and in-memory gateways.

pub mod inbound;
pub mod outbound;
