//! Inbound adapters (driving side).

pub mod cli;
