//! Infrastructure: configuration, logging and component wiring.

pub mod config;
pub mod factory;
