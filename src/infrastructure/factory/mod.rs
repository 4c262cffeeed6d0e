//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured infrastructure
//! components from application configuration. These factories handle
//! dependency injection and wiring.
//!
//! # Submodules
//!
//! - [`persistence`] - Database pool and SQLite store construction
//! - [`rollup`] - Rollup service construction

pub mod persistence;
pub mod rollup;
