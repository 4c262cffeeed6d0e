//! Infrastructure configuration modules.

pub mod logging;
pub mod rollup;
pub mod settings;
