//! Rollup service factory.

use crate::adapter::outbound::sqlite::{SqliteEventStore, SqliteMetricsStore};
use crate::application::rollup::RollupService;
use crate::infrastructure::config::settings::Config;

use super::persistence::Persistence;

/// Rollup service over the SQLite stores.
pub type SqliteRollupService = RollupService<SqliteEventStore, SqliteMetricsStore>;

/// Wire the rollup service from configuration.
pub fn build_rollup_service(config: &Config, persistence: &Persistence) -> SqliteRollupService {
    RollupService::new(
        persistence.events.clone(),
        persistence.metrics.clone(),
        config.rollup.to_settings(),
    )
}
