//! Persistence factory for the SQLite stores.

use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::{SqliteEventStore, SqliteMetricsStore};
use crate::error::Result;

/// Event and metrics stores sharing one migrated pool.
pub struct Persistence {
    pub events: Arc<SqliteEventStore>,
    pub metrics: Arc<SqliteMetricsStore>,
}

/// Open (creating if needed) and migrate the database at `database`.
pub fn build_persistence(database: &str) -> Result<Persistence> {
    let db_url = format!("sqlite://{database}");
    let db_pool = create_pool(&db_url)?;
    run_migrations(&db_pool)?;
    debug!(database, "Database ready");
    Ok(Persistence {
        events: Arc::new(SqliteEventStore::new(db_pool.clone())),
        metrics: Arc::new(SqliteMetricsStore::new(db_pool)),
    })
}
