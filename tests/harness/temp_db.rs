use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use offerlens::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use offerlens::adapter::outbound::sqlite::{SqliteEventStore, SqliteMetricsStore};

/// Temporary SQLite database for integration tests.
pub struct TempDb {
    path: PathBuf,
    pub events: Arc<SqliteEventStore>,
    pub metrics: Arc<SqliteMetricsStore>,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("offerlens-{name}-{nanos}.db"));

        let url = format!("sqlite://{}", path.display());
        let pool = create_pool(&url).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self {
            path,
            events: Arc::new(SqliteEventStore::new(pool.clone())),
            metrics: Arc::new(SqliteMetricsStore::new(pool)),
        }
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = std::fs::remove_file(side);
        }
    }
}
