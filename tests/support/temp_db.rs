use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use diesel::prelude::*;
use larder::db::{create_pool, run_migrations, DbPool};

/// File-backed SQLite database that lives for one test.
///
/// Unlike `:memory:`, the file can be opened a second time through
/// [`reopen`](Self::reopen), which is how the durability tests model a
/// registry restart.
pub struct TempDb {
    path: PathBuf,
    url: String,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("larder-{name}-{nanos}.db"));
        let url = format!("sqlite://{}", path.display());

        let pool = create_pool(&url).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        // WAL mode improves concurrent writer behavior in tests.
        let mut conn = pool.get().expect("get sqlite connection");
        diesel::sql_query("PRAGMA journal_mode=WAL")
            .execute(&mut conn)
            .expect("enable WAL mode");
        drop(conn);

        Self { path, url, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Build a second pool on the same database file, as a restarted
    /// registry process would.
    pub fn reopen(&self) -> DbPool {
        create_pool(&self.url).expect("reopen sqlite pool")
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
