//! SQLite access.
//!
//! A `Database` is only a path; each operation opens its own `Connection`,
//! so handlers and blocking workers never share one.

mod schema;

use crate::error::ApiResult;
use log::info;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection with foreign keys enforced and a busy timeout so
    /// concurrent writers wait for each other instead of failing.
    pub fn connect(&self) -> ApiResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }

    /// Creates the schema if needed and switches the file to WAL mode.
    pub fn migrate(&self) -> ApiResult<()> {
        let conn = self.connect()?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.execute_batch(schema::SCHEMA)?;
        info!("Database ready at {} (journal_mode={})", self.path.display(), mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn migrate_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("k.sqlite"));
        db.migrate().unwrap();
        db.migrate().unwrap();

        let conn = db.connect().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
                 ('package_sets', 'integrations', 'packages', 'package_versions', 'package_items', 'comments')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 6);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("k.sqlite"));
        db.migrate().unwrap();
        let conn = db.connect().unwrap();
        let result = conn.execute(
            "INSERT INTO packages (package_set_id, slug, created_by, created_at, updated_at)
             VALUES (999, 'orphan', 'u', 'now', 'now')",
            [],
        );
        assert!(result.is_err());
    }
}
