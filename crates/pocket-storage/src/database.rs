//! Session database handle
//!
//! A single SQLite connection shared behind a mutex. Multi-statement writes
//! go through [`Database::transaction`] so a saved session is never left
//! half written.

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file and bring its schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        tracing::debug!(path = %path.display(), journal_mode = %mode, "Opened session database");

        Self::prepare(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with the connection locked
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        f(&self.conn.lock())
    }

    /// Run `f` inside a transaction. Nothing is kept unless `f` succeeds.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rolling back transaction");
                Err(e)
            }
        }
    }

    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?)
        })
    }

    pub fn put_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_connection(|conn| Self::write_setting(conn, key, value))
    }

    /// Upsert a setting on `conn`, e.g. from inside [`Database::transaction`]
    pub fn write_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_has_no_tabs() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM tabs", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_settings_upsert() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.setting("search_engine").unwrap(), None);

        db.put_setting("search_engine", "https://duckduckgo.com/?q=%s")
            .unwrap();
        db.put_setting("search_engine", "https://www.google.com/search?q=%s")
            .unwrap();

        assert_eq!(
            db.setting("search_engine").unwrap().as_deref(),
            Some("https://www.google.com/search?q=%s")
        );
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = Database::open_in_memory().unwrap();

        let result: Result<()> = db.transaction(|conn| {
            Database::write_setting(conn, "a", "b")?;
            conn.execute("INSERT INTO missing_table VALUES (1)", [])?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(db.setting("a").unwrap(), None);
    }

    #[test]
    fn test_clones_share_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();

        other.put_setting("active_tab_id", "tab-3").unwrap();
        assert_eq!(db.setting("active_tab_id").unwrap().as_deref(), Some("tab-3"));
    }

    #[test]
    fn test_reopen_file_keeps_settings() {
        let path = std::env::temp_dir().join(format!(
            "pocket-storage-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        Database::open(&path)
            .unwrap()
            .put_setting("search_engine", "https://example.com/?q=%s")
            .unwrap();
        let reopened = Database::open(&path).unwrap();
        assert_eq!(
            reopened.setting("search_engine").unwrap().as_deref(),
            Some("https://example.com/?q=%s")
        );

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }
}
