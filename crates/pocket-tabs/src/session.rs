//! Session persistence
//!
//! Saves the ordered tab list and the active tab id so a later launch can
//! restore them. Saving replaces the previous copy in one transaction.

use chrono::{DateTime, Utc};

use pocket_storage::Database;

use crate::history::TabHistory;
use crate::store::TabStore;
use crate::tab::BrowserTab;
use crate::Result;

const ACTIVE_TAB_KEY: &str = "active_tab_id";

/// Tabs and active id read back from storage
#[derive(Debug, Clone)]
pub struct SavedSession {
    pub tabs: Vec<BrowserTab>,
    pub active_tab_id: Option<String>,
}

struct TabRow {
    id: String,
    title: String,
    snapshot_uri: Option<String>,
    history_index: i64,
    history_entries: String,
    created_at: String,
    updated_at: String,
}

impl TabRow {
    fn into_tab(self) -> Result<BrowserTab> {
        let entries: Vec<String> = serde_json::from_str(&self.history_entries)?;
        let index = usize::try_from(self.history_index).unwrap_or(usize::MAX);
        let history = TabHistory::from_parts(index, entries)?;

        Ok(BrowserTab {
            id: self.id,
            title: self.title,
            snapshot_uri: self.snapshot_uri,
            history,
            created_at: parse_timestamp(&self.created_at),
            updated_at: parse_timestamp(&self.updated_at),
        })
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Overwrite the saved session with the store's current tabs.
pub fn save_session(db: &Database, store: &TabStore) -> Result<()> {
    let rows = store
        .tabs()
        .map(|tab| -> Result<_> { Ok((tab, serde_json::to_string(tab.history.entries())?)) })
        .collect::<Result<Vec<_>>>()?;

    db.transaction(|conn| {
        conn.execute("DELETE FROM tabs", [])?;

        for (position, (tab, entries)) in rows.iter().enumerate() {
            conn.execute(
                "INSERT INTO tabs
                 (id, position, title, snapshot_uri, history_index, history_entries,
                  created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    tab.id,
                    position as i64,
                    tab.title,
                    tab.snapshot_uri,
                    tab.history.index() as i64,
                    entries,
                    tab.created_at.to_rfc3339(),
                    tab.updated_at.to_rfc3339(),
                ],
            )?;
        }

        match store.active_tab_id() {
            Some(id) => Database::write_setting(conn, ACTIVE_TAB_KEY, id)?,
            None => {
                conn.execute("DELETE FROM settings WHERE key = ?1", [ACTIVE_TAB_KEY])?;
            }
        }

        Ok(())
    })?;

    tracing::debug!(tabs = rows.len(), "Saved session");

    Ok(())
}

/// Read the saved session. Returns `None` when nothing was saved.
///
/// Rows that cannot be read or whose history cannot be decoded are skipped.
pub fn load_session(db: &Database) -> Result<Option<SavedSession>> {
    let rows: Vec<TabRow> = db.with_connection(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, title, snapshot_uri, history_index, history_entries,
                    created_at, updated_at
             FROM tabs ORDER BY position",
        )?;

        let rows: Vec<TabRow> = stmt
            .query_map([], |row| {
                Ok(TabRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    snapshot_uri: row.get(2)?,
                    history_index: row.get(3)?,
                    history_entries: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })?
            .filter_map(|r| {
                r.map_err(|e| tracing::warn!(error = %e, "Skipping unreadable tab row"))
                    .ok()
            })
            .collect();

        Ok(rows)
    })?;

    if rows.is_empty() {
        return Ok(None);
    }

    let tabs: Vec<BrowserTab> = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            row.into_tab()
                .map_err(|e| tracing::warn!(tab_id = %id, error = %e, "Skipping saved tab"))
                .ok()
        })
        .collect();

    let active_tab_id = db.setting(ACTIVE_TAB_KEY)?;

    tracing::info!(tabs = tabs.len(), "Loaded saved session");

    Ok(Some(SavedSession {
        tabs,
        active_tab_id,
    }))
}
