//! Tab data structure
//!
//! The tab switcher shows:
//! - Title
//! - Last captured snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::TabHistory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserTab {
    /// Unique identifier, fixed for the tab's lifetime
    pub id: String,
    /// Page title, defaults to the seed URL
    pub title: String,
    /// Reference to the last captured snapshot image
    pub snapshot_uri: Option<String>,
    /// Visited URLs and the cursor into them
    pub history: TabHistory,
    /// When the tab was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl BrowserTab {
    pub fn new(id: String, url: String) -> Self {
        let now = Utc::now();

        Self {
            id,
            title: url.clone(),
            snapshot_uri: None,
            history: TabHistory::new(url),
            created_at: now,
            updated_at: now,
        }
    }

    /// URL currently displayed
    pub fn current_url(&self) -> &str {
        self.history.current()
    }

    /// Build the updated record; fields absent from `update` are carried over.
    pub fn apply(&self, update: TabUpdate) -> Self {
        Self {
            id: self.id.clone(),
            title: update.title.unwrap_or_else(|| self.title.clone()),
            snapshot_uri: update.snapshot_uri.or_else(|| self.snapshot_uri.clone()),
            history: update.history.unwrap_or_else(|| self.history.clone()),
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for a tab. The id is not part of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabUpdate {
    pub title: Option<String>,
    pub snapshot_uri: Option<String>,
    pub history: Option<TabHistory>,
}

impl TabUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn snapshot_uri(mut self, uri: impl Into<String>) -> Self {
        self.snapshot_uri = Some(uri.into());
        self
    }

    pub fn history(mut self, history: TabHistory) -> Self {
        self.history = Some(history);
        self
    }
}
