//! Tab switcher view model

use serde::{Deserialize, Serialize};

use pocket_tabs::BrowserTab;

use crate::browser::Browser;
use crate::Result;

/// One card in the tab switcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    pub id: String,
    pub title: String,
    pub snapshot_uri: Option<String>,
    pub position: usize,
    pub is_active: bool,
}

/// Cards for every tab, in creation order
pub fn tab_summaries(browser: &Browser) -> Vec<TabSummary> {
    browser.with_store(|store| {
        let active = store.active_tab_id();
        store
            .tabs()
            .enumerate()
            .map(|(position, tab)| TabSummary {
                id: tab.id.clone(),
                title: tab.title.clone(),
                snapshot_uri: tab.snapshot_uri.clone(),
                position,
                is_active: active == Some(tab.id.as_str()),
            })
            .collect()
    })
}

pub struct TabSwitcher {
    browser: Browser,
}

impl TabSwitcher {
    pub fn new(browser: Browser) -> Self {
        Self { browser }
    }

    pub fn rows(&self) -> Vec<TabSummary> {
        tab_summaries(&self.browser)
    }

    /// Make `tab_id` the active tab
    pub fn select(&self, tab_id: &str) -> Result<()> {
        self.browser.switch_tab(tab_id)
    }

    pub fn close(&self, tab_id: &str) -> Result<bool> {
        self.browser.close_tab(tab_id)
    }

    pub fn new_tab(&self) -> Result<BrowserTab> {
        self.browser.add_tab(None)
    }
}
