//! Tab Store
//!
//! Owns every tab and the active-tab pointer. The collection is never left
//! empty: each mutating operation ends by restoring that invariant, opening a
//! tab on the default URL when the last one goes away.

use std::collections::HashMap;

use crate::history::TabHistory;
use crate::id::{IdGenerator, UuidGenerator};
use crate::tab::{BrowserTab, TabUpdate};

pub struct TabStore {
    /// Tabs keyed by id
    tabs: HashMap<String, BrowserTab>,
    /// Creation order of tab ids
    order: Vec<String>,
    active_tab_id: Option<String>,
    default_url: String,
    ids: Box<dyn IdGenerator>,
}

impl TabStore {
    /// Store holding a single tab on `default_url`
    pub fn new(default_url: impl Into<String>) -> Self {
        Self::with_id_generator(default_url, Box::new(UuidGenerator))
    }

    pub fn with_id_generator(default_url: impl Into<String>, ids: Box<dyn IdGenerator>) -> Self {
        let mut store = Self {
            tabs: HashMap::new(),
            order: Vec::new(),
            active_tab_id: None,
            default_url: default_url.into(),
            ids,
        };
        store.restore_invariant();
        store
    }

    /// Open a tab on `url` (or the default URL) and make it active.
    pub fn add_tab(&mut self, url: Option<&str>) -> &BrowserTab {
        let url = url
            .map(str::to_string)
            .unwrap_or_else(|| self.default_url.clone());
        let tab = BrowserTab::new(self.ids.next_id(), url);
        let id = tab.id.clone();

        tracing::info!(tab_id = %id, url = %tab.current_url(), "Created new tab");

        self.order.push(id.clone());
        self.tabs.insert(id.clone(), tab);
        self.active_tab_id = Some(id.clone());

        &self.tabs[&id]
    }

    /// Remove a tab. Returns false when no tab has this id.
    ///
    /// Closing the active tab activates the tab now at the closed tab's
    /// position, falling back to earlier positions.
    pub fn close_tab(&mut self, tab_id: &str) -> bool {
        let Some(position) = self.position(tab_id) else {
            tracing::debug!(tab_id = %tab_id, "Ignoring close of unknown tab");
            return false;
        };

        self.order.remove(position);
        self.tabs.remove(tab_id);

        if self.active_tab_id.as_deref() == Some(tab_id) {
            self.active_tab_id = (0..=position)
                .rev()
                .find_map(|i| self.order.get(i))
                .cloned();
        }

        tracing::info!(tab_id = %tab_id, "Closed tab");

        self.restore_invariant();
        true
    }

    /// Merge `update` into a tab. Returns false when no tab has this id.
    pub fn update_tab(&mut self, tab_id: &str, update: TabUpdate) -> bool {
        let Some(current) = self.tabs.get(tab_id) else {
            tracing::debug!(tab_id = %tab_id, "Ignoring update of unknown tab");
            return false;
        };

        let next = current.apply(update);
        self.tabs.insert(tab_id.to_string(), next);
        true
    }

    /// Run `f` against a copy of the tab's history and store the result if
    /// `f` reports a change. Returns whether the history changed.
    pub fn update_history<F>(&mut self, tab_id: &str, f: F) -> bool
    where
        F: FnOnce(&mut TabHistory) -> bool,
    {
        let Some(tab) = self.tabs.get(tab_id) else {
            tracing::debug!(tab_id = %tab_id, "Ignoring history change of unknown tab");
            return false;
        };

        let mut history = tab.history.clone();
        if !f(&mut history) {
            return false;
        }

        tracing::debug!(
            tab_id = %tab_id,
            index = history.index(),
            url = %history.current(),
            "Tab history changed"
        );

        self.update_tab(tab_id, TabUpdate::default().history(history))
    }

    /// Point the active tab at `tab_id`.
    ///
    /// The id is not checked against the collection, so an unknown id leaves
    /// no active tab until the next add or switch.
    pub fn switch_tab(&mut self, tab_id: &str) {
        if !self.tabs.contains_key(tab_id) {
            tracing::debug!(tab_id = %tab_id, "Switching to unknown tab");
        }
        self.active_tab_id = Some(tab_id.to_string());
    }

    /// Replace the whole collection, e.g. with a restored session.
    ///
    /// Duplicate ids keep their first occurrence. When `active_tab_id` names
    /// no tab the first tab becomes active.
    pub fn replace_tabs(&mut self, tabs: Vec<BrowserTab>, active_tab_id: Option<String>) {
        self.tabs.clear();
        self.order.clear();

        for tab in tabs {
            if self.tabs.contains_key(&tab.id) {
                tracing::warn!(tab_id = %tab.id, "Dropping duplicate tab");
                continue;
            }
            self.order.push(tab.id.clone());
            self.tabs.insert(tab.id.clone(), tab);
        }

        self.active_tab_id = active_tab_id
            .filter(|id| self.tabs.contains_key(id))
            .or_else(|| self.order.first().cloned());

        self.restore_invariant();
    }

    fn restore_invariant(&mut self) {
        if self.order.is_empty() {
            tracing::debug!("No tabs left, opening default tab");
            self.active_tab_id = None;
            self.add_tab(None);
        }
    }

    /// Tabs in creation order
    pub fn tabs(&self) -> impl Iterator<Item = &BrowserTab> + '_ {
        self.order.iter().filter_map(|id| self.tabs.get(id))
    }

    pub fn get(&self, tab_id: &str) -> Option<&BrowserTab> {
        self.tabs.get(tab_id)
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.order.iter().position(|id| id == tab_id)
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    pub fn active_tab(&self) -> Option<&BrowserTab> {
        self.active_tab_id
            .as_deref()
            .and_then(|id| self.tabs.get(id))
    }

    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
