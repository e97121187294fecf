//! Main browser state container
//!
//! Owns the tab store and the address bar resolver. Screens hold clones of
//! the `Browser` handle and dispatch every change through it.

use parking_lot::RwLock;
use std::sync::Arc;

use pocket_navigation::{InputResolution, InputResolver};
use pocket_storage::Database;
use pocket_tabs::{BrowserTab, IdGenerator, TabStore, TabUpdate, UuidGenerator};

use crate::config::Config;
use crate::Result;

const SEARCH_ENGINE_KEY: &str = "search_engine";

/// Main browser instance
pub struct Browser {
    /// Configuration
    config: Config,
    /// Saved session storage, when enabled
    db: Option<Database>,
    /// Tabs and the active tab pointer
    store: Arc<RwLock<TabStore>>,
    /// Input resolver for address bar
    input_resolver: Arc<RwLock<InputResolver>>,
}

impl Browser {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_id_generator(config, Box::new(UuidGenerator))
    }

    pub fn with_id_generator(config: Config, ids: Box<dyn IdGenerator>) -> Result<Self> {
        let db = match &config.database_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                Some(Database::open(path)?)
            }
            None => None,
        };

        let input_resolver = InputResolver::with_search_engine(config.search_engine.clone())?;
        let store = TabStore::with_id_generator(config.default_url.clone(), ids);

        Ok(Self {
            config,
            db,
            store: Arc::new(RwLock::new(store)),
            input_resolver: Arc::new(RwLock::new(input_resolver)),
        })
    }

    /// Browser backed by an already open database
    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        let config = Config {
            database_path: None,
            ..config
        };
        let mut browser = Self::new(config)?;
        browser.db = Some(db);
        Ok(browser)
    }

    /// Restore saved settings and the last session, if storage is enabled
    pub fn initialize(&self) -> Result<()> {
        let Some(db) = &self.db else {
            tracing::info!("Browser initialized without session storage");
            return Ok(());
        };

        if let Some(template) = db.setting(SEARCH_ENGINE_KEY)? {
            if let Err(e) = self.input_resolver.write().set_search_engine(template) {
                tracing::warn!(error = %e, "Ignoring saved search engine");
            }
        }

        if let Some(saved) = pocket_tabs::load_session(db)? {
            self.store
                .write()
                .replace_tabs(saved.tabs, saved.active_tab_id);
        }

        tracing::info!(tabs = self.tab_count(), "Browser initialized");

        Ok(())
    }

    // === Tab operations ===

    pub fn add_tab(&self, url: Option<&str>) -> Result<BrowserTab> {
        let tab = self.store.write().add_tab(url).clone();
        self.persist()?;
        Ok(tab)
    }

    pub fn close_tab(&self, tab_id: &str) -> Result<bool> {
        let closed = self.store.write().close_tab(tab_id);
        if closed {
            self.persist()?;
        }
        Ok(closed)
    }

    pub fn update_tab(&self, tab_id: &str, update: TabUpdate) -> Result<bool> {
        let updated = self.store.write().update_tab(tab_id, update);
        if updated {
            self.persist()?;
        }
        Ok(updated)
    }

    pub fn switch_tab(&self, tab_id: &str) -> Result<()> {
        self.store.write().switch_tab(tab_id);
        self.persist()
    }

    /// Append `url` to the tab's history unless it is already current
    pub fn record_navigation(&self, tab_id: &str, url: &str) -> Result<bool> {
        self.change_history(tab_id, |h| h.record_navigation(url))
    }

    /// Step back; returns the URL now current, if the cursor moved
    pub fn go_back(&self, tab_id: &str) -> Result<Option<String>> {
        if self.change_history(tab_id, |h| h.go_back())? {
            Ok(self.current_url(tab_id))
        } else {
            Ok(None)
        }
    }

    /// Step forward; returns the URL now current, if the cursor moved
    pub fn go_forward(&self, tab_id: &str) -> Result<Option<String>> {
        if self.change_history(tab_id, |h| h.go_forward())? {
            Ok(self.current_url(tab_id))
        } else {
            Ok(None)
        }
    }

    /// Resolve address bar text and record the result on the tab
    pub fn navigate_input(&self, tab_id: &str, input: &str) -> Result<InputResolution> {
        let resolution = self.resolve_input(input);
        self.record_navigation(tab_id, resolution.url())?;
        Ok(resolution)
    }

    fn change_history<F>(&self, tab_id: &str, f: F) -> Result<bool>
    where
        F: FnOnce(&mut pocket_tabs::TabHistory) -> bool,
    {
        let changed = self.store.write().update_history(tab_id, f);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    // === Reads ===

    /// Read the store without cloning tabs
    pub fn with_store<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TabStore) -> T,
    {
        f(&self.store.read())
    }

    pub fn tabs(&self) -> Vec<BrowserTab> {
        self.store.read().tabs().cloned().collect()
    }

    pub fn tab(&self, tab_id: &str) -> Option<BrowserTab> {
        self.store.read().get(tab_id).cloned()
    }

    pub fn active_tab(&self) -> Option<BrowserTab> {
        self.store.read().active_tab().cloned()
    }

    pub fn active_tab_id(&self) -> Option<String> {
        self.store.read().active_tab_id().map(str::to_string)
    }

    pub fn current_url(&self, tab_id: &str) -> Option<String> {
        self.store
            .read()
            .get(tab_id)
            .map(|tab| tab.current_url().to_string())
    }

    pub fn tab_count(&self) -> usize {
        self.store.read().len()
    }

    // === Navigation ===

    pub fn resolve_input(&self, input: &str) -> InputResolution {
        self.input_resolver.read().resolve(input)
    }

    pub fn resolver(&self) -> InputResolver {
        self.input_resolver.read().clone()
    }

    // === Settings ===

    pub fn search_engine(&self) -> String {
        self.input_resolver.read().search_template().to_string()
    }

    pub fn set_search_engine(&self, template: String) -> Result<()> {
        self.input_resolver
            .write()
            .set_search_engine(template.clone())?;
        if let Some(db) = &self.db {
            db.put_setting(SEARCH_ENGINE_KEY, &template)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Video probe to inject into pages
    pub fn page_script(&self) -> String {
        crate::script::video_probe_script(
            self.config.video_probe_interval_ms,
            &self.config.message_handler,
        )
    }

    fn persist(&self) -> Result<()> {
        if let Some(db) = &self.db {
            pocket_tabs::save_session(db, &self.store.read())?;
        }
        Ok(())
    }
}

impl Clone for Browser {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            store: Arc::clone(&self.store),
            input_resolver: Arc::clone(&self.input_resolver),
        }
    }
}
