//! Active tab screen
//!
//! Binds the active tab to the render engine. Page events from the engine
//! are written back into the tab store; user commands are turned into
//! engine commands.

use pocket_navigation::{AddressBar, InputResolution};
use pocket_tabs::TabUpdate;

use crate::browser::Browser;
use crate::engine::{EngineEvent, RenderEngine, SnapshotCapture};
use crate::load::PageLoad;
use crate::script::{PageMessage, VIDEO_FOUND_NOTICE};
use crate::switcher::TabSwitcher;
use crate::Result;

pub struct TabScreen<E, S> {
    browser: Browser,
    engine: E,
    snapshots: S,
    address_bar: AddressBar,
    page_load: PageLoad,
    /// Tab id and URL last handed to the engine
    shown: Option<(String, String)>,
}

impl<E: RenderEngine, S: SnapshotCapture> TabScreen<E, S> {
    pub fn new(browser: Browser, engine: E, snapshots: S) -> Self {
        let current_url = browser
            .active_tab()
            .map(|tab| tab.current_url().to_string())
            .unwrap_or_default();
        let mut screen = Self {
            address_bar: AddressBar::new(&current_url),
            browser,
            engine,
            snapshots,
            page_load: PageLoad::new(),
            shown: None,
        };
        screen.sync();
        screen
    }

    /// Load the active tab's current URL if the engine is not showing it.
    ///
    /// Call after the active tab changed outside this screen, e.g. from the
    /// tab switcher.
    pub fn sync(&mut self) {
        let Some(tab) = self.browser.active_tab() else {
            return;
        };
        let url = tab.current_url().to_string();

        let up_to_date = matches!(&self.shown, Some((id, shown)) if *id == tab.id && *shown == url);
        if !up_to_date {
            tracing::debug!(tab_id = %tab.id, url = %url, "Loading tab into engine");
            self.engine.load_uri(&url);
            self.page_load = PageLoad::new();
        }

        self.address_bar.show_url(&url);
        self.shown = Some((tab.id, url));
    }

    pub fn handle_event(&mut self, event: EngineEvent) -> Result<()> {
        match event {
            EngineEvent::NavigationStateChanged { url, title } => {
                let Some(tab_id) = self.active_tab_id() else {
                    return Ok(());
                };
                self.browser.record_navigation(&tab_id, &url)?;
                let title = title.unwrap_or_else(|| url.clone());
                self.browser
                    .update_tab(&tab_id, TabUpdate::default().title(title))?;
                self.address_bar.show_url(&url);
                self.shown = Some((tab_id, url));
            }
            EngineEvent::LoadProgress { progress } => self.page_load.set_progress(progress),
            EngineEvent::LoadStarted => self.page_load.start(),
            EngineEvent::LoadEnded => self.page_load.finish(),
            EngineEvent::WindowOpenRequested { target_url } => {
                tracing::info!(url = %target_url, "Page requested a new window");
                self.browser.add_tab(Some(&target_url))?;
                self.sync();
            }
            EngineEvent::MessageReceived { data } => match PageMessage::parse(&data) {
                Ok(PageMessage::VideoFound { url }) => {
                    tracing::info!(url = %url, "Video found on page");
                    self.address_bar.set_notice(VIDEO_FOUND_NOTICE);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed page message");
                }
            },
            EngineEvent::SnapshotCaptured { tab_id, uri } => match uri {
                Some(uri) => {
                    self.browser
                        .update_tab(&tab_id, TabUpdate::default().snapshot_uri(uri))?;
                }
                None => tracing::debug!(tab_id = %tab_id, "Snapshot produced no image"),
            },
        }
        Ok(())
    }

    // === Address bar ===

    pub fn focus_address(&mut self) {
        if let Some(url) = self.current_url() {
            self.address_bar.focus(&url);
        }
    }

    pub fn edit_address(&mut self, text: impl Into<String>) {
        self.address_bar.set_text(text);
    }

    pub fn cancel_address(&mut self) {
        let url = self.current_url().unwrap_or_default();
        self.address_bar.blur(&url);
    }

    /// Resolve the typed text, record it on the active tab and load it
    pub fn submit_address(&mut self) -> Result<Option<InputResolution>> {
        let Some(tab_id) = self.active_tab_id() else {
            return Ok(None);
        };

        let resolution = self.address_bar.submit(&self.browser.resolver());
        self.browser.record_navigation(&tab_id, resolution.url())?;
        self.load(tab_id, resolution.url().to_string());

        Ok(Some(resolution))
    }

    // === Navigation ===

    pub fn go_back(&mut self) -> Result<bool> {
        let Some(tab_id) = self.active_tab_id() else {
            return Ok(false);
        };
        match self.browser.go_back(&tab_id)? {
            Some(url) => {
                self.load(tab_id, url);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn go_forward(&mut self) -> Result<bool> {
        let Some(tab_id) = self.active_tab_id() else {
            return Ok(false);
        };
        match self.browser.go_forward(&tab_id)? {
            Some(url) => {
                self.load(tab_id, url);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn reload(&mut self) {
        if self.active_tab_id().is_some() {
            self.engine.reload();
        }
    }

    pub fn stop_loading(&mut self) {
        if self.active_tab_id().is_some() {
            self.engine.stop_loading();
            self.page_load.cancel();
        }
    }

    pub fn new_tab(&mut self) -> Result<()> {
        self.browser.add_tab(None)?;
        self.sync();
        Ok(())
    }

    /// Capture the active tab for its switcher card and hand over to the
    /// switcher.
    pub fn open_tab_switcher(&mut self) -> TabSwitcher {
        if let Some(tab_id) = self.active_tab_id() {
            self.snapshots.request_snapshot(&tab_id);
        }
        TabSwitcher::new(self.browser.clone())
    }

    fn load(&mut self, tab_id: String, url: String) {
        self.engine.load_uri(&url);
        self.address_bar.show_url(&url);
        self.shown = Some((tab_id, url));
    }

    /// Id of the active tab, if it names an existing tab
    fn active_tab_id(&self) -> Option<String> {
        self.browser
            .with_store(|store| store.active_tab().map(|tab| tab.id.clone()))
    }

    // === Reads ===

    pub fn can_go_back(&self) -> bool {
        self.browser.with_store(|store| {
            store
                .active_tab()
                .is_some_and(|tab| tab.history.can_go_back())
        })
    }

    pub fn can_go_forward(&self) -> bool {
        self.browser.with_store(|store| {
            store
                .active_tab()
                .is_some_and(|tab| tab.history.can_go_forward())
        })
    }

    pub fn current_url(&self) -> Option<String> {
        self.browser
            .with_store(|store| store.active_tab().map(|tab| tab.current_url().to_string()))
    }

    pub fn tab_count(&self) -> usize {
        self.browser.tab_count()
    }

    pub fn address_bar(&self) -> &AddressBar {
        &self.address_bar
    }

    pub fn page_load(&self) -> &PageLoad {
        &self.page_load
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn snapshots(&self) -> &S {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pocket_tabs::SequentialIds;

    #[derive(Default)]
    struct RecordingEngine {
        commands: Vec<String>,
    }

    impl RenderEngine for RecordingEngine {
        fn load_uri(&mut self, url: &str) {
            self.commands.push(format!("load {url}"));
        }

        fn reload(&mut self) {
            self.commands.push("reload".to_string());
        }

        fn stop_loading(&mut self) {
            self.commands.push("stop".to_string());
        }
    }

    #[derive(Default)]
    struct RecordingSnapshots {
        requests: Vec<String>,
    }

    impl SnapshotCapture for RecordingSnapshots {
        fn request_snapshot(&mut self, tab_id: &str) {
            self.requests.push(tab_id.to_string());
        }
    }

    fn screen() -> TabScreen<RecordingEngine, RecordingSnapshots> {
        let browser =
            Browser::with_id_generator(Config::default(), Box::new(SequentialIds::default()))
                .unwrap();
        TabScreen::new(browser, RecordingEngine::default(), RecordingSnapshots::default())
    }

    fn navigated(url: &str, title: Option<&str>) -> EngineEvent {
        EngineEvent::NavigationStateChanged {
            url: url.to_string(),
            title: title.map(str::to_string),
        }
    }

    #[test]
    fn test_loads_active_tab_on_open() {
        let screen = screen();
        assert_eq!(screen.engine().commands, ["load https://google.com"]);
        assert_eq!(screen.address_bar().text(), "google.com");
        assert_eq!(screen.tab_count(), 1);
    }

    #[test]
    fn test_navigation_updates_history_and_title() {
        let mut screen = screen();

        screen
            .handle_event(navigated("https://www.example.com/a", Some("Example A")))
            .unwrap();
        let tab = screen.browser().tab("tab-0").unwrap();
        assert_eq!(
            tab.history.entries(),
            ["https://google.com", "https://www.example.com/a"]
        );
        assert_eq!(tab.title, "Example A");
        assert_eq!(screen.address_bar().text(), "example.com");
        assert!(screen.can_go_back());

        screen
            .handle_event(navigated("https://example.org/", None))
            .unwrap();
        let tab = screen.browser().tab("tab-0").unwrap();
        assert_eq!(tab.title, "https://example.org/");

        // the engine already shows these pages
        assert_eq!(screen.engine().commands.len(), 1);
    }

    #[test]
    fn test_submit_address() {
        let mut screen = screen();

        screen.focus_address();
        assert_eq!(screen.address_bar().text(), "https://google.com");
        screen.edit_address("rust lang");

        let resolution = screen.submit_address().unwrap().unwrap();
        let url = "https://www.google.com/search?q=rust%20lang";
        assert_eq!(resolution, InputResolution::Search(url.to_string()));
        assert_eq!(screen.current_url().as_deref(), Some(url));
        assert_eq!(screen.engine().commands.last().unwrap(), &format!("load {url}"));
        assert!(!screen.address_bar().is_focused());
        assert_eq!(screen.address_bar().text(), "google.com");
    }

    #[test]
    fn test_cancel_address_restores_label() {
        let mut screen = screen();
        screen.focus_address();
        screen.edit_address("half typed");

        screen.cancel_address();
        assert!(!screen.address_bar().is_focused());
        assert_eq!(screen.address_bar().text(), "google.com");
    }

    #[test]
    fn test_back_and_forward_load_entries() {
        let mut screen = screen();
        screen
            .handle_event(navigated("https://example.com/", None))
            .unwrap();

        assert!(screen.go_back().unwrap());
        assert_eq!(screen.current_url().as_deref(), Some("https://google.com"));
        assert!(screen.can_go_forward());
        assert!(!screen.go_back().unwrap());

        assert!(screen.go_forward().unwrap());
        assert_eq!(
            screen.engine().commands,
            [
                "load https://google.com",
                "load https://google.com",
                "load https://example.com/",
            ]
        );

        // engine confirms the page it was told to load
        screen
            .handle_event(navigated("https://example.com/", None))
            .unwrap();
        let tab = screen.browser().tab("tab-0").unwrap();
        assert_eq!(tab.history.len(), 2);
    }

    #[test]
    fn test_window_open_activates_new_tab() {
        let mut screen = screen();
        screen
            .handle_event(EngineEvent::WindowOpenRequested {
                target_url: "https://popup.example/".to_string(),
            })
            .unwrap();

        assert_eq!(screen.tab_count(), 2);
        assert_eq!(screen.browser().active_tab_id().as_deref(), Some("tab-1"));
        assert_eq!(
            screen.engine().commands.last().unwrap(),
            "load https://popup.example/"
        );
        assert_eq!(screen.address_bar().text(), "popup.example");
    }

    #[test]
    fn test_page_messages() {
        let mut screen = screen();

        screen
            .handle_event(EngineEvent::MessageReceived {
                data: "{not json".to_string(),
            })
            .unwrap();
        assert_eq!(screen.address_bar().text(), "google.com");

        screen
            .handle_event(EngineEvent::MessageReceived {
                data: r#"{"type":"VIDEO_FOUND","url":"https://cdn.example/v.mp4"}"#.to_string(),
            })
            .unwrap();
        assert_eq!(screen.address_bar().text(), "Video found!");
    }

    #[test]
    fn test_snapshot_stored_on_requesting_tab() {
        let mut screen = screen();

        let switcher = screen.open_tab_switcher();
        assert_eq!(screen.snapshots().requests, ["tab-0"]);
        assert_eq!(switcher.rows().len(), 1);

        screen.new_tab().unwrap();
        screen
            .handle_event(EngineEvent::SnapshotCaptured {
                tab_id: "tab-0".to_string(),
                uri: Some("file:///snapshots/tab-0.jpg".to_string()),
            })
            .unwrap();

        let browser = screen.browser();
        assert_eq!(
            browser.tab("tab-0").unwrap().snapshot_uri.as_deref(),
            Some("file:///snapshots/tab-0.jpg")
        );
        assert!(browser.tab("tab-1").unwrap().snapshot_uri.is_none());

        screen
            .handle_event(EngineEvent::SnapshotCaptured {
                tab_id: "tab-0".to_string(),
                uri: None,
            })
            .unwrap();
        assert!(screen.browser().tab("tab-0").unwrap().snapshot_uri.is_some());
    }

    #[test]
    fn test_load_progress_and_stop() {
        let mut screen = screen();

        screen.handle_event(EngineEvent::LoadStarted).unwrap();
        screen
            .handle_event(EngineEvent::LoadProgress { progress: 1.5 })
            .unwrap();
        assert!(screen.page_load().is_loading());
        assert_eq!(screen.page_load().progress(), 1.0);

        screen.stop_loading();
        assert!(!screen.page_load().is_loading());
        assert_eq!(screen.page_load().progress(), 0.0);
        assert_eq!(screen.engine().commands.last().unwrap(), "stop");

        screen.reload();
        assert_eq!(screen.engine().commands.last().unwrap(), "reload");
    }

    #[test]
    fn test_sync_after_switch() {
        let mut screen = screen();
        screen.new_tab().unwrap();
        let loads = screen.engine().commands.len();

        screen.browser().switch_tab("tab-0").unwrap();
        screen.sync();
        assert_eq!(screen.engine().commands.len(), loads + 1);

        screen.sync();
        assert_eq!(screen.engine().commands.len(), loads + 1);
    }

    #[test]
    fn test_commands_ignored_without_active_tab() {
        let mut screen = screen();
        screen.browser().switch_tab("missing").unwrap();
        let before = screen.engine().commands.len();

        assert!(!screen.go_back().unwrap());
        assert!(!screen.go_forward().unwrap());
        assert!(screen.submit_address().unwrap().is_none());
        screen.reload();
        screen.stop_loading();
        screen.open_tab_switcher();
        screen
            .handle_event(navigated("https://example.com/", None))
            .unwrap();

        assert_eq!(screen.engine().commands.len(), before);
        assert!(screen.snapshots().requests.is_empty());
        assert!(!screen.can_go_back());
        assert!(screen.current_url().is_none());
        assert_eq!(screen.tab_count(), 1);
    }
}
