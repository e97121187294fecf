//! Pocket Core
//!
//! Coordination layer for the Pocket browser. The core owns all tab state;
//! the host web view only renders what it is told and reports events back.

mod browser;
mod config;
mod engine;
mod error;
mod load;
mod screen;
pub mod script;
mod switcher;

pub use browser::Browser;
pub use config::{Config, DEFAULT_URL};
pub use engine::{EngineEvent, RenderEngine, SnapshotCapture};
pub use error::CoreError;
pub use load::{LoadState, PageLoad};
pub use screen::TabScreen;
pub use script::{PageMessage, VIDEO_FOUND_NOTICE};
pub use switcher::{tab_summaries, TabSummary, TabSwitcher};

// Re-export core components
pub use pocket_navigation::{
    display_label, AddressBar, InputResolution, InputResolver, NavigationError,
};
pub use pocket_storage::{Database, StorageError};
pub use pocket_tabs::{
    BrowserTab, IdGenerator, SequentialIds, TabError, TabHistory, TabStore, TabUpdate,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if fmt().with_env_filter(filter).with_target(true).try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
}
