//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use pocket_navigation::DEFAULT_SEARCH_TEMPLATE;

use crate::Result;

pub const DEFAULT_URL: &str = "https://google.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL for tabs opened without an explicit target
    pub default_url: String,
    /// Search engine URL template
    pub search_engine: String,
    /// Session database; `None` keeps tabs in memory only
    pub database_path: Option<PathBuf>,
    /// Polling interval of the injected media probe
    pub video_probe_interval_ms: u64,
    /// Page-side function the probe posts its messages through
    pub message_handler: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            default_url: DEFAULT_URL.to_string(),
            search_engine: DEFAULT_SEARCH_TEMPLATE.to_string(),
            database_path: None,
            video_probe_interval_ms: 2000,
            message_handler: "window.ReactNativeWebView.postMessage".to_string(),
        }
    }

    /// In-memory defaults plus a session database under `data_dir`
    pub fn persistent(data_dir: PathBuf) -> Self {
        Self {
            database_path: Some(data_dir.join("pocket.db")),
            ..Self::new()
        }
    }

    /// Parse host-supplied JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
