//! Page load state
//!
//! ```text
//! Idle
//!   ↓ load started
//! Loading (progress 0..=1)
//!   ↓ load ended / stop
//! Idle
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing in flight
    Idle,
    /// The engine is fetching or rendering a page
    Loading,
}

/// Drives the loading indicator of the active screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLoad {
    state: LoadState,
    progress: f64,
}

impl PageLoad {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            progress: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Record reported progress, clamped to `0..=1`
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
    }

    /// Load finished; the last progress value is kept for the fade-out
    pub fn finish(&mut self) {
        self.state = LoadState::Idle;
    }

    /// Load stopped by the user
    pub fn cancel(&mut self) {
        self.state = LoadState::Idle;
        self.progress = 0.0;
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }
}

impl Default for PageLoad {
    fn default() -> Self {
        Self::new()
    }
}
