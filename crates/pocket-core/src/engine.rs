//! Render engine and snapshot collaborators
//!
//! The web view and the screenshot capability live in the host. The core
//! sends them commands through these traits and receives their results
//! later as [`EngineEvent`]s.

use serde::{Deserialize, Serialize};

/// Commands the active screen sends to the web view
pub trait RenderEngine {
    fn load_uri(&mut self, url: &str);
    fn reload(&mut self);
    fn stop_loading(&mut self);
}

/// Captures a still image of the rendered view
pub trait SnapshotCapture {
    /// Start a capture for `tab_id`; the result arrives as
    /// [`EngineEvent::SnapshotCaptured`].
    fn request_snapshot(&mut self, tab_id: &str);
}

/// Events delivered by the host for the active tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The page committed a navigation (typed, link click or redirect)
    NavigationStateChanged { url: String, title: Option<String> },
    LoadProgress { progress: f64 },
    LoadStarted,
    LoadEnded,
    /// The page asked to open a new window
    WindowOpenRequested { target_url: String },
    /// Message posted by a script running in the page
    MessageReceived { data: String },
    /// Capture finished; `uri` is `None` when nothing was produced
    SnapshotCaptured { tab_id: String, uri: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_host_json() {
        let event: EngineEvent = serde_json::from_str(
            r#"{"event":"navigation_state_changed","url":"https://example.com/","title":"Example"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            EngineEvent::NavigationStateChanged {
                url: "https://example.com/".into(),
                title: Some("Example".into()),
            }
        );

        let event: EngineEvent =
            serde_json::from_str(r#"{"event":"load_progress","progress":0.5}"#).unwrap();
        assert_eq!(event, EngineEvent::LoadProgress { progress: 0.5 });

        let event: EngineEvent = serde_json::from_str(r#"{"event":"load_started"}"#).unwrap();
        assert_eq!(event, EngineEvent::LoadStarted);
    }
}
