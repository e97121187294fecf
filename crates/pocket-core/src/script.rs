//! Injected page script and the messages it posts back
//!
//! The probe polls the page for a `<video>` element with a resolved source,
//! reports the first one it finds and stops polling.

use serde::{Deserialize, Serialize};

/// Address bar text shown once the probe reports a video
pub const VIDEO_FOUND_NOTICE: &str = "Video found!";

/// Build the media probe for injection into every page.
///
/// `post_message` is the page-side function that forwards a string to the
/// host, e.g. `window.ReactNativeWebView.postMessage`.
pub fn video_probe_script(interval_ms: u64, post_message: &str) -> String {
    format!(
        r#"(function() {{
  const timer = setInterval(() => {{
    for (const video of document.querySelectorAll('video')) {{
      if (video.currentSrc) {{
        clearInterval(timer);
        {post_message}(JSON.stringify({{ type: 'VIDEO_FOUND', url: video.currentSrc }}));
        return;
      }}
    }}
  }}, {interval_ms});
}})();
true;"#
    )
}

/// Messages the page posts to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageMessage {
    VideoFound { url: String },
}

impl PageMessage {
    pub fn parse(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}
