//! Address bar edit state
//!
//! Unfocused, the bar shows the host label of the current URL. Focusing it
//! swaps in the full URL for editing; submitting resolves the typed text.

use crate::display::display_label;
use crate::input::{InputResolution, InputResolver};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBar {
    text: String,
    focused: bool,
}

impl AddressBar {
    pub fn new(current_url: &str) -> Self {
        Self {
            text: display_label(current_url).to_string(),
            focused: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Start editing, seeded with the full current URL
    pub fn focus(&mut self, current_url: &str) {
        self.text = current_url.to_string();
        self.focused = true;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Stop editing and go back to the label for `current_url`
    pub fn blur(&mut self, current_url: &str) {
        self.focused = false;
        self.show_url(current_url);
    }

    /// Refresh the label. Ignored while the user is editing.
    pub fn show_url(&mut self, url: &str) {
        if self.focused {
            return;
        }
        self.text = display_label(url).to_string();
    }

    /// Resolve the typed text and stop editing
    pub fn submit(&mut self, resolver: &InputResolver) -> InputResolution {
        let resolution = resolver.resolve(&self.text);
        self.focused = false;
        self.text = display_label(resolution.url()).to_string();
        resolution
    }

    /// Replace the text with a status message, e.g. after page detection
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.text = notice.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_until_focused() {
        let mut bar = AddressBar::new("https://www.example.com/path");
        assert_eq!(bar.text(), "example.com");
        assert!(!bar.is_focused());

        bar.focus("https://www.example.com/path");
        assert!(bar.is_focused());
        assert_eq!(bar.text(), "https://www.example.com/path");
    }

    #[test]
    fn test_show_url_ignored_while_editing() {
        let mut bar = AddressBar::new("https://example.com");
        bar.focus("https://example.com");
        bar.set_text("rust");

        bar.show_url("https://other.example/");
        assert_eq!(bar.text(), "rust");

        bar.blur("https://other.example/");
        assert_eq!(bar.text(), "other.example");
    }

    #[test]
    fn test_submit_resolves_and_blurs() {
        let resolver = InputResolver::new();
        let mut bar = AddressBar::new("https://google.com");
        bar.focus("https://google.com");
        bar.set_text("rust-lang.org");

        let resolution = bar.submit(&resolver);
        assert_eq!(resolution, InputResolution::Navigate("https://rust-lang.org".into()));
        assert!(!bar.is_focused());
        assert_eq!(bar.text(), "rust-lang.org");
    }

    #[test]
    fn test_submit_search() {
        let resolver = InputResolver::new();
        let mut bar = AddressBar::default();
        bar.focus("");
        bar.set_text("what is rust");

        let resolution = bar.submit(&resolver);
        assert!(resolution.is_search());
        assert_eq!(bar.text(), "google.com");
    }

    #[test]
    fn test_notice() {
        let mut bar = AddressBar::new("https://example.com");
        bar.set_notice("Video found!");
        assert_eq!(bar.text(), "Video found!");
    }
}
