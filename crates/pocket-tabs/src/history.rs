//! Per-tab navigation history
//!
//! An ordered list of visited URLs plus a cursor marking the displayed entry.
//! The list is never empty and the cursor always points inside it; both
//! constructors enforce this, so every `TabHistory` value is valid.

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct TabHistory {
    index: usize,
    entries: Vec<String>,
}

#[derive(Deserialize)]
struct RawHistory {
    index: usize,
    entries: Vec<String>,
}

impl TryFrom<RawHistory> for TabHistory {
    type Error = TabError;

    fn try_from(raw: RawHistory) -> Result<Self> {
        Self::from_parts(raw.index, raw.entries)
    }
}

impl TabHistory {
    /// History seeded with a single entry
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            index: 0,
            entries: vec![url.into()],
        }
    }

    pub fn from_parts(index: usize, entries: Vec<String>) -> Result<Self> {
        if index >= entries.len() {
            return Err(TabError::InvalidHistory {
                index,
                len: entries.len(),
            });
        }

        Ok(Self { index, entries })
    }

    /// Navigate to `url` from the current position.
    ///
    /// Repeating the current entry is a no-op. Otherwise any forward entries
    /// are dropped before `url` is appended. Returns whether history changed.
    pub fn record_navigation(&mut self, url: &str) -> bool {
        if self.current() == url {
            return false;
        }

        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
        true
    }

    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn go_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// URL at the cursor
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; history always holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
