//! The player-facing status message.

use serde::{Deserialize, Serialize};

/// Message shown before the first move.
pub const INITIAL_MESSAGE: &str = "Start the game by clicking on two tiles! ";

/// Multi-line status text. Lines are separated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    text: String,
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self {
            text: INITIAL_MESSAGE.to_owned(),
        }
    }
}

impl StatusMessage {
    /// Replaces the whole message.
    pub fn set(&mut self, line: impl Into<String>) {
        self.text = line.into();
    }

    /// Appends a line.
    pub fn append(&mut self, line: impl AsRef<str>) {
        self.text.push('\n');
        self.text.push_str(line.as_ref());
    }

    /// Current text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}
