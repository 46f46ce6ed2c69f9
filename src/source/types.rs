//! Event and text-unit types flowing through the monitoring pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw keyboard event as delivered by a [`KeyboardSource`](super::KeyboardSource).
///
/// Only the variants the sentence buffer cares about are modeled; anything
/// else a backend sees (modifiers, function keys) is dropped at the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character.
    Char(char),
    Space,
    Tab,
    Enter,
    Backspace,
    /// Terminal signal: the user requested shutdown.
    Escape,
}

/// Where a committed text unit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    Keyboard,
    Clipboard,
}

impl std::fmt::Display for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextSource::Keyboard => write!(f, "keyboard"),
            TextSource::Clipboard => write!(f, "clipboard"),
        }
    }
}

/// One committed utterance: a full keyboard sentence or a clipboard snapshot.
///
/// Text units are ephemeral; they are consumed once by the alert pipeline
/// and never persisted as such.
#[derive(Debug, Clone)]
pub struct TextUnit {
    pub text: String,
    pub source: TextSource,
    pub captured_at: DateTime<Utc>,
}

impl TextUnit {
    /// Create a text unit captured now.
    pub fn new(text: impl Into<String>, source: TextSource) -> Self {
        Self {
            text: text.into(),
            source,
            captured_at: Utc::now(),
        }
    }

    pub fn keyboard(text: impl Into<String>) -> Self {
        Self::new(text, TextSource::Keyboard)
    }

    pub fn clipboard(text: impl Into<String>) -> Self {
        Self::new(text, TextSource::Clipboard)
    }
}
