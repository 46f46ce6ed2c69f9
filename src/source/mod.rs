//! Input capability interfaces and their backends.
//!
//! Platform-specific keyboard hooks, clipboard access, and screen capture
//! are deliberately kept behind small traits so backends stay swappable.
//! The crate ships a line-oriented terminal keyboard backend and no-op
//! clipboard/screen backends; real OS hooks plug in the same way.

pub mod noop;
pub mod terminal;
pub mod types;

use std::path::Path;

use crossbeam_channel::Receiver;

pub use noop::{NoopClipboard, NoopScreenCapture, ScriptedClipboard};
pub use terminal::TerminalKeyboard;
pub use types::{KeyEvent, TextSource, TextUnit};

/// Errors raised by input backends.
#[derive(Debug)]
pub enum SourceError {
    AlreadyRunning,
    /// The backend cannot provide this capability on the current platform.
    Unsupported,
    Io(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::AlreadyRunning => write!(f, "source is already running"),
            SourceError::Unsupported => write!(f, "capability not supported on this platform"),
            SourceError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e.to_string())
    }
}

/// A source of raw keyboard events.
///
/// Backends deliver events over a channel from their own capture context;
/// the dispatcher consumes them one at a time.
pub trait KeyboardSource {
    /// Begin delivering events.
    fn start(&mut self) -> Result<(), SourceError>;

    /// Stop delivering events. Idempotent.
    fn stop(&mut self);

    /// The receiving end of the event channel.
    fn events(&self) -> &Receiver<KeyEvent>;
}

/// Read access to the system clipboard.
pub trait ClipboardReader {
    /// Return the current clipboard text, or `None` when the clipboard is
    /// empty or holds non-text content.
    fn read_text(&mut self) -> Result<Option<String>, SourceError>;
}

/// Capture the screen to an image file.
pub trait ScreenCapture {
    /// Write a screenshot to `path`. Best-effort; callers log failures and
    /// carry on.
    fn capture(&self, path: &Path) -> Result<(), SourceError>;
}
