//! No-op and scripted backends.
//!
//! These exist so the crate compiles and runs on targets without clipboard
//! or screen-capture hooks, and so tests can drive the watcher with a
//! predetermined sequence of clipboard states.

use std::path::Path;

use crate::source::{ClipboardReader, ScreenCapture, SourceError};

/// A clipboard reader that never sees any content.
#[derive(Debug, Default)]
pub struct NoopClipboard;

impl ClipboardReader for NoopClipboard {
    fn read_text(&mut self) -> Result<Option<String>, SourceError> {
        Ok(None)
    }
}

/// A screen-capture backend for targets without a capture hook.
///
/// Always fails with [`SourceError::Unsupported`]; the alert pipeline logs
/// the failure and the alert record is still written.
#[derive(Debug, Default)]
pub struct NoopScreenCapture;

impl ScreenCapture for NoopScreenCapture {
    fn capture(&self, _path: &Path) -> Result<(), SourceError> {
        Err(SourceError::Unsupported)
    }
}

/// A clipboard reader that replays a fixed sequence of reads, then repeats
/// the last state forever. Each entry is one poll result.
pub struct ScriptedClipboard {
    states: Vec<Result<Option<String>, ()>>,
    cursor: usize,
}

impl ScriptedClipboard {
    pub fn new(states: Vec<Result<Option<String>, ()>>) -> Self {
        Self { states, cursor: 0 }
    }
}

impl ClipboardReader for ScriptedClipboard {
    fn read_text(&mut self) -> Result<Option<String>, SourceError> {
        let idx = self.cursor.min(self.states.len().saturating_sub(1));
        self.cursor += 1;
        match self.states.get(idx) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(())) => Err(SourceError::Io("scripted read failure".to_string())),
            None => Ok(None),
        }
    }
}
