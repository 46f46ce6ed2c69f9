//! Clipboard polling on a fixed interval.
//!
//! The watcher runs as a detached background thread, fully decoupled from
//! keyboard timing. It is fire-and-forget: shutdown abandons the thread
//! rather than draining it. Read failures are logged and the next tick
//! proceeds normally.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::logfile::LogFile;
use crate::pipeline::AlertPipeline;
use crate::source::{ClipboardReader, TextUnit};
use crate::stats::SharedMonitorStats;

/// After this many unchanged polls, re-submit the current value once and
/// reset the counter. The global dedup drops the re-submission, so this is
/// a liveness heartbeat with no observable output.
const HEARTBEAT_POLLS: u32 = 15;

pub struct ClipboardWatcher {
    reader: Box<dyn ClipboardReader + Send>,
    clipboard_log: LogFile,
    pipeline: Arc<AlertPipeline>,
    stats: SharedMonitorStats,
    poll_interval: Duration,
    last_seen: Option<String>,
    unchanged_polls: u32,
}

impl ClipboardWatcher {
    pub fn new(
        reader: Box<dyn ClipboardReader + Send>,
        clipboard_log: LogFile,
        pipeline: Arc<AlertPipeline>,
        stats: SharedMonitorStats,
        poll_interval: Duration,
    ) -> Self {
        Self {
            reader,
            clipboard_log,
            pipeline,
            stats,
            poll_interval,
            last_seen: None,
            unchanged_polls: 0,
        }
    }

    /// Perform one poll of the clipboard.
    ///
    /// On a changed value: append one timestamped clipboard-log line,
    /// update the last-seen value, and route a clipboard text unit into
    /// the pipeline. Unchanged values only advance the heartbeat counter.
    pub fn tick(&mut self) {
        let current = match self.reader.read_text() {
            Ok(Some(text)) => text,
            Ok(None) => return,
            Err(e) => {
                eprintln!("Clipboard read error: {e}");
                return;
            }
        };

        let changed = self.last_seen.as_deref() != Some(current.as_str());

        if changed {
            self.unchanged_polls = 0;
            if let Err(e) = self.clipboard_log.append_timestamped(&current) {
                eprintln!("Error writing clipboard log: {e}");
            }
            self.stats.record_clipboard_snapshot();
            self.last_seen = Some(current.clone());
            self.pipeline.evaluate(&TextUnit::clipboard(current));
        } else {
            self.unchanged_polls += 1;
            if self.unchanged_polls >= HEARTBEAT_POLLS {
                self.unchanged_polls = 0;
                // Re-affirm liveness; the dedup slot makes this a no-op.
                self.pipeline.evaluate(&TextUnit::clipboard(current));
            }
        }
    }

    /// Run the poll loop forever on the configured interval.
    pub fn run(mut self) {
        loop {
            self.tick();
            thread::sleep(self.poll_interval);
        }
    }

    /// Spawn the watcher on a detached background thread.
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }
}
