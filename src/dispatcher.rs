//! Top-level event loop routing raw key events into the alert pipeline.
//!
//! The dispatcher owns the keyboard source and the sentence buffer, writes
//! the unconditional raw-keystroke audit log, and hands committed sentences
//! to the shared pipeline. One bad event never terminates monitoring: any
//! error handling a single event is caught and logged at the loop boundary.

use std::sync::Arc;

use crate::buffer::SentenceBuffer;
use crate::logfile::LogFile;
use crate::pipeline::AlertPipeline;
use crate::source::{KeyEvent, KeyboardSource, SourceError};
use crate::stats::SharedMonitorStats;

/// What the loop should do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub struct EventDispatcher {
    keyboard: Box<dyn KeyboardSource>,
    buffer: SentenceBuffer,
    keystroke_log: LogFile,
    pipeline: Arc<AlertPipeline>,
    stats: SharedMonitorStats,
}

impl EventDispatcher {
    pub fn new(
        keyboard: Box<dyn KeyboardSource>,
        keystroke_log: LogFile,
        pipeline: Arc<AlertPipeline>,
        stats: SharedMonitorStats,
    ) -> Self {
        Self {
            keyboard,
            buffer: SentenceBuffer::new(),
            keystroke_log,
            pipeline,
            stats,
        }
    }

    /// Start the keyboard source and consume events until the escape
    /// signal or source disconnect. Blocks the calling thread.
    pub fn run(&mut self) -> Result<(), SourceError> {
        self.keyboard.start()?;
        let receiver = self.keyboard.events().clone();

        for event in receiver.iter() {
            match self.dispatch(event) {
                Flow::Continue => {}
                Flow::Stop => break,
            }
        }

        self.keyboard.stop();
        Ok(())
    }

    /// Handle one event, absorbing per-event errors.
    fn dispatch(&mut self, event: KeyEvent) -> Flow {
        self.stats.record_key_event();
        match self.handle_event(event) {
            Ok(flow) => flow,
            Err(e) => {
                eprintln!("Error handling input event: {e}");
                Flow::Continue
            }
        }
    }

    fn handle_event(&mut self, event: KeyEvent) -> Result<Flow, std::io::Error> {
        match event {
            KeyEvent::Char(ch) => {
                self.buffer.append(ch);
                self.keystroke_log.append_timestamped(&self.buffer.contents())?;
            }
            KeyEvent::Space => {
                self.buffer.append(' ');
                self.keystroke_log.append_timestamped(&self.buffer.contents())?;
            }
            KeyEvent::Tab => {
                self.buffer.append('\t');
                self.keystroke_log.append_timestamped(&self.buffer.contents())?;
            }
            KeyEvent::Backspace => {
                self.buffer.backspace();
                self.keystroke_log.append_timestamped(&self.buffer.contents())?;
            }
            KeyEvent::Enter => {
                let unit = self.buffer.commit();
                self.pipeline.evaluate(&unit);
                self.keystroke_log.append_timestamped("[ENTER]")?;
            }
            KeyEvent::Escape => {
                println!("Monitoring stopped by user.");
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }
}
