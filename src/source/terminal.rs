//! Line-oriented terminal keyboard backend.
//!
//! Reads lines from stdin on a background thread and synthesizes the raw
//! key events the dispatcher expects: one [`KeyEvent`] per character, an
//! `Enter` after each line, and an `Escape` on end of input. This is the
//! reference backend; OS-level keyboard hooks implement the same trait.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::source::{KeyEvent, KeyboardSource, SourceError};

pub struct TerminalKeyboard {
    sender: Sender<KeyEvent>,
    receiver: Receiver<KeyEvent>,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl TerminalKeyboard {
    pub fn new() -> Self {
        // Bounded to keep a stalled consumer from growing memory.
        let (sender, receiver) = bounded(10_000);
        Self {
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Translate one input line into key events, ending with `Enter`.
    fn emit_line(sender: &Sender<KeyEvent>, line: &str) {
        for ch in line.chars() {
            let event = match ch {
                ' ' => KeyEvent::Space,
                '\t' => KeyEvent::Tab,
                c if !c.is_control() => KeyEvent::Char(c),
                _ => continue,
            };
            if sender.send(event).is_err() {
                return;
            }
        }
        let _ = sender.send(KeyEvent::Enter);
    }
}

impl Default for TerminalKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardSource for TerminalKeyboard {
    fn start(&mut self) -> Result<(), SourceError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(SourceError::AlreadyRunning);
        }
        self.running.store(true, Ordering::SeqCst);

        let sender = self.sender.clone();
        let running = self.running.clone();

        let handle = thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                if !running.load(Ordering::SeqCst) {
                    return;
                }
                match line {
                    Ok(line) => Self::emit_line(&sender, &line),
                    Err(e) => {
                        eprintln!("Keyboard source read error: {e}");
                        break;
                    }
                }
            }
            // End of input is treated as the shutdown signal.
            let _ = sender.send(KeyEvent::Escape);
            running.store(false, Ordering::SeqCst);
        });

        self.thread_handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        // The reader thread may be blocked on stdin; it is detached rather
        // than joined so shutdown never waits on user input.
        self.thread_handle.take();
    }

    fn events(&self) -> &Receiver<KeyEvent> {
        &self.receiver
    }
}
