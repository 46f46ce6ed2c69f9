//! Append-only log files with per-file write serialization.
//!
//! Each log (keystrokes, clipboard, alerts) is an independent append-only
//! text file. Writes within one file are serialized through a mutex so
//! concurrent contexts never interleave lines; no ordering is guaranteed
//! across files.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;

/// Timestamp format used for human-readable log lines.
const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogFile {
    /// Open (creating if absent) an append-only log file, creating parent
    /// directories as needed.
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one raw line.
    pub fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(file, "{line}")
    }

    /// Append a line prefixed with the current local timestamp:
    /// `<YYYY-MM-DD HH:MM:SS> - <text>`.
    pub fn append_timestamped(&self, text: &str) -> std::io::Result<()> {
        let timestamp = Local::now().format(LINE_TIMESTAMP_FORMAT);
        self.append_line(&format!("{timestamp} - {text}"))
    }

    /// Append an alert line in the dashboard contract format:
    /// `[ALERT] <timestamp> → <text> (confidence: <pct>%)`.
    pub fn append_alert(&self, text: &str, confidence: f64) -> std::io::Result<()> {
        let timestamp = Local::now().format(LINE_TIMESTAMP_FORMAT);
        self.append_line(&format!(
            "[ALERT] {timestamp} → {text} (confidence: {:.1}%)",
            confidence * 100.0
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_parent_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("keystrokes.txt");

        let log = LogFile::open(&path).unwrap();
        log.append_line("first").unwrap();
        log.append_line("second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_timestamped_line_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::open(dir.path().join("clipboard.txt")).unwrap();
        log.append_timestamped("copied text").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let line = content.lines().next().unwrap();
        assert!(line.ends_with(" - copied text"));
        // Leading ISO timestamp: YYYY-MM-DD HH:MM:SS
        assert_eq!(line.split(" - ").next().unwrap().len(), 19);
    }

    #[test]
    fn test_alert_line_contract() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::open(dir.path().join("alerts.txt")).unwrap();
        log.append_alert("my password is admin123", 0.9345).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let line = content.lines().next().unwrap();
        assert!(line.starts_with("[ALERT] "));
        assert!(line.contains(" → my password is admin123 (confidence: 93.5%)"));
    }

    #[test]
    fn test_reopen_appends_rather_than_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.txt");

        LogFile::open(&path).unwrap().append_line("one").unwrap();
        LogFile::open(&path).unwrap().append_line("two").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }
}
