//! Session statistics for the monitoring agent.
//!
//! Counters are shared across the keyboard and clipboard contexts and
//! optionally persisted as JSON so `textguard status` can report
//! cumulative figures across sessions.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct MonitorStats {
    key_events: AtomicU64,
    clipboard_snapshots: AtomicU64,
    units_evaluated: AtomicU64,
    alerts_raised: AtomicU64,
    screenshots_captured: AtomicU64,
    session_start: DateTime<Utc>,
    persist_path: Option<PathBuf>,
}

impl MonitorStats {
    pub fn new() -> Self {
        Self {
            key_events: AtomicU64::new(0),
            clipboard_snapshots: AtomicU64::new(0),
            units_evaluated: AtomicU64::new(0),
            alerts_raised: AtomicU64::new(0),
            screenshots_captured: AtomicU64::new(0),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create a stats tracker that persists to `path`, seeding counters
    /// from any previous session found there.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut stats = Self::new();
        stats.persist_path = Some(path);
        if let Err(e) = stats.load() {
            eprintln!("Note: could not load previous session stats: {e}");
        }
        stats
    }

    pub fn record_key_event(&self) {
        self.key_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_clipboard_snapshot(&self) {
        self.clipboard_snapshots.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unit_evaluated(&self) {
        self.units_evaluated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alert(&self) {
        self.alerts_raised.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_screenshot(&self) {
        self.screenshots_captured.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            key_events: self.key_events.load(Ordering::Relaxed),
            clipboard_snapshots: self.clipboard_snapshots.load(Ordering::Relaxed),
            units_evaluated: self.units_evaluated.load(Ordering::Relaxed),
            alerts_raised: self.alerts_raised.load(Ordering::Relaxed),
            screenshots_captured: self.screenshots_captured.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Summary string for end-of-session display.
    pub fn summary(&self) -> String {
        let s = self.snapshot();
        format!(
            "Session Statistics:\n\
             - Key events processed: {}\n\
             - Clipboard snapshots: {}\n\
             - Text units evaluated: {}\n\
             - Alerts raised: {}\n\
             - Screenshots captured: {}\n\
             - Session duration: {} seconds",
            s.key_events,
            s.clipboard_snapshots,
            s.units_evaluated,
            s.alerts_raised,
            s.screenshots_captured,
            s.session_duration_secs
        )
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let s = self.snapshot();
            let persisted = PersistedStats {
                key_events: s.key_events,
                clipboard_snapshots: s.clipboard_snapshots,
                units_evaluated: s.units_evaluated,
                alerts_raised: s.alerts_raised,
                screenshots_captured: s.screenshots_captured,
                last_updated: Utc::now(),
            };
            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    fn load(&mut self) -> std::io::Result<()> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;
                self.key_events.store(persisted.key_events, Ordering::Relaxed);
                self.clipboard_snapshots
                    .store(persisted.clipboard_snapshots, Ordering::Relaxed);
                self.units_evaluated
                    .store(persisted.units_evaluated, Ordering::Relaxed);
                self.alerts_raised
                    .store(persisted.alerts_raised, Ordering::Relaxed);
                self.screenshots_captured
                    .store(persisted.screenshots_captured, Ordering::Relaxed);
            }
        }
        Ok(())
    }
}

impl Default for MonitorStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub key_events: u64,
    pub clipboard_snapshots: u64,
    pub units_evaluated: u64,
    pub alerts_raised: u64,
    pub screenshots_captured: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    key_events: u64,
    clipboard_snapshots: u64,
    units_evaluated: u64,
    alerts_raised: u64,
    screenshots_captured: u64,
    last_updated: DateTime<Utc>,
}

/// Thread-safe shared stats handle.
pub type SharedMonitorStats = Arc<MonitorStats>;

pub fn create_shared_stats() -> SharedMonitorStats {
    Arc::new(MonitorStats::new())
}

pub fn create_shared_stats_with_persistence(path: PathBuf) -> SharedMonitorStats {
    Arc::new(MonitorStats::with_persistence(path))
}
