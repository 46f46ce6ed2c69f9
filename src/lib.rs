//! Textguard Agent - real-time suspicious-text monitoring.
//!
//! This library captures keystrokes and clipboard changes, reassembles them
//! into discrete text units, classifies each unit with a pre-trained
//! suspicious-text model, and on a positive match appends an alert record
//! and captures a screenshot.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Textguard Agent                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────────┐   ┌─────────────────┐   │
//! │  │ Keyboard  │──▶│ SentenceBuffer │──▶│                 │   │
//! │  │  Source   │   │  (on Enter)    │   │  AlertPipeline  │   │
//! │  └───────────┘   └────────────────┘   │  normalize      │   │
//! │  ┌───────────┐                        │  dedup          │   │
//! │  │ Clipboard │───────────────────────▶│  classify       │   │
//! │  │  Watcher  │      (on change)       │  alert + shot   │   │
//! │  └───────────┘                        └─────────────────┘   │
//! │        │                                      │              │
//! │        ▼                                      ▼              │
//! │  ┌───────────┐                        ┌─────────────────┐   │
//! │  │ Clipboard │                        │ Alert log +     │   │
//! │  │    Log    │                        │ screenshots     │   │
//! │  └───────────┘                        └─────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Design rule: availability of continuous monitoring outweighs the
//! correctness of any single evaluation. Clipboard read errors, classifier
//! failures, and screenshot failures are logged and degrade to "not
//! suspicious"; only a missing classifier artifact at startup is fatal.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use textguard_agent::{
//!     classifier::LinearModel,
//!     logfile::LogFile,
//!     pipeline::AlertPipeline,
//!     source::{NoopScreenCapture, TextUnit},
//!     stats::create_shared_stats,
//! };
//!
//! let model = LinearModel::load(Path::new("model.json")).expect("model artifact");
//! let pipeline = Arc::new(AlertPipeline::new(
//!     Box::new(model),
//!     Box::new(NoopScreenCapture),
//!     LogFile::open("alert_logs.txt").expect("alert log"),
//!     "screens".into(),
//!     create_shared_stats(),
//! ));
//! pipeline.evaluate(&TextUnit::keyboard("my password is admin123"));
//! ```

pub mod buffer;
pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod dispatcher;
pub mod logfile;
pub mod pipeline;
pub mod source;
pub mod stats;

// Re-export key types at crate root for convenience
pub use buffer::SentenceBuffer;
pub use classifier::{Classification, ClassifierError, LinearModel, TextClassifier};
pub use clipboard::ClipboardWatcher;
pub use config::{Config, ConfigError, SourceConfig};
pub use dispatcher::EventDispatcher;
pub use logfile::LogFile;
pub use pipeline::{AlertPipeline, Verdict, SUSPICION_THRESHOLD};
pub use source::{
    ClipboardReader, KeyEvent, KeyboardSource, ScreenCapture, SourceError, TextSource, TextUnit,
};
pub use stats::{MonitorStats, SharedMonitorStats, StatsSnapshot};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Monitoring declaration that can be displayed to users.
pub const MONITORING_NOTICE: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║             TEXTGUARD AGENT - MONITORING DECLARATION             ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  This agent monitors text input for suspicious content.          ║
║                                                                  ║
║  WHAT IT CAPTURES:                                               ║
║    • Typed characters, assembled into sentences                  ║
║    • Clipboard text whenever it changes                          ║
║    • A screenshot when a suspicious sentence is detected         ║
║                                                                  ║
║  WHERE IT GOES:                                                  ║
║    • Append-only log files on this machine                       ║
║    • No network transmission by this agent                       ║
║                                                                  ║
║  Classification happens locally against a pre-trained model.     ║
║  Run only on machines whose users have consented to monitoring.  ║
║                                                                  ║
║  You can view session statistics anytime with:                   ║
║    textguard status                                              ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitoring_notice_contents() {
        assert!(MONITORING_NOTICE.contains("MONITORING"));
        assert!(MONITORING_NOTICE.contains("WHAT IT CAPTURES"));
        assert!(MONITORING_NOTICE.contains("consented"));
    }
}
