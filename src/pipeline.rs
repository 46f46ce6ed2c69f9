//! The alert pipeline: classification, deduplication, and alert side effects.
//!
//! Both the keyboard dispatcher and the clipboard watcher call
//! [`AlertPipeline::evaluate`], so the pipeline owns the process-wide
//! dedup slot behind a mutex. Evaluation never fails outward: classifier
//! errors degrade to "not suspicious" and side-effect failures are logged
//! and skipped, because continuous monitoring outweighs the correctness of
//! any single evaluation.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;

use crate::classifier::{normalize, TextClassifier};
use crate::logfile::LogFile;
use crate::source::{ScreenCapture, TextUnit};
use crate::stats::SharedMonitorStats;

/// Suspicious iff the classifier's suspicious-class probability is
/// strictly greater than this.
pub const SUSPICION_THRESHOLD: f64 = 0.5;

/// Filename pattern the downstream dashboard lists screenshots by.
const SCREENSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Outcome of evaluating one text unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Empty after normalization, or identical to the last evaluated text.
    Skipped,
    /// Evaluated and not suspicious (includes classifier failures).
    Clean,
    /// Suspicious; an alert record was appended.
    Alert { confidence: f64 },
}

pub struct AlertPipeline {
    classifier: Box<dyn TextClassifier + Send + Sync>,
    screen: Box<dyn ScreenCapture + Send + Sync>,
    alert_log: LogFile,
    screenshot_dir: PathBuf,
    /// Last evaluated normalized text across all sources. Single slot by
    /// design: alternating repeats (A, B, A, ...) re-alert.
    last_evaluated: Mutex<String>,
    stats: SharedMonitorStats,
}

impl AlertPipeline {
    pub fn new(
        classifier: Box<dyn TextClassifier + Send + Sync>,
        screen: Box<dyn ScreenCapture + Send + Sync>,
        alert_log: LogFile,
        screenshot_dir: PathBuf,
        stats: SharedMonitorStats,
    ) -> Self {
        Self {
            classifier,
            screen,
            alert_log,
            screenshot_dir,
            last_evaluated: Mutex::new(String::new()),
            stats,
        }
    }

    /// Evaluate one committed text unit.
    ///
    /// Normalizes, debounces against the last evaluated text, classifies,
    /// and on a suspicious result appends exactly one alert record and
    /// attempts exactly one screenshot.
    pub fn evaluate(&self, unit: &TextUnit) -> Verdict {
        let normalized = normalize(&unit.text);
        if normalized.is_empty() {
            return Verdict::Skipped;
        }

        // The lock covers only the read-compare-write of the dedup slot;
        // a slow classifier call must stall only the invoking context.
        {
            let mut last = self.last_evaluated.lock().unwrap_or_else(|e| e.into_inner());
            if *last == normalized {
                return Verdict::Skipped;
            }
            last.clear();
            last.push_str(&normalized);
        }

        self.stats.record_unit_evaluated();

        let classification = match self.classifier.classify(&normalized) {
            Ok(c) => c,
            Err(e) => {
                // Classification failure must never crash the capture loop.
                eprintln!("Classifier error (treating as not suspicious): {e}");
                return Verdict::Clean;
            }
        };

        if classification.confidence <= SUSPICION_THRESHOLD {
            return Verdict::Clean;
        }

        self.raise_alert(unit, classification.confidence, &normalized);
        Verdict::Alert {
            confidence: classification.confidence,
        }
    }

    /// Append the alert record and fire the best-effort side effects.
    fn raise_alert(&self, unit: &TextUnit, confidence: f64, normalized: &str) {
        println!(
            "ALERT: suspicious {} activity: '{}' (confidence: {:.1}%)",
            unit.source,
            unit.text,
            confidence * 100.0
        );

        if let Err(e) = self.alert_log.append_alert(&unit.text, confidence) {
            eprintln!("Error writing alert record: {e}");
        }
        self.stats.record_alert();

        if let Some(explanation) = self.classifier.explain(normalized) {
            println!("{explanation}");
        }

        match self.take_screenshot() {
            Ok(path) => {
                self.stats.record_screenshot();
                println!("Screenshot saved: {}", path.display());
            }
            Err(e) => eprintln!("Error taking screenshot: {e}"),
        }
    }

    fn take_screenshot(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&self.screenshot_dir)?;
        let path = self.screenshot_dir.join(format!(
            "screenshot_{}.png",
            Local::now().format(SCREENSHOT_TIMESTAMP_FORMAT)
        ));
        self.screen.capture(&path)?;
        Ok(path)
    }
}
