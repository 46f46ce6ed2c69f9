//! End-to-end tests for the capture-buffer-classify-alert pipeline,
//! driven through a real model artifact loaded from disk.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use textguard_agent::{
    classifier::{LinearModel, MODEL_SCHEMA_VERSION},
    clipboard::ClipboardWatcher,
    logfile::LogFile,
    pipeline::{AlertPipeline, Verdict},
    source::{ScreenCapture, ScriptedClipboard, SourceError, TextUnit},
    stats::create_shared_stats,
    SentenceBuffer,
};

/// Write a small but real model artifact: high positive weights on
/// credential-themed terms, a negative intercept for everything else.
fn write_model_artifact(path: &Path) {
    let artifact = serde_json::json!({
        "schema_version": MODEL_SCHEMA_VERSION,
        "classes": ["normal", "suspicious"],
        "vocabulary": {"password": 0, "bypass": 1, "credentials": 2, "hello": 3, "world": 4},
        "idf": [1.0, 1.0, 1.0, 1.0, 1.0],
        "weights": [6.0, 6.0, 6.0, 4.0, 4.0],
        "intercept": -2.0
    });
    std::fs::write(path, serde_json::to_string_pretty(&artifact).unwrap()).unwrap();
}

struct CountingCapture {
    attempts: Arc<AtomicUsize>,
}

impl ScreenCapture for CountingCapture {
    fn capture(&self, path: &Path) -> Result<(), SourceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        // Stand in for a real backend by writing an empty artifact file.
        std::fs::write(path, b"").map_err(SourceError::from)
    }
}

fn build_pipeline(dir: &Path) -> (Arc<AlertPipeline>, Arc<AtomicUsize>) {
    let model_path = dir.join("suspicious_classifier.json");
    write_model_artifact(&model_path);
    let model = LinearModel::load(&model_path).expect("artifact loads");

    let attempts = Arc::new(AtomicUsize::new(0));
    let pipeline = Arc::new(AlertPipeline::new(
        Box::new(model),
        Box::new(CountingCapture {
            attempts: attempts.clone(),
        }),
        LogFile::open(dir.join("alert_logs.txt")).unwrap(),
        dir.join("screens"),
        create_shared_stats(),
    ));
    (pipeline, attempts)
}

fn alert_lines(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("alert_logs.txt"))
        .unwrap_or_default()
        .lines()
        .filter(|l| l.starts_with("[ALERT]"))
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn typed_sentence_produces_one_alert_and_one_screenshot() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, attempts) = build_pipeline(dir.path());

    // Type "hello world" key by key, then commit on Enter.
    let mut buffer = SentenceBuffer::new();
    for ch in "hello world".chars() {
        buffer.append(ch);
    }
    let unit = buffer.commit();
    assert_eq!(unit.text, "hello world");
    assert!(buffer.is_empty());

    let verdict = pipeline.evaluate(&unit);
    assert!(matches!(verdict, Verdict::Alert { confidence } if confidence > 0.5));

    let alerts = alert_lines(dir.path());
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("→ hello world (confidence:"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    // The screenshot artifact follows the dashboard's filename pattern.
    let shots: Vec<String> = std::fs::read_dir(dir.path().join("screens"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(shots.len(), 1);
    assert!(shots[0].starts_with("screenshot_"));
    assert!(shots[0].ends_with(".png"));
}

#[test]
fn benign_sentence_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, attempts) = build_pipeline(dir.path());

    let verdict = pipeline.evaluate(&TextUnit::keyboard("going for lunch"));
    assert_eq!(verdict, Verdict::Clean);
    assert!(alert_lines(dir.path()).is_empty());
    assert_eq!(attempts.load(Ordering::SeqCst), 0);
}

#[test]
fn repeated_evaluation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, _) = build_pipeline(dir.path());

    assert!(matches!(
        pipeline.evaluate(&TextUnit::keyboard("my password is admin123")),
        Verdict::Alert { .. }
    ));
    assert_eq!(
        pipeline.evaluate(&TextUnit::keyboard("my password is admin123")),
        Verdict::Skipped
    );
    assert_eq!(
        pipeline.evaluate(&TextUnit::clipboard("My Password is Admin123")),
        Verdict::Skipped
    );
    assert_eq!(alert_lines(dir.path()).len(), 1);
}

#[test]
fn clipboard_unchanged_for_twenty_polls_logs_once() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, attempts) = build_pipeline(dir.path());

    let reader = ScriptedClipboard::new(vec![Ok(Some(
        "send me the credentials".to_string(),
    ))]);
    let mut watcher = ClipboardWatcher::new(
        Box::new(reader),
        LogFile::open(dir.path().join("clipboard_logs.txt")).unwrap(),
        pipeline,
        create_shared_stats(),
        Duration::from_secs(1),
    );

    for _ in 0..20 {
        watcher.tick();
    }

    let clipboard_log =
        std::fs::read_to_string(dir.path().join("clipboard_logs.txt")).unwrap();
    assert_eq!(clipboard_log.lines().count(), 1);
    assert!(clipboard_log
        .lines()
        .next()
        .unwrap()
        .ends_with(" - send me the credentials"));

    // The repeated polls were debounced: one alert, one screenshot.
    assert_eq!(alert_lines(dir.path()).len(), 1);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn clipboard_and_keyboard_share_the_dedup_slot() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, _) = build_pipeline(dir.path());

    let reader = ScriptedClipboard::new(vec![Ok(Some("bypass the checks".to_string()))]);
    let mut watcher = ClipboardWatcher::new(
        Box::new(reader),
        LogFile::open(dir.path().join("clipboard_logs.txt")).unwrap(),
        pipeline.clone(),
        create_shared_stats(),
        Duration::from_secs(1),
    );
    watcher.tick();

    // The keyboard repeating the clipboard text is skipped, and vice versa.
    assert_eq!(
        pipeline.evaluate(&TextUnit::keyboard("bypass the checks")),
        Verdict::Skipped
    );
    assert_eq!(alert_lines(dir.path()).len(), 1);
}

#[test]
fn missing_artifact_fails_before_any_monitoring() {
    let dir = tempfile::tempdir().unwrap();
    let err = LinearModel::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("IO error"));
}

#[test]
fn corrupt_artifact_fails_before_any_monitoring() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suspicious_classifier.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(LinearModel::load(&path).is_err());
}
