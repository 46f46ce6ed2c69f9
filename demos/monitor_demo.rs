//! Demonstration of the textguard monitoring pipeline.
//!
//! This example shows how to:
//! 1. Build a classifier from an in-memory artifact
//! 2. Wire the alert pipeline with injected capabilities
//! 3. Drive the sentence buffer the way the dispatcher does
//! 4. Observe verdicts and the alert log
//!
//! Run with: cargo run --example monitor_demo

use std::collections::HashMap;
use std::sync::Arc;

use textguard_agent::{
    classifier::{LinearModel, ModelArtifact, MODEL_SCHEMA_VERSION},
    logfile::LogFile,
    pipeline::AlertPipeline,
    source::{NoopScreenCapture, TextUnit},
    stats::create_shared_stats,
    SentenceBuffer, MONITORING_NOTICE,
};

fn demo_model() -> LinearModel {
    let vocabulary: HashMap<String, usize> =
        [("password", 0usize), ("bypass", 1), ("credentials", 2)]
            .into_iter()
            .map(|(t, i)| (t.to_string(), i))
            .collect();

    let artifact = ModelArtifact {
        schema_version: MODEL_SCHEMA_VERSION,
        classes: vec!["normal".to_string(), "suspicious".to_string()],
        vocabulary,
        idf: vec![1.0, 1.0, 1.0],
        weights: vec![5.0, 5.0, 5.0],
        intercept: -2.0,
    };
    LinearModel::from_artifact(artifact).expect("demo artifact is valid")
}

fn main() {
    println!("Textguard Agent - Pipeline Demo");
    println!("===============================");
    println!("{MONITORING_NOTICE}");

    let dir = std::env::temp_dir().join("textguard-demo");
    std::fs::create_dir_all(&dir).expect("temp dir");

    let stats = create_shared_stats();
    let pipeline = Arc::new(AlertPipeline::new(
        Box::new(demo_model()),
        Box::new(NoopScreenCapture),
        LogFile::open(dir.join("alert_logs.txt")).expect("alert log"),
        dir.join("screens"),
        stats.clone(),
    ));

    // Simulate typing a sentence key by key, committed on Enter.
    let mut buffer = SentenceBuffer::new();
    for ch in "my password is admin123".chars() {
        buffer.append(ch);
    }
    let unit = buffer.commit();
    println!("Committed sentence: '{}'", unit.text);
    println!("Verdict: {:?}", pipeline.evaluate(&unit));
    println!();

    // A clipboard snapshot goes through the same pipeline.
    let verdict = pipeline.evaluate(&TextUnit::clipboard("quarterly report draft"));
    println!("Clipboard verdict: {verdict:?}");

    // Re-evaluating the same text is debounced.
    let verdict = pipeline.evaluate(&TextUnit::clipboard("quarterly report draft"));
    println!("Repeated clipboard verdict: {verdict:?}");

    println!();
    println!("{}", stats.summary());
    println!();
    println!("Alert log written to {}", dir.join("alert_logs.txt").display());
}
