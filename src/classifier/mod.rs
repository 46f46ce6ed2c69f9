//! The suspicious-text classification capability.
//!
//! The alert pipeline only depends on the [`TextClassifier`] trait; the
//! shipped implementation is [`LinearModel`], loaded once at startup from
//! a versioned artifact produced by an external training process.

pub mod model;
pub mod normalize;

pub use model::{LinearModel, ModelArtifact, MODEL_SCHEMA_VERSION};
pub use normalize::normalize;

/// Outcome of classifying one normalized text unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// True when the suspicious-class probability exceeds the threshold.
    pub suspicious: bool,
    /// Suspicious-class probability in [0, 1].
    pub confidence: f64,
}

/// Errors from loading or applying a classifier.
#[derive(Debug)]
pub enum ClassifierError {
    Io(String),
    Parse(String),
    SchemaVersion { found: u32, expected: u32 },
    Invalid(String),
    /// The classifier failed on a particular input.
    Prediction(String),
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierError::Io(e) => write!(f, "IO error: {e}"),
            ClassifierError::Parse(e) => write!(f, "Parse error: {e}"),
            ClassifierError::SchemaVersion { found, expected } => {
                write!(f, "Unsupported model schema version {found} (expected {expected})")
            }
            ClassifierError::Invalid(e) => write!(f, "Invalid model artifact: {e}"),
            ClassifierError::Prediction(e) => write!(f, "Prediction error: {e}"),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// A text classifier producing a suspicion verdict for normalized text.
pub trait TextClassifier {
    /// Classify already-normalized text.
    fn classify(&self, normalized: &str) -> Result<Classification, ClassifierError>;

    /// Human-readable explanation of a positive classification, when the
    /// model can provide one.
    fn explain(&self, _normalized: &str) -> Option<String> {
        None
    }
}
