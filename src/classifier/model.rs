//! Pre-trained suspicious-text model loaded from a versioned JSON artifact.
//!
//! The artifact is produced by an external training process and describes a
//! logistic regression over l2-normalized tf-idf features. Loading is eager
//! and happens once at startup; a missing or corrupt artifact is fatal
//! because the agent must not monitor without a working classifier.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::{Classification, ClassifierError, TextClassifier};

/// Artifact schema version this build understands.
pub const MODEL_SCHEMA_VERSION: u32 = 1;

/// On-disk artifact layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    /// Class labels; must contain "suspicious".
    pub classes: Vec<String>,
    /// Term → feature index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    pub idf: Vec<f64>,
    /// Logistic weight per feature index; positive pushes toward suspicious.
    pub weights: Vec<f64>,
    pub intercept: f64,
}

/// A loaded, immutable suspicious-text classifier.
#[derive(Debug, Clone)]
pub struct LinearModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Load and validate a model artifact from `path`.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::Io(format!("{}: {e}", path.display())))?;
        let artifact: ModelArtifact =
            serde_json::from_str(&content).map_err(|e| ClassifierError::Parse(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    /// Build a model from an in-memory artifact, validating its shape.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ClassifierError> {
        if artifact.schema_version != MODEL_SCHEMA_VERSION {
            return Err(ClassifierError::SchemaVersion {
                found: artifact.schema_version,
                expected: MODEL_SCHEMA_VERSION,
            });
        }
        if !artifact.classes.iter().any(|c| c == "suspicious") {
            return Err(ClassifierError::Invalid(
                "artifact has no 'suspicious' class".to_string(),
            ));
        }
        let features = artifact.vocabulary.len();
        if artifact.idf.len() != features || artifact.weights.len() != features {
            return Err(ClassifierError::Invalid(format!(
                "dimension mismatch: {} terms, {} idf, {} weights",
                features,
                artifact.idf.len(),
                artifact.weights.len()
            )));
        }
        if let Some(&idx) = artifact.vocabulary.values().find(|&&i| i >= features) {
            return Err(ClassifierError::Invalid(format!(
                "vocabulary index {idx} out of range for {features} features"
            )));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            weights: artifact.weights,
            intercept: artifact.intercept,
        })
    }

    /// Tokenize normalized text into lowercase alphanumeric terms.
    fn tokenize(text: &str) -> impl Iterator<Item = &str> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
    }

    /// Compute the l2-normalized tf-idf vector as (feature index, value).
    fn vectorize(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in Self::tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in vector.iter_mut() {
                *v /= norm;
            }
        }
        vector
    }

    fn sigmoid(score: f64) -> f64 {
        1.0 / (1.0 + (-score).exp())
    }
}

impl TextClassifier for LinearModel {
    fn classify(&self, normalized: &str) -> Result<Classification, ClassifierError> {
        let vector = self.vectorize(normalized);
        let score: f64 = vector
            .iter()
            .map(|&(idx, value)| self.weights[idx] * value)
            .sum::<f64>()
            + self.intercept;

        let confidence = Self::sigmoid(score);
        Ok(Classification {
            // Strict threshold: exactly 0.5 is not flagged.
            suspicious: confidence > 0.5,
            confidence,
        })
    }

    fn explain(&self, normalized: &str) -> Option<String> {
        let vector = self.vectorize(normalized);
        let mut contributions: Vec<(&str, f64)> = Vec::new();
        for (term, &idx) in &self.vocabulary {
            if let Some(&(_, value)) = vector.iter().find(|&&(i, _)| i == idx) {
                let contribution = self.weights[idx] * value;
                if contribution > 0.0 {
                    contributions.push((term.as_str(), contribution));
                }
            }
        }
        if contributions.is_empty() {
            return None;
        }

        contributions.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut explanation =
            String::from("This text was flagged because it contains concerning terms:\n");
        for (term, score) in contributions.iter().take(5) {
            explanation.push_str(&format!("- '{term}' (importance: {score:.4})\n"));
        }
        Some(explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_artifact() -> ModelArtifact {
        let vocabulary = [("password", 0usize), ("bypass", 1), ("report", 2)]
            .into_iter()
            .map(|(t, i)| (t.to_string(), i))
            .collect();
        ModelArtifact {
            schema_version: MODEL_SCHEMA_VERSION,
            classes: vec!["normal".to_string(), "suspicious".to_string()],
            vocabulary,
            idf: vec![1.0, 1.0, 1.0],
            weights: vec![4.0, 4.0, -4.0],
            intercept: -1.0,
        }
    }

    #[test]
    fn test_flags_weighted_terms() {
        let model = LinearModel::from_artifact(test_artifact()).unwrap();
        let result = model.classify("my password is admin123").unwrap();
        assert!(result.suspicious);
        assert!(result.confidence > 0.5);

        let result = model.classify("working on the quarterly report").unwrap();
        assert!(!result.suspicious);
    }

    #[test]
    fn test_unknown_terms_fall_back_to_intercept() {
        let model = LinearModel::from_artifact(test_artifact()).unwrap();
        let result = model.classify("completely unrelated words").unwrap();
        assert!(!result.suspicious);
        assert!((result.confidence - LinearModel::sigmoid(-1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Zero score gives a confidence of exactly 0.5, which must not flag.
        let mut artifact = test_artifact();
        artifact.intercept = 0.0;
        artifact.weights = vec![0.0, 0.0, 0.0];
        let model = LinearModel::from_artifact(artifact).unwrap();

        let result = model.classify("password").unwrap();
        assert!((result.confidence - 0.5).abs() < 1e-12);
        assert!(!result.suspicious);
    }

    #[test]
    fn test_rejects_wrong_schema_version() {
        let mut artifact = test_artifact();
        artifact.schema_version = 99;
        assert!(matches!(
            LinearModel::from_artifact(artifact),
            Err(ClassifierError::SchemaVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let mut artifact = test_artifact();
        artifact.idf.pop();
        assert!(matches!(
            LinearModel::from_artifact(artifact),
            Err(ClassifierError::Invalid(_))
        ));
    }

    #[test]
    fn test_explain_names_top_terms() {
        let model = LinearModel::from_artifact(test_artifact()).unwrap();
        let explanation = model.explain("password bypass").unwrap();
        assert!(explanation.contains("password"));
        assert!(explanation.contains("bypass"));
        assert!(!explanation.contains("report"));
    }

    #[test]
    fn test_explain_none_without_contributing_terms() {
        let model = LinearModel::from_artifact(test_artifact()).unwrap();
        assert!(model.explain("nothing known here").is_none());
    }

    #[test]
    fn test_load_missing_artifact_fails() {
        let err = LinearModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ClassifierError::Io(_)));
    }
}
