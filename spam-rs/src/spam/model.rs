//! Loaded model artifacts
//!
//! The vectorizer and classifier are read once at startup and never mutated.
//! `ModelContext` bundles them behind their traits so callers (and tests) can
//! supply any implementation.

use std::path::Path;
use tracing::info;

use super::classifier::{Classifier, ClassifierArtifact};
use super::vectorizer::{TfidfVectorizer, Vectorizer};
use crate::config::ModelConfig;
use crate::error::{Result, SpamError};

/// Immutable pair of pre-trained artifacts
pub struct ModelContext {
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
}

impl ModelContext {
    /// Bundle a vectorizer and classifier, checking that their shapes agree
    pub fn new(vectorizer: Box<dyn Vectorizer>, classifier: Box<dyn Classifier>) -> Result<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(SpamError::ModelNotLoaded(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load both artifacts from the configured paths
    pub fn load(config: &ModelConfig) -> Result<Self> {
        Self::load_from(&config.vectorizer_path, &config.classifier_path)
    }

    pub fn load_from(vectorizer_path: &Path, classifier_path: &Path) -> Result<Self> {
        let vectorizer = TfidfVectorizer::from_file(vectorizer_path)?;
        let classifier = ClassifierArtifact::from_file(classifier_path)?;

        info!(
            "Loaded {} classifier with {} features",
            classifier.kind(),
            vectorizer.n_features()
        );

        Self::new(Box::new(vectorizer), Box::new(classifier))
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spam::classifier::LogisticRegression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VECTORIZER_JSON: &str = r#"{"vocabulary": {"cash": 0, "hello": 1}, "idf": [2.0, 1.0]}"#;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_files() {
        let vectorizer = write_temp(VECTORIZER_JSON);
        let classifier = write_temp(
            r#"{"kind": "logistic_regression", "classes": [0, 1], "coef": [2.0, -2.0], "intercept": 0.0}"#,
        );

        let context = ModelContext::load_from(vectorizer.path(), classifier.path()).unwrap();
        assert_eq!(context.n_features(), 2);
        assert_eq!(context.classifier().n_features(), 2);
    }

    #[test]
    fn test_shape_mismatch() {
        let vectorizer = TfidfVectorizer::from_json(VECTORIZER_JSON).unwrap();
        let classifier = LogisticRegression {
            classes: vec![0, 1],
            coef: vec![1.0, 1.0, 1.0],
            intercept: 0.0,
        };

        let err = ModelContext::new(Box::new(vectorizer), Box::new(classifier))
            .err()
            .unwrap();
        assert!(matches!(err, SpamError::ModelNotLoaded(_)));
        assert!(err.to_string().contains("expects 3"));
    }

    #[test]
    fn test_missing_file() {
        let vectorizer = write_temp(VECTORIZER_JSON);
        let err = ModelContext::load_from(vectorizer.path(), Path::new("/nonexistent/model.json"))
            .err()
            .unwrap();
        assert!(matches!(err, SpamError::ModelNotLoaded(_)));
    }

    #[test]
    fn test_corrupt_classifier() {
        let vectorizer = write_temp(VECTORIZER_JSON);
        let classifier = write_temp("\u{0}\u{1}pickle");
        let err = ModelContext::load_from(vectorizer.path(), classifier.path())
            .err()
            .unwrap();
        assert!(matches!(err, SpamError::ModelNotLoaded(_)));
    }
}
