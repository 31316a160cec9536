//! Spam detector
//!
//! Owns the normalizer and the inference adapter and runs the full check for
//! one raw message. Startup failures are recorded here once: missing language
//! resources degrade normalization, missing artifacts make every prediction
//! fail with `ModelNotLoaded`.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::adapter::InferenceAdapter;
use super::model::ModelContext;
use super::types::{PredictionResult, Verdict};
use crate::config::Config;
use crate::error::{Result, SpamError};
use crate::text::{LanguageResources, TextNormalizer};

enum ModelState {
    Loaded(InferenceAdapter),
    Unavailable(String),
}

/// Message classification entry point shared by the CLI and HTTP surfaces
pub struct SpamDetector {
    normalizer: TextNormalizer,
    models: ModelState,
}

impl SpamDetector {
    /// Detector backed by loaded artifacts
    pub fn new(normalizer: TextNormalizer, context: Arc<ModelContext>) -> Self {
        Self {
            normalizer,
            models: ModelState::Loaded(InferenceAdapter::new(context)),
        }
    }

    /// Detector whose artifacts failed to load; predictions are refused
    pub fn without_models(normalizer: TextNormalizer, reason: impl Into<String>) -> Self {
        Self {
            normalizer,
            models: ModelState::Unavailable(reason.into()),
        }
    }

    /// Load resources and artifacts named by the configuration
    ///
    /// Never fails: problems are logged once and remembered.
    pub fn from_config(config: &Config) -> Self {
        let resources = match LanguageResources::load(config.text.stopwords_path.as_deref()) {
            Ok(resources) => resources,
            Err(e) => {
                warn!("{}; using built-in English stopwords", e);
                LanguageResources::builtin()
            }
        };
        let normalizer = TextNormalizer::new(resources, config.text.max_input_bytes);

        match ModelContext::load(&config.models) {
            Ok(context) => {
                info!(
                    "Models loaded from {} and {}",
                    config.models.vectorizer_path.display(),
                    config.models.classifier_path.display()
                );
                Self::new(normalizer, Arc::new(context))
            }
            Err(e) => {
                error!("Failed to load pre-trained models: {}", e);
                let reason = match e {
                    SpamError::ModelNotLoaded(reason) => reason,
                    other => other.to_string(),
                };
                Self::without_models(normalizer, reason)
            }
        }
    }

    pub fn models_loaded(&self) -> bool {
        matches!(self.models, ModelState::Loaded(_))
    }

    /// Why the artifacts are unavailable, if they are
    pub fn model_error(&self) -> Option<&str> {
        match &self.models {
            ModelState::Loaded(_) => None,
            ModelState::Unavailable(reason) => Some(reason),
        }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn normalize(&self, raw: &str) -> Result<String> {
        self.normalizer.normalize(raw)
    }

    /// Predict on already normalized text
    pub fn predict(&self, normalized: &str) -> Result<PredictionResult> {
        match &self.models {
            ModelState::Loaded(adapter) => adapter.predict(normalized),
            ModelState::Unavailable(reason) => Err(SpamError::ModelNotLoaded(reason.clone())),
        }
    }

    /// Check one raw message
    pub fn check(&self, raw: &str) -> Result<Verdict> {
        if raw.trim().is_empty() {
            return Ok(Verdict::EmptyMessage);
        }

        let normalized = match self.normalizer.normalize(raw) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!("{}", e);
                return Ok(Verdict::Neutral {
                    warning: Some(e.to_string()),
                });
            }
        };

        if normalized.is_empty() {
            debug!("No content tokens left after normalization");
            return Ok(Verdict::Neutral { warning: None });
        }

        match self.predict(&normalized) {
            Ok(prediction) => Ok(Verdict::Classified {
                normalized,
                prediction,
            }),
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spam::classifier::MultinomialNb;
    use crate::spam::types::Label;
    use crate::spam::vectorizer::TfidfVectorizer;

    fn detector() -> SpamDetector {
        let vectorizer = TfidfVectorizer::from_json(
            r#"{"vocabulary": {"hello": 0, "prize": 1}, "idf": [1.0, 1.0]}"#,
        )
        .unwrap();
        let classifier = MultinomialNb {
            classes: vec![0, 1],
            class_log_prior: vec![0.5f64.ln(), 0.5f64.ln()],
            feature_log_prob: vec![
                vec![0.9f64.ln(), 0.1f64.ln()],
                vec![0.1f64.ln(), 0.9f64.ln()],
            ],
        };
        let context = ModelContext::new(Box::new(vectorizer), Box::new(classifier)).unwrap();
        SpamDetector::new(TextNormalizer::default(), Arc::new(context))
    }

    #[test]
    fn test_empty_message() {
        let detector = detector();
        assert_eq!(detector.check("").unwrap(), Verdict::EmptyMessage);
        assert_eq!(detector.check(" \t\n").unwrap(), Verdict::EmptyMessage);
    }

    #[test]
    fn test_no_content_is_neutral() {
        let detector = detector();
        assert_eq!(
            detector.check("how are you?").unwrap(),
            Verdict::Neutral { warning: None }
        );
    }

    #[test]
    fn test_classified() {
        let detector = detector();
        match detector.check("A PRIZE!").unwrap() {
            Verdict::Classified {
                normalized,
                prediction,
            } => {
                assert_eq!(normalized, "prize");
                assert_eq!(prediction.label, Label::Spam);
                assert!((prediction.probabilities.spam - 0.9).abs() < 1e-9);
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn test_normalization_failure_is_warning() {
        let vectorizer =
            TfidfVectorizer::from_json(r#"{"vocabulary": {"hello": 0}, "idf": [1.0]}"#).unwrap();
        let classifier = MultinomialNb {
            classes: vec![0, 1],
            class_log_prior: vec![0.5f64.ln(), 0.5f64.ln()],
            feature_log_prob: vec![vec![0.0], vec![0.0]],
        };
        let context = ModelContext::new(Box::new(vectorizer), Box::new(classifier)).unwrap();
        let normalizer = TextNormalizer::new(LanguageResources::builtin(), 4);
        let detector = SpamDetector::new(normalizer, Arc::new(context));

        match detector.check("hello there").unwrap() {
            Verdict::Neutral { warning: Some(msg) } => assert!(msg.contains("limit is 4")),
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn test_without_models() {
        let detector = SpamDetector::without_models(TextNormalizer::default(), "model.json missing");
        assert!(!detector.models_loaded());
        assert_eq!(detector.model_error(), Some("model.json missing"));

        let err = detector.check("win a prize").unwrap_err();
        assert!(matches!(err, SpamError::ModelNotLoaded(_)));

        // Empty input still short-circuits before the models are consulted
        assert_eq!(detector.check("  ").unwrap(), Verdict::EmptyMessage);
    }
}
