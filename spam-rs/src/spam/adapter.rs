//! Inference adapter
//!
//! Runs normalized text through the vocabulary transform and the classifier.
//! The classifier's own label is reported as-is next to its probabilities;
//! the decision boundary is never recomputed here.

use std::sync::Arc;
use tracing::debug;

use super::model::ModelContext;
use super::types::{Label, PredictionResult, Probabilities};
use crate::error::{Result, SpamError};

/// Tolerance on `P(not-spam) + P(spam) == 1`
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Predicts a label and probabilities for normalized text
#[derive(Clone)]
pub struct InferenceAdapter {
    context: Arc<ModelContext>,
}

impl InferenceAdapter {
    pub fn new(context: Arc<ModelContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ModelContext {
        &self.context
    }

    /// Classify one normalized message
    pub fn predict(&self, normalized: &str) -> Result<PredictionResult> {
        let batch = self
            .context
            .vectorizer()
            .transform(&[normalized])
            .map_err(|e| stage_error("vectorization", e))?;

        if batch.len() != 1 {
            return Err(SpamError::Prediction(format!(
                "vectorization returned {} vectors for one message",
                batch.len()
            )));
        }

        let classifier = self.context.classifier();
        let labels = classifier
            .predict(&batch)
            .map_err(|e| stage_error("classification", e))?;
        let probas = classifier
            .predict_proba(&batch)
            .map_err(|e| stage_error("probability estimation", e))?;

        let (class, pair) = match (labels.as_slice(), probas.as_slice()) {
            ([class], [pair]) => (*class, *pair),
            _ => {
                return Err(SpamError::Prediction(format!(
                    "classifier returned {} labels and {} probability pairs for one message",
                    labels.len(),
                    probas.len()
                )))
            }
        };

        let label = Label::from_class(class).ok_or_else(|| {
            SpamError::Prediction(format!("classifier returned unknown class {}", class))
        })?;

        let probabilities = Probabilities::from_pair(pair);
        if !probabilities.is_finite()
            || (probabilities.total() - 1.0).abs() > PROBABILITY_TOLERANCE
        {
            return Err(SpamError::Prediction(format!(
                "classifier probabilities {:?} do not form a distribution",
                pair
            )));
        }

        debug!(
            "Predicted {} (P(spam)={:.4}) for '{}'",
            label, probabilities.spam, normalized
        );

        Ok(PredictionResult {
            label,
            probabilities,
        })
    }
}

fn stage_error(stage: &str, err: SpamError) -> SpamError {
    let detail = match err {
        SpamError::Prediction(msg) => msg,
        other => other.to_string(),
    };
    SpamError::Prediction(format!("{} failed: {}", stage, detail))
}
