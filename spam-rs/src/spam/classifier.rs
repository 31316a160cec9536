//! Pre-trained classifiers
//!
//! Both supported models are linear in the feature vector: multinomial
//! Naive Bayes and binary logistic regression. The artifact names the model
//! through its `kind` field.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::SparseVector;
use crate::error::{Result, SpamError};

/// Class values every artifact must declare, in this order
pub const BINARY_CLASSES: [i64; 2] = [0, 1];

/// Label and probability estimation over a batch of feature vectors
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    /// Expected feature vector dimension
    fn n_features(&self) -> usize;

    /// Class value per vector
    fn predict(&self, batch: &[SparseVector]) -> Result<Vec<i64>>;

    /// `[P(class 0), P(class 1)]` per vector
    fn predict_proba(&self, batch: &[SparseVector]) -> Result<Vec<[f64; 2]>>;
}

/// Multinomial Naive Bayes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    pub classes: Vec<i64>,
    pub class_log_prior: Vec<f64>,
    /// One row of log P(feature | class) per class
    pub feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    fn validate(&self) -> Result<()> {
        check_classes(&self.classes)?;

        if self.class_log_prior.len() != 2 || self.feature_log_prob.len() != 2 {
            return Err(SpamError::ModelNotLoaded(
                "naive bayes model needs a prior and a feature row for both classes".to_string(),
            ));
        }

        let width = self.feature_log_prob[0].len();
        if width == 0 || self.feature_log_prob[1].len() != width {
            return Err(SpamError::ModelNotLoaded(
                "naive bayes feature rows must be non-empty and of equal length".to_string(),
            ));
        }

        let finite = self
            .class_log_prior
            .iter()
            .chain(self.feature_log_prob.iter().flatten())
            .all(|v| v.is_finite());
        if !finite {
            return Err(SpamError::ModelNotLoaded(
                "naive bayes parameters must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// Joint log likelihood of each class
    fn joint_log_likelihood(&self, x: &SparseVector) -> Result<[f64; 2]> {
        check_dim(x, self.n_features())?;
        Ok([
            self.class_log_prior[0] + x.dot(&self.feature_log_prob[0]),
            self.class_log_prior[1] + x.dot(&self.feature_log_prob[1]),
        ])
    }
}

impl Classifier for MultinomialNb {
    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map(Vec::len).unwrap_or(0)
    }

    fn predict(&self, batch: &[SparseVector]) -> Result<Vec<i64>> {
        batch
            .iter()
            .map(|x| {
                let jll = self.joint_log_likelihood(x)?;
                // argmax keeps the first class on ties
                let idx = if jll[1] > jll[0] { 1 } else { 0 };
                Ok(self.classes[idx])
            })
            .collect()
    }

    fn predict_proba(&self, batch: &[SparseVector]) -> Result<Vec<[f64; 2]>> {
        batch
            .iter()
            .map(|x| {
                let jll = self.joint_log_likelihood(x)?;
                let max = jll[0].max(jll[1]);
                let log_norm = max + ((jll[0] - max).exp() + (jll[1] - max).exp()).ln();
                check_proba([(jll[0] - log_norm).exp(), (jll[1] - log_norm).exp()])
            })
            .collect()
    }
}

/// Binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub classes: Vec<i64>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    fn validate(&self) -> Result<()> {
        check_classes(&self.classes)?;

        if self.coef.is_empty() {
            return Err(SpamError::ModelNotLoaded(
                "logistic regression has no coefficients".to_string(),
            ));
        }

        if !self.intercept.is_finite() || self.coef.iter().any(|c| !c.is_finite()) {
            return Err(SpamError::ModelNotLoaded(
                "logistic regression parameters must be finite".to_string(),
            ));
        }

        Ok(())
    }

    fn decision_function(&self, x: &SparseVector) -> Result<f64> {
        check_dim(x, self.coef.len())?;
        Ok(x.dot(&self.coef) + self.intercept)
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, batch: &[SparseVector]) -> Result<Vec<i64>> {
        batch
            .iter()
            .map(|x| {
                let idx = if self.decision_function(x)? > 0.0 { 1 } else { 0 };
                Ok(self.classes[idx])
            })
            .collect()
    }

    fn predict_proba(&self, batch: &[SparseVector]) -> Result<Vec<[f64; 2]>> {
        batch
            .iter()
            .map(|x| {
                let p = 1.0 / (1.0 + (-self.decision_function(x)?).exp());
                check_proba([1.0 - p, p])
            })
            .collect()
    }
}

/// Serialized classifier, tagged by model kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    MultinomialNb(MultinomialNb),
    LogisticRegression(LogisticRegression),
}

impl ClassifierArtifact {
    /// Parse and validate an artifact
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(json)
            .map_err(|e| SpamError::ModelNotLoaded(format!("classifier: {}", e)))?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SpamError::ModelNotLoaded(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ClassifierArtifact::MultinomialNb(model) => model.validate(),
            ClassifierArtifact::LogisticRegression(model) => model.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierArtifact::MultinomialNb(_) => "multinomial_nb",
            ClassifierArtifact::LogisticRegression(_) => "logistic_regression",
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            ClassifierArtifact::MultinomialNb(model) => model,
            ClassifierArtifact::LogisticRegression(model) => model,
        }
    }
}

impl Classifier for ClassifierArtifact {
    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn predict(&self, batch: &[SparseVector]) -> Result<Vec<i64>> {
        self.inner().predict(batch)
    }

    fn predict_proba(&self, batch: &[SparseVector]) -> Result<Vec<[f64; 2]>> {
        self.inner().predict_proba(batch)
    }
}

fn check_classes(classes: &[i64]) -> Result<()> {
    if classes != BINARY_CLASSES.as_slice() {
        return Err(SpamError::ModelNotLoaded(format!(
            "classifier classes must be {:?}, got {:?}",
            BINARY_CLASSES, classes
        )));
    }
    Ok(())
}

fn check_dim(x: &SparseVector, n_features: usize) -> Result<()> {
    if x.dim() != n_features {
        return Err(SpamError::Prediction(format!(
            "feature vector has {} dimensions, classifier expects {}",
            x.dim(),
            n_features
        )));
    }
    Ok(())
}

fn check_proba(pair: [f64; 2]) -> Result<[f64; 2]> {
    if pair.iter().all(|p| p.is_finite()) {
        Ok(pair)
    } else {
        Err(SpamError::Prediction(
            "classifier produced non-finite probabilities".to_string(),
        ))
    }
}
