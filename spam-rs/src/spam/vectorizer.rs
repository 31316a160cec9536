//! Vocabulary transform
//!
//! Maps normalized text to TF-IDF weighted sparse vectors using a vocabulary
//! and idf weights fitted offline.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::types::SparseVector;
use crate::error::{Result, SpamError};

/// Token pattern used when the artifact does not name one
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Text-to-vector transform
pub trait Vectorizer: Send + Sync {
    /// Vocabulary size, i.e. dimension of every produced vector
    fn n_features(&self) -> usize;

    /// Transform a batch of documents into one vector per document
    fn transform(&self, documents: &[&str]) -> Result<Vec<SparseVector>>;
}

/// Row normalization applied after idf weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    /// Term -> column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Validate an artifact and compile its token pattern
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self> {
        if artifact.vocabulary.is_empty() {
            return Err(SpamError::ModelNotLoaded(
                "vectorizer vocabulary is empty".to_string(),
            ));
        }

        if artifact.vocabulary.len() != artifact.idf.len() {
            return Err(SpamError::ModelNotLoaded(format!(
                "vectorizer has {} vocabulary terms but {} idf weights",
                artifact.vocabulary.len(),
                artifact.idf.len()
            )));
        }

        if let Some((term, col)) = artifact
            .vocabulary
            .iter()
            .find(|(_, col)| **col >= artifact.idf.len())
        {
            return Err(SpamError::ModelNotLoaded(format!(
                "vocabulary term '{}' maps to column {} outside {} features",
                term,
                col,
                artifact.idf.len()
            )));
        }

        if artifact.idf.iter().any(|w| !w.is_finite()) {
            return Err(SpamError::ModelNotLoaded(
                "vectorizer idf weights must be finite".to_string(),
            ));
        }

        let token_pattern = Regex::new(&artifact.token_pattern).map_err(|e| {
            SpamError::ModelNotLoaded(format!("invalid token pattern: {}", e))
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            token_pattern,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: TfidfArtifact = serde_json::from_str(json)
            .map_err(|e| SpamError::ModelNotLoaded(format!("vectorizer: {}", e)))?;
        Self::from_artifact(artifact)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SpamError::ModelNotLoaded(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Column index of a term, if it is in the vocabulary
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    fn terms<'a>(&'a self, document: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        // A single capture group selects the token, as in the usual token_pattern contract
        let use_group = self.token_pattern.captures_len() == 2;
        self.token_pattern
            .captures_iter(document)
            .filter_map(move |caps| {
                let m = if use_group { caps.get(1) } else { caps.get(0) };
                m.map(|m| m.as_str())
            })
    }

    fn vectorize(&self, document: &str) -> SparseVector {
        let lowered;
        let document = if self.lowercase {
            lowered = document.to_lowercase();
            lowered.as_str()
        } else {
            document
        };

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.terms(document) {
            if let Some(col) = self.column(term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (col, tf * self.idf[col])
            })
            .collect();

        let norm = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, value) in entries.iter_mut() {
                *value /= norm;
            }
        }

        SparseVector::new(self.idf.len(), entries)
    }
}

impl Vectorizer for TfidfVectorizer {
    fn n_features(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, documents: &[&str]) -> Result<Vec<SparseVector>> {
        Ok(documents.iter().map(|doc| self.vectorize(doc)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> TfidfArtifact {
        TfidfArtifact {
            vocabulary: HashMap::from([
                ("cash".to_string(), 0),
                ("hello".to_string(), 1),
                ("prize".to_string(), 2),
            ]),
            idf: vec![2.0, 1.0, 3.0],
            lowercase: true,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            sublinear_tf: false,
            norm: Some(Norm::L2),
        }
    }

    #[test]
    fn test_l2_normalized_weights() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        let batch = vectorizer.transform(&["cash prize"]).unwrap();

        assert_eq!(batch.len(), 1);
        let v = &batch[0];
        assert_eq!(v.dim(), 3);
        let norm = (2.0f64 * 2.0 + 3.0 * 3.0).sqrt();
        assert!((v.get(0) - 2.0 / norm).abs() < 1e-12);
        assert!((v.get(2) - 3.0 / norm).abs() < 1e-12);
        assert_eq!(v.get(1), 0.0);
    }

    #[test]
    fn test_term_counts_and_case() {
        let mut a = artifact();
        a.norm = None;
        let vectorizer = TfidfVectorizer::from_artifact(a).unwrap();
        let v = &vectorizer.transform(&["CASH cash Hello"]).unwrap()[0];

        assert_eq!(v.get(0), 4.0);
        assert_eq!(v.get(1), 1.0);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut a = artifact();
        a.norm = None;
        a.sublinear_tf = true;
        let vectorizer = TfidfVectorizer::from_artifact(a).unwrap();
        let v = &vectorizer.transform(&["cash cash cash"]).unwrap()[0];

        assert!((v.get(0) - (1.0 + 3f64.ln()) * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_l1_norm() {
        let mut a = artifact();
        a.norm = Some(Norm::L1);
        let vectorizer = TfidfVectorizer::from_artifact(a).unwrap();
        let v = &vectorizer.transform(&["cash hello"]).unwrap()[0];

        assert!((v.get(0) - 2.0 / 3.0).abs() < 1e-12);
        assert!((v.get(1) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_vocabulary_gives_zero_vector() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        let batch = vectorizer.transform(&["nothing known here", ""]).unwrap();

        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(SparseVector::is_zero));
    }

    #[test]
    fn test_single_characters_ignored() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        assert_eq!(vectorizer.terms("a cash 1 prize").collect::<Vec<_>>(), vec!["cash", "prize"]);
    }

    #[test]
    fn test_json_defaults() {
        let vectorizer =
            TfidfVectorizer::from_json(r#"{"vocabulary": {"win": 0}, "idf": [1.5]}"#).unwrap();
        assert_eq!(vectorizer.n_features(), 1);
        let v = &vectorizer.transform(&["WIN"]).unwrap()[0];
        assert!((v.get(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_mismatched_idf() {
        let mut a = artifact();
        a.idf.pop();
        let err = TfidfVectorizer::from_artifact(a).unwrap_err();
        assert!(matches!(err, SpamError::ModelNotLoaded(_)));
    }

    #[test]
    fn test_rejects_column_out_of_range() {
        let mut a = artifact();
        a.vocabulary.insert("cash".to_string(), 7);
        let err = TfidfVectorizer::from_artifact(a).unwrap_err();
        assert!(err.to_string().contains("column 7"));
    }

    #[test]
    fn test_rejects_bad_token_pattern() {
        let mut a = artifact();
        a.token_pattern = "(".to_string();
        assert!(TfidfVectorizer::from_artifact(a).is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = TfidfVectorizer::from_json("{not json").unwrap_err();
        assert!(matches!(err, SpamError::ModelNotLoaded(_)));
    }
}
