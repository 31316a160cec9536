//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Class value 0
    NotSpam,
    /// Class value 1
    Spam,
}

impl Label {
    /// Map a classifier class value to a label
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Label::NotSpam),
            1 => Some(Label::Spam),
            _ => None,
        }
    }

    pub fn class(self) -> i64 {
        match self {
            Label::NotSpam => 0,
            Label::Spam => 1,
        }
    }

    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::NotSpam => write!(f, "not spam"),
            Label::Spam => write!(f, "spam"),
        }
    }
}

/// Class probabilities, summing to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub not_spam: f64,
    pub spam: f64,
}

impl Probabilities {
    /// Build from a `[P(not-spam), P(spam)]` pair
    pub fn from_pair(pair: [f64; 2]) -> Self {
        Self {
            not_spam: pair[0],
            spam: pair[1],
        }
    }

    pub fn total(&self) -> f64 {
        self.not_spam + self.spam
    }

    pub fn is_finite(&self) -> bool {
        self.not_spam.is_finite() && self.spam.is_finite()
    }
}

/// Outcome of a single prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    pub probabilities: Probabilities,
}

impl PredictionResult {
    pub fn is_spam(&self) -> bool {
        self.label.is_spam()
    }
}

/// Sparse feature vector: sorted, unique column indices with their weights
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build a vector, sorting entries by column
    ///
    /// Entries must be unique and within `dim`.
    pub fn new(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(col, _)| *col);
        debug_assert!(entries.iter().all(|(col, _)| *col < dim));
        Self { dim, entries }
    }

    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, value)| *value == 0.0)
    }

    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |(c, _)| *c)
            .map(|idx| self.entries[idx].1)
            .unwrap_or(0.0)
    }

    /// Dot product with a dense row of the same dimension
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(col, value)| dense.get(*col).map(|w| w * value))
            .sum()
    }
}

/// What the detector concluded about one raw message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Input was empty after trimming; nothing was classified
    EmptyMessage,
    /// No content tokens survived normalization; treated as not spam
    Neutral { warning: Option<String> },
    /// Classifier ran on the normalized text
    Classified {
        normalized: String,
        prediction: PredictionResult,
    },
}

impl Verdict {
    pub fn is_spam(&self) -> bool {
        match self {
            Verdict::Classified { prediction, .. } => prediction.is_spam(),
            _ => false,
        }
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            Verdict::Classified { prediction, .. } => Some(prediction),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_classes() {
        assert_eq!(Label::from_class(0), Some(Label::NotSpam));
        assert_eq!(Label::from_class(1), Some(Label::Spam));
        assert_eq!(Label::from_class(2), None);
        assert_eq!(Label::Spam.class(), 1);
        assert!(Label::Spam.is_spam());
        assert!(!Label::NotSpam.is_spam());
        assert_eq!(Label::NotSpam.to_string(), "not spam");
    }

    #[test]
    fn test_sparse_vector() {
        let v = SparseVector::new(5, vec![(3, 2.0), (1, 0.5)]);
        assert_eq!(v.dim(), 5);
        assert_eq!(v.entries(), &[(1, 0.5), (3, 2.0)]);
        assert_eq!(v.get(3), 2.0);
        assert_eq!(v.get(0), 0.0);
        assert_eq!(v.nnz(), 2);
        assert!(!v.is_zero());
        assert_eq!(v.dot(&[1.0, 2.0, 3.0, 4.0, 5.0]), 9.0);
    }

    #[test]
    fn test_zero_vector() {
        let v = SparseVector::zeros(3);
        assert!(v.is_zero());
        assert_eq!(v.dot(&[1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_verdict_serialization() {
        let verdict = Verdict::Classified {
            normalized: "prize".to_string(),
            prediction: PredictionResult {
                label: Label::Spam,
                probabilities: Probabilities::from_pair([0.25, 0.75]),
            },
        };

        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["status"], "classified");
        assert_eq!(json["prediction"]["label"], "spam");
        assert_eq!(json["prediction"]["probabilities"]["spam"], 0.75);
        assert!(verdict.is_spam());

        let empty = serde_json::to_value(Verdict::EmptyMessage).unwrap();
        assert_eq!(empty["status"], "empty_message");
    }
}
