//! Spam classification module
//!
//! Vocabulary transform, pre-trained classifiers, the inference adapter that
//! ties them together and the detector used by every surface.

pub mod adapter;
pub mod classifier;
pub mod detector;
pub mod model;
pub mod types;
pub mod vectorizer;

pub use adapter::{InferenceAdapter, PROBABILITY_TOLERANCE};
pub use classifier::{Classifier, ClassifierArtifact, LogisticRegression, MultinomialNb};
pub use detector::SpamDetector;
pub use model::ModelContext;
pub use types::*;
pub use vectorizer::{Norm, TfidfArtifact, TfidfVectorizer, Vectorizer};
