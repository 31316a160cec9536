//! spam-rs: SMS spam classifier
//!
//! Classifies a single SMS message as spam or not spam with a pre-trained
//! TF-IDF vocabulary transform and a linear classifier.
//!
//! # Pipeline
//!
//! - **Normalizer** ([`text`]): lowercase, tokenize, keep alphanumeric tokens,
//!   drop stopwords, stem, join with spaces
//! - **Inference adapter** ([`spam::InferenceAdapter`]): vectorize the
//!   normalized text and ask the classifier for a label and probabilities
//! - **Detector** ([`spam::SpamDetector`]): the end-to-end check used by the
//!   CLI and the HTTP page, including the empty-input short circuit
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::Config;
//! use spam_rs::spam::{SpamDetector, Verdict};
//!
//! let detector = SpamDetector::from_config(&Config::default());
//!
//! match detector.check("Congratulations! You've won a guaranteed prize.") {
//!     Ok(Verdict::Classified { prediction, .. }) => {
//!         println!("spam: {} ({:.2}%)", prediction.is_spam(), prediction.probabilities.spam * 100.0);
//!     }
//!     Ok(other) => println!("{:?}", other),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`text`]: Text normalization
//! - [`spam`]: Vectorizer, classifiers and inference
//! - [`render`]: Display formatting for results
//! - [`samples`]: Example messages
//! - [`api`]: HTTP demo page and JSON API

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod samples;
pub mod spam;
pub mod text;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
pub use spam::{PredictionResult, SpamDetector, Verdict};
