//! Text normalization
//!
//! Lowercasing, word tokenization, stopword filtering and stemming of raw
//! SMS text.

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::{TextNormalizer, DEFAULT_MAX_INPUT_BYTES};
pub use stopwords::{LanguageResources, ENGLISH_STOPWORDS, PUNCTUATION};
pub use tokenizer::{simple_tokenize, WordTokenizer};

use std::sync::OnceLock;

use crate::error::Result;

/// Normalize with the built-in English resources
pub fn normalize(text: &str) -> Result<String> {
    static DEFAULT: OnceLock<TextNormalizer> = OnceLock::new();
    DEFAULT.get_or_init(TextNormalizer::default).normalize(text)
}
