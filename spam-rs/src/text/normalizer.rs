//! Text normalizer
//!
//! Turns a raw message into the space-joined stem string the vocabulary
//! transform was fitted on:
//!
//! 1. lowercase
//! 2. word tokenization
//! 3. keep purely alphanumeric tokens
//! 4. drop stopwords and lone punctuation characters
//! 5. English Snowball stemming
//! 6. join with single spaces

use rust_stemmers::{Algorithm, Stemmer};
use tracing::warn;

use super::stopwords::LanguageResources;
use super::tokenizer::{simple_tokenize, WordTokenizer};
use crate::error::{Result, SpamError};

/// Default cap on raw message size
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

/// Message normalizer
pub struct TextNormalizer {
    tokenizer: Option<WordTokenizer>,
    resources: LanguageResources,
    stemmer: Stemmer,
    max_input_bytes: usize,
}

impl TextNormalizer {
    /// Create a normalizer
    ///
    /// If the word tokenizer cannot be built the normalizer keeps working with
    /// a plain whitespace split.
    pub fn new(resources: LanguageResources, max_input_bytes: usize) -> Self {
        let tokenizer = match WordTokenizer::new() {
            Ok(tokenizer) => Some(tokenizer),
            Err(e) => {
                warn!("{}; falling back to simple tokenization", e);
                None
            }
        };

        Self::with_tokenizer(resources, tokenizer, max_input_bytes)
    }

    /// Create a normalizer with an explicit tokenizer; `None` runs degraded
    pub fn with_tokenizer(
        resources: LanguageResources,
        tokenizer: Option<WordTokenizer>,
        max_input_bytes: usize,
    ) -> Self {
        Self {
            tokenizer,
            resources,
            stemmer: Stemmer::create(Algorithm::English),
            max_input_bytes,
        }
    }

    /// True when running without the word tokenizer
    pub fn is_degraded(&self) -> bool {
        self.tokenizer.is_none()
    }

    pub fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }

    /// Normalize a message into its stem tokens
    pub fn tokens(&self, text: &str) -> Result<Vec<String>> {
        if text.len() > self.max_input_bytes {
            return Err(SpamError::Normalization(format!(
                "message is {} bytes, limit is {}",
                text.len(),
                self.max_input_bytes
            )));
        }

        let lowered = text.to_lowercase();

        let words: Vec<String> = match &self.tokenizer {
            Some(tokenizer) => tokenizer.tokenize(&lowered),
            None => simple_tokenize(&lowered)
                .into_iter()
                .map(str::to_string)
                .collect(),
        };

        let stems = words
            .into_iter()
            .filter(|token| token.chars().all(char::is_alphanumeric) && !token.is_empty())
            // Alphanumeric tokens are never punctuation
            .filter(|token| !self.resources.is_stopword(token) && !self.resources.is_punctuation(token))
            .map(|token| self.stemmer.stem(&token).into_owned())
            .collect();

        Ok(stems)
    }

    /// Normalize a message into a single space-joined string
    pub fn normalize(&self, text: &str) -> Result<String> {
        Ok(self.tokens(text)?.join(" "))
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(LanguageResources::builtin(), DEFAULT_MAX_INPUT_BYTES)
    }
}
