//! Word tokenizer
//!
//! Treebank-style rules: quotes, brackets, `?!;@#$%&*`, ellipses, double
//! dashes, sentence-final periods and `:`/`,` not followed by a digit are
//! padded with spaces, English clitics are split off (`you've` -> `you` `'ve`,
//! `don't` -> `do` `n't`) and the result is split on whitespace. Any other
//! symbol stays attached to its word, so `£1000`, `e-mail`, `www.xyz.com`,
//! `18+` and `1,000.50` come out as single tokens.

use regex::Regex;

use crate::error::{Result, SpamError};

/// Substitutions applied in order before splitting on whitespace
const RULES: [(&str, &str); 13] = [
    // double quotes
    (r#"["“”]"#, " $0 "),
    // opening single quote
    (r"(^|\s)(['‘’])(\S)", "${1}${2} ${3}"),
    (r"([:,])([^\d])", " ${1} ${2}"),
    (r"([:,])$", " ${1} "),
    (r"\.{2,}|…", " $0 "),
    (r"[;@#$%&]", " $0 "),
    (r"[?!]", " $0 "),
    (r"[\]\[(){}<>]", " $0 "),
    (r"\*", " $0 "),
    (r"--", " $0 "),
    // sentence-final period, possibly followed by closing brackets or quotes
    (r#"([^.\s])\.([\]\)}>"'’]*)(\s|$)"#, "${1} . ${2}${3}"),
    // clitics
    (
        r"(?i)([^'’\s])(['’](?:s|m|d|ll|re|ve)|n['’]t)(\s|$)",
        "${1} ${2}${3}",
    ),
    // closing single quote
    (r"([^'’\s])(['’])(\s|$)", "${1} ${2}${3}"),
];

/// Characters trimmed from word edges by [`simple_tokenize`]
const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}', '<', '>', '*',
    '“', '”', '‘', '’',
];

/// Rule-based word tokenizer
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    rules: Vec<(Regex, &'static str)>,
}

impl WordTokenizer {
    pub fn new() -> Result<Self> {
        Self::from_rules(&RULES)
    }

    fn from_rules(rules: &[(&str, &'static str)]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|(pattern, replacement)| {
                Regex::new(pattern)
                    .map(|re| (re, *replacement))
                    .map_err(|e| SpamError::ResourceUnavailable(format!("word tokenizer: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Tokenize text into word, number and punctuation tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut padded = format!(" {} ", text);
        for (re, replacement) in &self.rules {
            padded = re.replace_all(&padded, *replacement).into_owned();
        }

        padded.split_whitespace().map(str::to_string).collect()
    }
}

/// Fallback tokenization: whitespace split with edge punctuation trimmed
///
/// Symbols inside a word are kept, like the rule-based tokenizer does.
pub fn simple_tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|word| word.trim_matches(EDGE_PUNCTUATION))
        .filter(|word| !word.is_empty())
        .collect()
}
