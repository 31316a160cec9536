//! Language resources used by the normalizer
//!
//! The built-in list is the common English stopword list shipped with NLTK
//! (179 entries). A plain text file can replace it at startup.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, SpamError};

/// English stopwords
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
    "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn",
    "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
    "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// ASCII punctuation characters
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Stopword and punctuation sets consulted by the filter stage
#[derive(Debug, Clone)]
pub struct LanguageResources {
    stopwords: HashSet<String>,
    punctuation: HashSet<char>,
}

impl LanguageResources {
    /// Built-in English resources
    pub fn builtin() -> Self {
        Self::with_stopwords(ENGLISH_STOPWORDS.iter().map(|w| w.to_string()))
    }

    fn with_stopwords<I: IntoIterator<Item = String>>(words: I) -> Self {
        Self {
            stopwords: words.into_iter().collect(),
            punctuation: PUNCTUATION.chars().collect(),
        }
    }

    /// Load resources, replacing the stopword list when a file is given
    pub fn load(stopwords_path: Option<&Path>) -> Result<Self> {
        match stopwords_path {
            Some(path) => Self::from_stopwords_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Read a stopword list: one word per line, blank lines and `#` comments ignored
    pub fn from_stopwords_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpamError::ResourceUnavailable(format!(
                "cannot read stopword list {}: {}",
                path.display(),
                e
            ))
        })?;

        let words: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        if words.is_empty() {
            return Err(SpamError::ResourceUnavailable(format!(
                "stopword list {} is empty",
                path.display()
            )));
        }

        Ok(Self::with_stopwords(words))
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// True for a token made of exactly one punctuation character
    pub fn is_punctuation(&self, token: &str) -> bool {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.punctuation.contains(&c),
            _ => false,
        }
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

impl Default for LanguageResources {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_list() {
        let resources = LanguageResources::builtin();
        assert_eq!(resources.stopword_count(), 179);
        assert!(resources.is_stopword("the"));
        assert!(resources.is_stopword("won"));
        assert!(!resources.is_stopword("prize"));
    }

    #[test]
    fn test_punctuation() {
        let resources = LanguageResources::builtin();
        assert!(resources.is_punctuation("!"));
        assert!(resources.is_punctuation("~"));
        assert!(!resources.is_punctuation("!!"));
        assert!(!resources.is_punctuation(""));
        assert!(!resources.is_punctuation("a"));
        assert!(!resources.is_punctuation("£"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "Foo").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  bar  ").unwrap();

        let resources = LanguageResources::load(Some(file.path())).unwrap();
        assert_eq!(resources.stopword_count(), 2);
        assert!(resources.is_stopword("foo"));
        assert!(resources.is_stopword("bar"));
        assert!(!resources.is_stopword("the"));
    }

    #[test]
    fn test_empty_file_is_unavailable() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();

        let err = LanguageResources::from_stopwords_file(file.path()).unwrap_err();
        assert!(matches!(err, SpamError::ResourceUnavailable(_)));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = LanguageResources::load(Some(Path::new("/nonexistent/stopwords.txt")))
            .unwrap_err();
        assert!(matches!(err, SpamError::ResourceUnavailable(_)));
    }
}
