//! Text preprocessing shared by training and prediction.
//!
//! Pipeline: strip URLs, then @mentions, then #hashtags; drop every character
//! that is neither a word character nor whitespace; lowercase; remove
//! stopwords and tokens of two characters or fewer.

pub mod stopwords;

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::error::ClassifierError;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").unwrap());
static MENTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());
static HASHTAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());
static NON_WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Tokens with this many characters or fewer are dropped.
const MAX_SHORT_TOKEN_LEN: usize = 2;

#[derive(Debug, Clone)]
enum StopwordFilter {
    English,
    Custom(Arc<HashSet<String>>),
    /// The configured list could not be loaded; text passes through unfiltered.
    Unavailable,
}

/// Deterministic text normalizer.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    stopwords: StopwordFilter,
}

impl Preprocessor {
    /// Preprocessor using the built-in English stopword list.
    pub fn new() -> Self {
        Self {
            stopwords: StopwordFilter::English,
        }
    }

    /// Preprocessor using a caller-supplied stopword set.
    pub fn with_stopwords(stopwords: HashSet<String>) -> Self {
        Self {
            stopwords: StopwordFilter::Custom(Arc::new(stopwords)),
        }
    }

    /// Preprocessor with stopword filtering unavailable: `preprocess` returns
    /// the cleaned, lowercased text without token filtering.
    pub fn unfiltered() -> Self {
        Self {
            stopwords: StopwordFilter::Unavailable,
        }
    }

    /// Load a stopword file (one word per line).
    pub fn from_stopword_file(path: &Path) -> Result<Self, ClassifierError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ClassifierError::Stopwords {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::with_stopwords(stopwords::parse_list(&content)))
    }

    /// Build from an optional configured stopword file.
    ///
    /// No path means the built-in list. A path that fails to load degrades to
    /// unfiltered preprocessing instead of failing startup.
    pub fn from_config_path(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::new();
        };

        match Self::from_stopword_file(path) {
            Ok(preprocessor) => {
                tracing::info!(path = %path.display(), "Loaded custom stopword list");
                preprocessor
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stopword list unavailable, preprocessing without stopword filtering");
                Self::unfiltered()
            }
        }
    }

    /// Whether stopword filtering is active.
    pub fn filters_stopwords(&self) -> bool {
        !matches!(self.stopwords, StopwordFilter::Unavailable)
    }

    fn stopword_set(&self) -> Option<&HashSet<String>> {
        match &self.stopwords {
            StopwordFilter::English => Some(stopwords::english()),
            StopwordFilter::Custom(set) => Some(set.as_ref()),
            StopwordFilter::Unavailable => None,
        }
    }

    /// Strip URLs, mentions, hashtags and non-word characters, then lowercase.
    pub fn clean(&self, text: &str) -> String {
        let text = URL_PATTERN.replace_all(text, "");
        let text = MENTION_PATTERN.replace_all(&text, "");
        let text = HASHTAG_PATTERN.replace_all(&text, "");
        let text = NON_WORD_PATTERN.replace_all(&text, "");
        text.to_lowercase()
    }

    /// Full preprocessing: `clean` plus stopword and short-token filtering.
    pub fn preprocess(&self, text: &str) -> String {
        let cleaned = self.clean(text);

        match self.stopword_set() {
            Some(stopwords) => cleaned
                .split_whitespace()
                .filter(|word| {
                    word.chars().count() > MAX_SHORT_TOKEN_LEN && !stopwords.contains(*word)
                })
                .collect::<Vec<_>>()
                .join(" "),
            None => cleaned,
        }
    }

    /// Preprocess and split into tokens.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.preprocess(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
