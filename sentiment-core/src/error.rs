//! Error types for the sentiment classifier.
//!
//! None of these escape `SentimentClassifier::predict`; they surface only from
//! training, configuration helpers, and the remote client boundary.

use thiserror::Error;

/// Classifier errors.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Training corpus is empty")]
    EmptyCorpus,

    #[error("Training corpus needs at least two distinct labels, found {found}")]
    InsufficientClasses { found: usize },

    #[error("Training corpus has no usable terms after preprocessing")]
    EmptyVocabulary,

    #[error("Unknown prediction method: {0}")]
    UnknownMethod(String),

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Failed to load stopwords from {path}: {source}")]
    Stopwords {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the hosted model. Each one routes the remote strategy to the
/// lexicon scorer.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed remote response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Whether the service was reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
