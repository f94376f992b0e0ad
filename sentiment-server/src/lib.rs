//! sentiment-server - HTTP API for text and tweet sentiment analysis.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod error;
pub mod routes;
pub mod twitter;

pub use error::{ServiceError, TwitterError};
pub use routes::{build_router, AppState};
pub use twitter::{Tweet, TwitterClient};

use sentiment_common::config::Config;
use sentiment_core::{bootstrap_examples, SentimentClassifier};

/// Build the classifier from config and fit the statistical strategy on the
/// bootstrap corpus. Training failures are logged; the classifier is still
/// returned and routes statistical requests to the lexicon.
pub fn build_classifier(config: &Config) -> SentimentClassifier {
    let mut classifier = SentimentClassifier::from_config(config);

    if !config.classifier.train_on_startup {
        tracing::info!("Startup training disabled, statistical requests use the lexicon");
        return classifier;
    }

    match classifier.train_statistical(&bootstrap_examples()) {
        Ok(summary) => tracing::info!(
            classes = ?summary.classes,
            "Statistical model ready"
        ),
        Err(e) => tracing::warn!(
            error = %e,
            "Statistical model training failed, statistical requests use the lexicon"
        ),
    }

    classifier
}

/// Assemble application state: classifier plus Twitter client.
pub async fn build_state(config: &Config) -> AppState {
    let classifier = build_classifier(config);
    let twitter = TwitterClient::connect(&config.twitter).await;
    AppState::new(classifier, twitter, config.twitter.max_tweets)
}
