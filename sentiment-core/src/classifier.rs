//! Sentiment classifier: strategy dispatch and fallbacks.
//!
//! Lifecycle is construct → train (best effort) → serve. Once shared behind an
//! `Arc`, the classifier is read-only.

use serde::Serialize;
use std::sync::Arc;

use sentiment_common::config::Config;

use crate::corpus::TrainingExample;
use crate::error::ClassifierError;
use crate::label::{Label, Method};
use crate::lexicon::PolarityScorer;
use crate::preprocess::Preprocessor;
use crate::remote::{HuggingFaceModel, RemoteModel};
use crate::statistical::{EvaluationReport, StatisticalModel, TrainingSummary};

/// Read-only description of the statistical model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub trained: bool,
    pub vocabulary_size: usize,
    pub classes: Vec<Label>,
    pub evaluation: Option<EvaluationReport>,
}

/// Three-strategy sentiment classifier.
pub struct SentimentClassifier {
    preprocessor: Preprocessor,
    scorer: PolarityScorer,
    remote: Option<Arc<dyn RemoteModel>>,
    model: Option<StatisticalModel>,
    summary: Option<TrainingSummary>,
}

impl SentimentClassifier {
    /// Untrained classifier with the built-in stopword list and no remote model.
    pub fn new() -> Self {
        Self {
            preprocessor: Preprocessor::new(),
            scorer: PolarityScorer::new(),
            remote: None,
            model: None,
            summary: None,
        }
    }

    /// Build from configuration: stopword source and remote model endpoint.
    pub fn from_config(config: &Config) -> Self {
        let preprocessor =
            Preprocessor::from_config_path(config.classifier.stopwords_path.as_deref());

        let mut classifier = Self::new().with_preprocessor(preprocessor);

        match HuggingFaceModel::from_config(&config.remote_model) {
            Some(model) => {
                tracing::info!(endpoint = %model.endpoint(), "Remote sentiment model configured");
                classifier = classifier.with_remote(Arc::new(model));
            }
            None => {
                tracing::info!("Remote sentiment model disabled, remote requests use the lexicon")
            }
        }

        classifier
    }

    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_scorer(mut self, scorer: PolarityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteModel>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Fit the statistical strategy, replacing any previous fit.
    ///
    /// The previous model is discarded before fitting, so a failed fit leaves
    /// the classifier untrained.
    pub fn train_statistical(
        &mut self,
        examples: &[TrainingExample],
    ) -> Result<TrainingSummary, ClassifierError> {
        self.model = None;
        self.summary = None;

        let (model, summary) = StatisticalModel::fit(&self.preprocessor, examples)?;

        tracing::info!(
            examples = summary.examples,
            vocabulary_size = summary.vocabulary_size,
            weighted_f1 = summary.evaluation.weighted_f1,
            "Statistical model trained"
        );
        tracing::info!("Hold-out evaluation:\n{}", summary.evaluation);

        self.model = Some(model);
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_info(&self) -> ModelInfo {
        match (&self.model, &self.summary) {
            (Some(model), summary) => ModelInfo {
                trained: true,
                vocabulary_size: model.vocabulary_size(),
                classes: model.classes().to_vec(),
                evaluation: summary.as_ref().map(|s| s.evaluation.clone()),
            },
            (None, _) => ModelInfo {
                trained: false,
                vocabulary_size: 0,
                classes: Vec::new(),
                evaluation: None,
            },
        }
    }

    pub fn preprocess(&self, text: &str) -> String {
        self.preprocessor.preprocess(text)
    }

    /// Lexicon polarity label. Never fails.
    pub fn rule_based_sentiment(&self, text: &str) -> Label {
        self.scorer.label(text)
    }

    /// Hosted model label, or the lexicon label when the model is not
    /// configured or the call fails.
    pub async fn remote_sentiment(&self, text: &str) -> Label {
        let Some(remote) = &self.remote else {
            tracing::debug!("No remote model configured, using lexicon");
            return self.rule_based_sentiment(text);
        };

        match remote.classify(text).await {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(
                    model = remote.name(),
                    error = %e,
                    transport = e.is_transport(),
                    "Remote model failed, falling back to lexicon"
                );
                self.rule_based_sentiment(text)
            }
        }
    }

    /// Statistical label, or the lexicon label before a successful fit.
    pub fn statistical_sentiment(&self, text: &str) -> Label {
        match self.model.as_ref().and_then(|model| model.predict(text)) {
            Some(label) => label,
            None => {
                tracing::debug!("Statistical model not trained, using lexicon");
                self.rule_based_sentiment(text)
            }
        }
    }

    /// Classify with the given strategy.
    pub async fn predict(&self, text: &str, method: Method) -> Label {
        match method {
            Method::RuleBased => self.rule_based_sentiment(text),
            Method::Remote => self.remote_sentiment(text).await,
            Method::Statistical => self.statistical_sentiment(text),
        }
    }

    /// Classify with a method given by name. Unknown names use the lexicon.
    pub async fn predict_named(&self, text: &str, method: &str) -> Label {
        match method.parse::<Method>() {
            Ok(method) => self.predict(text, method).await,
            Err(e) => {
                tracing::debug!(error = %e, "Unsupported method, using lexicon");
                self.rule_based_sentiment(text)
            }
        }
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::bootstrap_examples;

    #[test]
    fn test_untrained_statistical_uses_lexicon() {
        let classifier = SentimentClassifier::new();
        assert!(!classifier.is_trained());

        let text = "This is the worst experience ever.";
        assert_eq!(
            classifier.statistical_sentiment(text),
            classifier.rule_based_sentiment(text)
        );
    }

    #[test]
    fn test_model_info_tracks_training() {
        let mut classifier = SentimentClassifier::new();
        assert!(!classifier.model_info().trained);

        classifier.train_statistical(&bootstrap_examples()).unwrap();
        let info = classifier.model_info();
        assert!(info.trained);
        assert_eq!(info.classes, Label::ALL.to_vec());
        assert!(info.vocabulary_size > 0);
        assert!(info.evaluation.is_some());
    }

    #[test]
    fn test_failed_retrain_leaves_untrained() {
        let mut classifier = SentimentClassifier::new();
        classifier.train_statistical(&bootstrap_examples()).unwrap();

        let result = classifier.train_statistical(&[]);
        assert!(matches!(result, Err(ClassifierError::EmptyCorpus)));
        assert!(!classifier.is_trained());
        assert!(classifier.model_info().evaluation.is_none());
    }

    #[test]
    fn test_custom_scorer() {
        let classifier =
            SentimentClassifier::new().with_scorer(PolarityScorer::new().with_word("bullish", 0.9));
        assert_eq!(
            classifier.rule_based_sentiment("Feeling bullish today"),
            Label::Positive
        );
    }

    #[test]
    fn test_preprocess_delegates() {
        let classifier = SentimentClassifier::new();
        assert_eq!(classifier.preprocess("Check http://x.co @bob #great"), "check");
    }
}
