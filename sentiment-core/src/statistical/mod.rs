//! Locally trained bag-of-words classifier (TF-IDF + multinomial naive Bayes).

pub mod evaluation;
pub mod naive_bayes;
pub mod tfidf;

pub use evaluation::{ClassMetrics, EvaluationReport};
pub use naive_bayes::MultinomialNb;
pub use tfidf::TfIdfVectorizer;

use serde::Serialize;
use std::collections::BTreeSet;

use crate::corpus::TrainingExample;
use crate::error::ClassifierError;
use crate::label::Label;
use crate::preprocess::Preprocessor;

/// Outcome of a successful fit.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub examples: usize,
    pub vocabulary_size: usize,
    pub classes: Vec<Label>,
    pub evaluation: EvaluationReport,
}

/// A fitted vectorizer and classifier pair. Immutable once built.
#[derive(Debug, Clone)]
pub struct StatisticalModel {
    preprocessor: Preprocessor,
    vectorizer: TfIdfVectorizer,
    classifier: MultinomialNb,
}

impl StatisticalModel {
    /// Fit on labeled examples and evaluate on the seeded hold-out partition.
    ///
    /// The hold-out rows are scored by the model fitted on the full corpus;
    /// the evaluation is diagnostic only.
    pub fn fit(
        preprocessor: &Preprocessor,
        examples: &[TrainingExample],
    ) -> Result<(Self, TrainingSummary), ClassifierError> {
        if examples.is_empty() {
            return Err(ClassifierError::EmptyCorpus);
        }

        let distinct: BTreeSet<Label> = examples.iter().map(|e| e.label).collect();
        if distinct.len() < 2 {
            return Err(ClassifierError::InsufficientClasses {
                found: distinct.len(),
            });
        }

        let documents: Vec<Vec<String>> = examples
            .iter()
            .map(|e| preprocessor.tokens(&e.text))
            .collect();
        let labels: Vec<Label> = examples.iter().map(|e| e.label).collect();

        let mut vectorizer = TfIdfVectorizer::new();
        let rows = vectorizer.fit_transform(&documents);
        if vectorizer.vocabulary_size() == 0 {
            return Err(ClassifierError::EmptyVocabulary);
        }

        let mut classifier = MultinomialNb::new();
        classifier.fit(&rows, &labels);

        let holdout = evaluation::holdout_indices(examples.len());
        let truth: Vec<Label> = holdout.iter().map(|&i| labels[i]).collect();
        let predicted: Vec<Label> = holdout
            .iter()
            .map(|&i| classifier.predict(&rows[i]).unwrap_or(labels[i]))
            .collect();
        let report = EvaluationReport::from_predictions(&truth, &predicted);

        let summary = TrainingSummary {
            examples: examples.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            classes: classifier.classes().to_vec(),
            evaluation: report,
        };

        let model = Self {
            preprocessor: preprocessor.clone(),
            vectorizer,
            classifier,
        };

        Ok((model, summary))
    }

    /// Classify a raw text. `None` only if the model holds no classes.
    pub fn predict(&self, text: &str) -> Option<Label> {
        let tokens = self.preprocessor.tokens(text);
        let row = self.vectorizer.transform(&tokens);
        self.classifier.predict(&row)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    pub fn classes(&self) -> &[Label] {
        self.classifier.classes()
    }
}
