//! Sentiment Core - Text sentiment classification.
//!
//! Three interchangeable strategies behind [`SentimentClassifier::predict`]:
//!
//! | Method | Implementation | Fallback |
//! |--------|----------------|----------|
//! | `rule_based` | word-level polarity lexicon | none needed |
//! | `remote` | hosted pretrained model (Hugging Face inference API) | lexicon |
//! | `statistical` | TF-IDF + multinomial naive Bayes fitted at startup | lexicon |
//!
//! Prediction never fails. Only training reports errors.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod classifier;
pub mod corpus;
pub mod error;
pub mod label;
pub mod lexicon;
pub mod preprocess;
pub mod remote;
pub mod statistical;

pub use classifier::{ModelInfo, SentimentClassifier};
pub use corpus::{bootstrap_examples, TrainingExample};
pub use error::{ClassifierError, RemoteError};
pub use label::{Label, Method};
pub use lexicon::PolarityScorer;
pub use preprocess::Preprocessor;
pub use remote::{HuggingFaceModel, RemoteModel};
pub use statistical::{EvaluationReport, StatisticalModel, TrainingSummary};
