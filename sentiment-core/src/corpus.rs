//! Labeled training data.

use serde::{Deserialize, Serialize};

use crate::label::Label;

/// One labeled training text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: Label,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

const BOOTSTRAP: &[(&str, Label)] = &[
    ("I love this product! It's amazing!", Label::Positive),
    ("This is the worst experience ever.", Label::Negative),
    ("The product is okay, nothing special.", Label::Neutral),
    ("Fantastic service and great quality!", Label::Positive),
    ("Terrible customer support, very disappointed.", Label::Negative),
    ("It's fine, works as expected.", Label::Neutral),
    ("Outstanding performance and excellent value!", Label::Positive),
    ("Poor quality and bad packaging.", Label::Negative),
    ("Average product, meets basic needs.", Label::Neutral),
    ("Brilliant features and wonderful design!", Label::Positive),
    ("Absolutely hate this, waste of money!", Label::Negative),
    ("Good value for the price paid.", Label::Positive),
    ("Not bad but could be better.", Label::Neutral),
    ("Excellent product highly recommended!", Label::Positive),
    ("Very poor quality do not buy!", Label::Negative),
];

/// Built-in corpus used to fit the statistical model at startup.
pub fn bootstrap_examples() -> Vec<TrainingExample> {
    BOOTSTRAP
        .iter()
        .map(|(text, label)| TrainingExample::new(*text, *label))
        .collect()
}
