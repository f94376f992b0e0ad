//! Sentiment labels and prediction methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifierError;

/// Polarity above which the lexicon scorer reports `Positive`.
pub const POSITIVE_THRESHOLD: f64 = 0.1;

/// Polarity below which the lexicon scorer reports `Negative`.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Three-class sentiment label.
///
/// Variant order is alphabetical so that sorted class lists (and tie-breaks
/// in the statistical model) are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Negative,
    Neutral,
    Positive,
}

impl Label {
    /// All labels in sorted order.
    pub const ALL: [Label; 3] = [Label::Negative, Label::Neutral, Label::Positive];

    /// Map a polarity score to a label using the fixed thresholds.
    pub fn from_polarity(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Map free-form model label text by substring: "positive" wins over
    /// "negative", anything else is neutral.
    pub fn from_model_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("positive") {
            Self::Positive
        } else if label.contains("negative") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            other => Err(ClassifierError::UnknownLabel(other.to_string())),
        }
    }
}

/// Prediction strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Lexicon polarity scoring
    #[default]
    RuleBased,
    /// Hosted pretrained model, lexicon fallback
    Remote,
    /// Locally trained TF-IDF + naive Bayes
    Statistical,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuleBased => "rule_based",
            Self::Remote => "remote",
            Self::Statistical => "statistical",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ClassifierError;

    /// Accepts the canonical names plus the legacy aliases
    /// `textblob`, `huggingface` and `ml`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "rule_based" | "rulebased" | "lexicon" | "textblob" => Ok(Self::RuleBased),
            "remote" | "huggingface" | "hf" => Ok(Self::Remote),
            "statistical" | "ml" | "naive_bayes" => Ok(Self::Statistical),
            _ => Err(ClassifierError::UnknownMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_polarity_thresholds_are_exclusive() {
        assert_eq!(Label::from_polarity(0.1), Label::Neutral);
        assert_eq!(Label::from_polarity(0.1001), Label::Positive);
        assert_eq!(Label::from_polarity(-0.1), Label::Neutral);
        assert_eq!(Label::from_polarity(-0.1001), Label::Negative);
        assert_eq!(Label::from_polarity(0.0), Label::Neutral);
    }

    #[test]
    fn test_from_model_label() {
        assert_eq!(Label::from_model_label("POSITIVE"), Label::Positive);
        assert_eq!(Label::from_model_label("negative"), Label::Negative);
        assert_eq!(Label::from_model_label("neutral"), Label::Neutral);
        assert_eq!(Label::from_model_label("LABEL_2"), Label::Neutral);
    }

    #[test]
    fn test_method_aliases() {
        assert_eq!("textblob".parse::<Method>().unwrap(), Method::RuleBased);
        assert_eq!("rule-based".parse::<Method>().unwrap(), Method::RuleBased);
        assert_eq!("huggingface".parse::<Method>().unwrap(), Method::Remote);
        assert_eq!(" ML ".parse::<Method>().unwrap(), Method::Statistical);
        assert!("bert".parse::<Method>().is_err());
    }

    #[test]
    fn test_label_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Label::Positive).unwrap(), "\"positive\"");
        assert_eq!(
            serde_json::to_string(&Method::RuleBased).unwrap(),
            "\"rule_based\""
        );
        assert_eq!("Neutral".parse::<Label>().unwrap(), Label::Neutral);
    }
}
