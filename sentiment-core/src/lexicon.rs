//! Lexicon-based polarity scoring.
//!
//! Each sentiment-bearing word carries a polarity in [-1, 1]. The text score is
//! the mean of the (adjusted) word polarities:
//! - an intensifier ("very", "extremely", ...) scales the next sentiment word;
//! - a negation ("not", "never", "nothing", any "*n't") flips and halves the
//!   next sentiment word within a short window.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::label::Label;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w']+").unwrap());

/// Multiplier applied to a negated sentiment word.
const NEGATION_FACTOR: f64 = -0.5;

/// Number of following tokens a negation can reach.
const NEGATION_WINDOW: usize = 3;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("love", 0.5),
    ("loved", 0.7),
    ("loving", 0.6),
    ("lovely", 0.5),
    ("like", 0.2),
    ("liked", 0.3),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("excellent", 1.0),
    ("outstanding", 0.5),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("brilliant", 0.9),
    ("great", 0.8),
    ("good", 0.7),
    ("better", 0.5),
    ("best", 1.0),
    ("nice", 0.6),
    ("fine", 0.4),
    ("okay", 0.2),
    ("ok", 0.2),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("satisfied", 0.5),
    ("enjoy", 0.4),
    ("enjoyed", 0.5),
    ("perfect", 1.0),
    ("beautiful", 0.85),
    ("superb", 1.0),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("recommended", 0.4),
    ("recommend", 0.4),
    ("reliable", 0.5),
    ("useful", 0.3),
    ("helpful", 0.4),
    ("friendly", 0.4),
    ("fast", 0.2),
    ("easy", 0.43),
    ("cool", 0.35),
    ("fun", 0.3),
    ("exciting", 0.3),
    ("excited", 0.4),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("win", 0.8),
    ("winning", 0.5),
    ("success", 0.3),
    ("successful", 0.75),
    ("special", 0.35),
    ("positive", 0.23),
    ("favorite", 0.5),
    ("favourite", 0.5),
    ("smooth", 0.4),
    ("solid", 0.2),
    ("worth", 0.3),
    ("value", 0.2),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("horrible", -1.0),
    ("awful", -1.0),
    ("poor", -0.4),
    ("hate", -0.8),
    ("hated", -0.9),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disappointment", -0.6),
    ("sad", -0.5),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("annoyed", -0.4),
    ("broken", -0.4),
    ("useless", -0.5),
    ("waste", -0.2),
    ("wasted", -0.2),
    ("boring", -1.0),
    ("slow", -0.3),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.3),
    ("problem", -0.2),
    ("problems", -0.2),
    ("issue", -0.1),
    ("issues", -0.1),
    ("expensive", -0.5),
    ("overpriced", -0.5),
    ("difficult", -0.5),
    ("wrong", -0.5),
    ("stupid", -0.8),
    ("crap", -0.8),
    ("garbage", -0.8),
    ("scam", -0.8),
    ("nightmare", -0.8),
    ("disaster", -0.8),
    ("pathetic", -1.0),
    ("negative", -0.3),
    ("cheap", -0.1),
    ("buggy", -0.5),
    ("crash", -0.5),
    ("crashes", -0.5),
    ("rude", -0.6),
    ("lost", -0.3),
    ("regret", -0.6),
    ("mediocre", -0.3),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("completely", 1.3),
    ("highly", 1.3),
    ("super", 1.3),
    ("so", 1.2),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("barely", 0.6),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nor", "none", "nobody", "nowhere", "without",
    "cannot", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "cant", "wont",
    "couldnt", "shouldnt", "wouldnt",
];

/// Map typographic single quotes to `'` so "isn’t" tokenizes like "isn't".
fn normalize_apostrophes(text: &str) -> String {
    text.replace(|c: char| matches!(c, '\u{2018}' | '\u{2019}'), "'")
}

/// Word-level polarity scorer with a built-in general English lexicon.
#[derive(Debug, Clone)]
pub struct PolarityScorer {
    polarities: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl PolarityScorer {
    pub fn new() -> Self {
        let polarities = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS.iter())
            .map(|(word, score)| (word.to_string(), *score))
            .collect();

        let intensifiers = INTENSIFIERS
            .iter()
            .map(|(word, factor)| (word.to_string(), *factor))
            .collect();

        Self {
            polarities,
            intensifiers,
        }
    }

    /// Add or override a word polarity (clamped to [-1, 1]).
    pub fn with_word(mut self, word: &str, polarity: f64) -> Self {
        self.polarities
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        self
    }

    /// Polarity of a single word, if it is in the lexicon.
    pub fn word_polarity(&self, word: &str) -> Option<f64> {
        self.polarities.get(&word.to_lowercase()).copied()
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(&word) || word.ends_with("n't")
    }

    /// Polarity of a text in [-1, 1]. Text without sentiment words scores 0.0.
    pub fn polarity(&self, text: &str) -> f64 {
        let lowered = normalize_apostrophes(&text.to_lowercase());

        let mut scores = Vec::new();
        let mut intensity: Option<f64> = None;
        let mut negation_reach = 0usize;

        let words = WORD_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str().trim_matches('\''))
            .filter(|word| !word.is_empty());

        for word in words {
            if Self::is_negation(word) {
                negation_reach = NEGATION_WINDOW;
                intensity = None;
                continue;
            }

            if let Some(&factor) = self.intensifiers.get(word) {
                intensity = Some(factor);
                continue;
            }

            if let Some(&base) = self.polarities.get(word) {
                let mut score = base * intensity.unwrap_or(1.0);
                if negation_reach > 0 {
                    score *= NEGATION_FACTOR;
                    negation_reach = 0;
                }
                scores.push(score.clamp(-1.0, 1.0));
            } else {
                negation_reach = negation_reach.saturating_sub(1);
            }

            intensity = None;
        }

        if scores.is_empty() {
            return 0.0;
        }

        (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
    }

    /// Label a text with the fixed polarity thresholds.
    pub fn label(&self, text: &str) -> Label {
        Label::from_polarity(self.polarity(text))
    }
}

impl Default for PolarityScorer {
    fn default() -> Self {
        Self::new()
    }
}
