//! TF-IDF vectorizer.
//!
//! - vocabulary: the `max_features` most frequent terms of the corpus (ties
//!   broken alphabetically), indexed in alphabetical order
//! - idf: `ln((1 + n) / (1 + df)) + 1`
//! - rows: raw term counts times idf, L2-normalised

use std::collections::{BTreeMap, HashMap, HashSet};

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    pub fn new() -> Self {
        Self::with_max_features(DEFAULT_MAX_FEATURES)
    }

    pub fn with_max_features(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
        }
    }

    /// Learn vocabulary and idf weights from tokenized documents.
    ///
    /// Any previous fit is discarded.
    pub fn fit(&mut self, documents: &[Vec<String>]) {
        let mut term_freq: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for doc in documents {
            let mut seen = HashSet::new();
            for term in doc {
                *term_freq.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        // BTreeMap iteration is alphabetical, so a stable sort by count keeps
        // alphabetical order among equal counts.
        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        self.idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        self.terms = terms;
    }

    /// Vectorize one tokenized document. Unknown terms are ignored; a
    /// document with no known terms is the zero vector.
    pub fn transform(&self, document: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.terms.len()];

        for term in document {
            if let Some(&idx) = self.vocabulary.get(term) {
                vector[idx] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }

        vector
    }

    pub fn fit_transform(&mut self, documents: &[Vec<String>]) -> Vec<Vec<f64>> {
        self.fit(documents);
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Vocabulary terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
