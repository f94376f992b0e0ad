//! Multinomial naive Bayes over dense feature rows.

use std::collections::BTreeMap;

use crate::label::Label;

/// Laplace smoothing.
pub const DEFAULT_ALPHA: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct MultinomialNb {
    alpha: f64,
    /// Observed classes, sorted
    classes: Vec<Label>,
    class_log_prior: Vec<f64>,
    /// `feature_log_prob[class][feature]`
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn new() -> Self {
        Self::with_alpha(DEFAULT_ALPHA)
    }

    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            classes: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
        }
    }

    /// Fit on feature rows and their labels. `rows` and `labels` must have
    /// equal length; rows shorter than the widest are zero-padded.
    pub fn fit(&mut self, rows: &[Vec<f64>], labels: &[Label]) {
        let n_features = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut per_class: BTreeMap<Label, (usize, Vec<f64>)> = BTreeMap::new();
        for (row, label) in rows.iter().zip(labels) {
            let (count, totals) = per_class
                .entry(*label)
                .or_insert_with(|| (0, vec![0.0; n_features]));
            *count += 1;
            for (total, value) in totals.iter_mut().zip(row) {
                *total += value;
            }
        }

        let n_samples = labels.len() as f64;
        self.classes.clear();
        self.class_log_prior.clear();
        self.feature_log_prob.clear();

        for (label, (count, totals)) in per_class {
            let denominator = totals.iter().sum::<f64>() + self.alpha * n_features as f64;
            self.classes.push(label);
            self.class_log_prior.push((count as f64 / n_samples).ln());
            self.feature_log_prob.push(
                totals
                    .iter()
                    .map(|total| ((total + self.alpha) / denominator).ln())
                    .collect(),
            );
        }
    }

    /// Joint log-likelihood of each class for one row.
    pub fn joint_log_likelihood(&self, row: &[f64]) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + row
                        .iter()
                        .zip(log_probs)
                        .map(|(x, log_p)| x * log_p)
                        .sum::<f64>()
            })
            .collect()
    }

    /// Most likely class, or `None` before fitting. Ties go to the class that
    /// sorts first.
    pub fn predict(&self, row: &[f64]) -> Option<Label> {
        let mut best: Option<(Label, f64)> = None;

        for (label, score) in self.classes.iter().zip(self.joint_log_likelihood(row)) {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((*label, score)),
            }
        }

        best.map(|(label, _)| label)
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new()
    }
}
