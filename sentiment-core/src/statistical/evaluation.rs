//! Hold-out evaluation: seeded split, per-class metrics, confusion matrix.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::label::Label;

/// Seed for the train/test shuffle.
pub const SPLIT_SEED: u64 = 42;

/// One in this many examples is held out for evaluation (20%).
pub const TEST_DIVISOR: usize = 5;

/// Indices of the held-out partition: the first `ceil(n / TEST_DIVISOR)`
/// positions of a seeded shuffle. Deterministic for a given `n`.
pub fn holdout_indices(n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    let test_size = n.div_ceil(TEST_DIVISOR);
    indices.truncate(test_size);
    indices
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub weighted_f1: f64,
    pub accuracy: f64,
    pub per_class: Vec<ClassMetrics>,
    /// Labels indexing the confusion matrix, sorted
    pub labels: Vec<Label>,
    /// `confusion_matrix[true][predicted]`
    pub confusion_matrix: Vec<Vec<usize>>,
    pub test_size: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl EvaluationReport {
    /// Score predictions against ground truth. Metrics cover every label that
    /// appears in either list; undefined ratios are reported as 0.
    pub fn from_predictions(truth: &[Label], predicted: &[Label]) -> Self {
        let labels: Vec<Label> = truth
            .iter()
            .chain(predicted)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let position = |label: &Label| labels.iter().position(|l| l == label).unwrap_or(0);

        let mut matrix = vec![vec![0usize; labels.len()]; labels.len()];
        for (t, p) in truth.iter().zip(predicted) {
            matrix[position(t)][position(p)] += 1;
        }

        let per_class: Vec<ClassMetrics> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let tp = matrix[i][i];
                let support: usize = matrix[i].iter().sum();
                let predicted_count: usize = matrix.iter().map(|row| row[i]).sum();

                let precision = ratio(tp, predicted_count);
                let recall = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                ClassMetrics {
                    label: *label,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let total: usize = per_class.iter().map(|m| m.support).sum();
        let weighted_f1 = if total == 0 {
            0.0
        } else {
            per_class
                .iter()
                .map(|m| m.f1 * m.support as f64)
                .sum::<f64>()
                / total as f64
        };

        let correct: usize = (0..labels.len()).map(|i| matrix[i][i]).sum();

        Self {
            weighted_f1,
            accuracy: ratio(correct, total),
            per_class,
            labels,
            confusion_matrix: matrix,
            test_size: truth.len(),
        }
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>10} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for m in &self.per_class {
            writeln!(
                f,
                "{:>10} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                m.label.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        writeln!(
            f,
            "{:>10} {:>9} {:>9} {:>9.2} {:>9}",
            "weighted", "", "", self.weighted_f1, self.test_size
        )?;

        writeln!(f, "confusion matrix (rows: true, columns: predicted)")?;
        for (label, row) in self.labels.iter().zip(&self.confusion_matrix) {
            let cells: Vec<String> = row.iter().map(|c| format!("{:>3}", c)).collect();
            writeln!(f, "{:>10} {}", label.as_str(), cells.join(" "))?;
        }
        Ok(())
    }
}
