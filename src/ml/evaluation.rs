//! Held-out evaluation of a trained classifier.
//!
//! Produces overall accuracy, per-class precision/recall/F1 with support,
//! and a confusion matrix. The report is output data only; nothing feeds
//! back into the model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ml::naive_bayes::NaiveBayesModel;
use crate::ml::tfidf::SparseVector;

/// Precision, recall, and F1 for one category.
///
/// A category with no predicted instances has precision 0, and one with no
/// true instances has recall 0. This keeps categories that never occurred in
/// training (and so can never be predicted) well defined instead of dividing
/// by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances in the test set.
    pub support: usize,
}

/// Cross-tabulation of true vs. predicted categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Row/column labels: the sorted union of true and predicted categories.
    labels: Vec<String>,
    /// counts[true][predicted]
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Row/column labels, sorted.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Count of test records with the given true and predicted categories.
    pub fn count(&self, true_label: &str, predicted_label: &str) -> usize {
        let row = self.labels.iter().position(|l| l == true_label);
        let col = self.labels.iter().position(|l| l == predicted_label);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }
}

/// Evaluation results over a held-out test set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Fraction of exact label matches.
    pub accuracy: f64,
    /// Metrics per category, keyed by category name.
    pub per_class: BTreeMap<String, ClassMetrics>,
    /// True vs. predicted cross-tabulation.
    pub confusion: ConfusionMatrix,
}

/// Score `model` against held-out features and labels.
pub fn evaluate(
    model: &NaiveBayesModel,
    test_features: &[SparseVector],
    test_labels: &[String],
) -> EvaluationReport {
    let predictions: Vec<String> = test_features
        .iter()
        .map(|v| model.predict(v).category)
        .collect();

    // Label space: union of true and predicted categories, sorted. A test-only
    // category shows up here with an all-zero predicted column.
    let labels: Vec<String> = {
        let mut set: std::collections::BTreeSet<String> = test_labels.iter().cloned().collect();
        set.extend(predictions.iter().cloned());
        set.into_iter().collect()
    };
    let index: BTreeMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    let mut counts = vec![vec![0usize; labels.len()]; labels.len()];
    let mut matches = 0usize;
    for (truth, predicted) in test_labels.iter().zip(&predictions) {
        counts[index[truth.as_str()]][index[predicted.as_str()]] += 1;
        if truth == predicted {
            matches += 1;
        }
    }

    let accuracy = if test_labels.is_empty() {
        0.0
    } else {
        matches as f64 / test_labels.len() as f64
    };

    let mut per_class = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        let true_positives = counts[i][i];
        let support: usize = counts[i].iter().sum();
        let predicted_count: usize = counts.iter().map(|row| row[i]).sum();

        let precision = ratio(true_positives, predicted_count);
        let recall = ratio(true_positives, support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        per_class.insert(
            label.clone(),
            ClassMetrics {
                precision,
                recall,
                f1,
                support,
            },
        );
    }

    EvaluationReport {
        accuracy,
        per_class,
        confusion: ConfusionMatrix { labels, counts },
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .per_class
            .keys()
            .map(|l| l.len())
            .max()
            .unwrap_or(8)
            .max(8);

        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:width$}  {:>9}  {:>7}  {:>8}  {:>7}",
            "Category", "Precision", "Recall", "F1-score", "Support"
        )?;
        for (label, metrics) in &self.per_class {
            writeln!(
                f,
                "{:width$}  {:>9.4}  {:>7.4}  {:>8.4}  {:>7}",
                label, metrics.precision, metrics.recall, metrics.f1, metrics.support
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Confusion matrix (rows = true, columns = predicted):")?;
        write!(f, "{:width$}", "")?;
        for label in self.confusion.labels() {
            write!(f, "  {:>w$}", label, w = label.len().max(5))?;
        }
        writeln!(f)?;
        for (i, label) in self.confusion.labels().iter().enumerate() {
            write!(f, "{:width$}", label)?;
            for (j, col) in self.confusion.labels().iter().enumerate() {
                write!(f, "  {:>w$}", self.confusion.counts[i][j], w = col.len().max(5))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::naive_bayes::MultinomialNb;

    fn vector(entries: &[(usize, f64)]) -> SparseVector {
        SparseVector::from_entries(entries.to_vec())
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn separable_model() -> NaiveBayesModel {
        let features = vec![
            vector(&[(0, 1.0)]),
            vector(&[(0, 1.0)]),
            vector(&[(1, 1.0)]),
            vector(&[(1, 1.0)]),
        ];
        let y = labels(&["Dining", "Dining", "Transport", "Transport"]);
        MultinomialNb::default().train(&features, &y, 2).unwrap()
    }

    #[test]
    fn test_perfect_predictions() {
        let model = separable_model();
        let test_features = vec![vector(&[(0, 1.0)]), vector(&[(1, 1.0)])];
        let test_labels = labels(&["Dining", "Transport"]);

        let report = evaluate(&model, &test_features, &test_labels);
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.per_class["Dining"].precision, 1.0);
        assert_eq!(report.per_class["Dining"].recall, 1.0);
        assert_eq!(report.per_class["Dining"].f1, 1.0);
        assert_eq!(report.confusion.count("Dining", "Dining"), 1);
        assert_eq!(report.confusion.count("Dining", "Transport"), 0);
    }

    #[test]
    fn test_category_unseen_in_training_has_zero_metrics() {
        let model = separable_model();
        // "Groceries" never occurred in training, so it can never be predicted.
        let test_features = vec![vector(&[(0, 1.0)]), vector(&[(1, 1.0)])];
        let test_labels = labels(&["Groceries", "Transport"]);

        let report = evaluate(&model, &test_features, &test_labels);
        let groceries = &report.per_class["Groceries"];
        assert_eq!(groceries.precision, 0.0);
        assert_eq!(groceries.recall, 0.0);
        assert_eq!(groceries.f1, 0.0);
        assert!(groceries.precision.is_finite());
        assert_eq!(groceries.support, 1);
        assert!(report.confusion.labels().contains(&"Groceries".to_string()));
    }

    #[test]
    fn test_display_renders_table() {
        let model = separable_model();
        let test_features = vec![vector(&[(0, 1.0)])];
        let test_labels = labels(&["Dining"]);

        let rendered = evaluate(&model, &test_features, &test_labels).to_string();
        assert!(rendered.contains("Accuracy: 1.0000"));
        assert!(rendered.contains("Precision"));
        assert!(rendered.contains("Confusion matrix"));
    }
}
