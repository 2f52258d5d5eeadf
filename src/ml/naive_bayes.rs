//! Multinomial naive Bayes classifier over TF-IDF features.
//!
//! Training estimates per-class priors from label frequencies and
//! Laplace-smoothed per-term likelihoods from accumulated feature mass.
//! All scoring happens in log space so long descriptions cannot underflow.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TxncatError};
use crate::ml::tfidf::SparseVector;

/// Default additive smoothing constant.
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// A predicted category with the posterior probability of that category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category: String,
    pub confidence: f64,
}

/// Trainer for [`NaiveBayesModel`].
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    smoothing: f64,
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }
}

impl MultinomialNb {
    /// Create a trainer with the given Laplace smoothing constant.
    pub fn new(smoothing: f64) -> Self {
        MultinomialNb { smoothing }
    }

    /// Train a model from feature vectors and their labels.
    ///
    /// `vocabulary_size` is the dimensionality of the feature space, i.e.
    /// the vocabulary size of the vectorizer that produced `features`.
    /// Fails with [`TxncatError::Training`] when feature and label counts
    /// differ or when fewer than two distinct labels are present. Given
    /// identical inputs the result is identical; nothing here is random.
    pub fn train(
        &self,
        features: &[SparseVector],
        labels: &[String],
        vocabulary_size: usize,
    ) -> Result<NaiveBayesModel> {
        if features.len() != labels.len() {
            return Err(TxncatError::training(format!(
                "feature/label count mismatch: {} features, {} labels",
                features.len(),
                labels.len()
            )));
        }

        let mut classes: Vec<String> = labels.to_vec();
        classes.sort();
        classes.dedup();
        if classes.len() < 2 {
            return Err(TxncatError::training(format!(
                "classification needs at least 2 distinct categories, got {}",
                classes.len()
            )));
        }

        let class_index =
            |label: &String| classes.binary_search(label).expect("label in classes");

        // Per-class example counts and accumulated per-term feature mass.
        let mut class_counts = vec![0usize; classes.len()];
        let mut term_mass = vec![vec![0.0f64; vocabulary_size]; classes.len()];
        for (vector, label) in features.iter().zip(labels) {
            let c = class_index(label);
            class_counts[c] += 1;
            for (idx, weight) in vector.iter() {
                term_mass[c][idx] += weight;
            }
        }

        let n_examples = labels.len() as f64;
        let log_priors = class_counts
            .iter()
            .map(|&count| (count as f64 / n_examples).ln())
            .collect();

        let log_likelihoods = term_mass
            .into_iter()
            .map(|mass| {
                let total: f64 = mass.iter().sum();
                let denominator = total + self.smoothing * vocabulary_size as f64;
                mass.into_iter()
                    .map(|m| ((m + self.smoothing) / denominator).ln())
                    .collect()
            })
            .collect();

        Ok(NaiveBayesModel {
            classes,
            log_priors,
            log_likelihoods,
            vocabulary_size,
            smoothing: self.smoothing,
        })
    }
}

/// Learned parameters of a multinomial naive Bayes classifier.
///
/// Immutable after training. Feature indices refer to the vocabulary of the
/// vectorizer the model was trained against, which is why the two are only
/// ever persisted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    /// Distinct categories, sorted.
    classes: Vec<String>,
    /// ln(prior) per class.
    log_priors: Vec<f64>,
    /// ln(likelihood) per class per vocabulary term.
    log_likelihoods: Vec<Vec<f64>>,
    /// Feature space dimensionality at training time.
    vocabulary_size: usize,
    /// Smoothing constant the model was trained with.
    smoothing: f64,
}

impl NaiveBayesModel {
    /// Predict the category of a feature vector.
    ///
    /// Scores each class as `ln(prior) + sum(weight * ln(likelihood))` and
    /// returns the argmax; ties resolve to the earlier class in sorted
    /// order. Confidence is the posterior of the winning class, normalized
    /// across classes with the log-sum-exp trick.
    pub fn predict(&self, features: &SparseVector) -> Prediction {
        let mut scores = self.log_priors.clone();
        for (c, score) in scores.iter_mut().enumerate() {
            for (idx, weight) in features.iter() {
                if idx < self.vocabulary_size {
                    *score += weight * self.log_likelihoods[c][idx];
                }
            }
        }

        let mut best = 0;
        for (c, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = c;
            }
        }

        let max_score = scores[best];
        let normalizer: f64 = scores.iter().map(|s| (s - max_score).exp()).sum();

        Prediction {
            category: self.classes[best].clone(),
            confidence: 1.0 / normalizer,
        }
    }

    /// Distinct categories the model can predict, sorted.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Feature space dimensionality at training time.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }
}
