//! The end-to-end training pipeline.
//!
//! One sequential run: load, clean, split, fit the vectorizer on the train
//! partition, vectorize both partitions, train the classifier, evaluate on
//! the held-out partition, persist the artifact. Any failure aborts the run
//! before the artifact is written.

use std::path::PathBuf;

use crate::artifact::TrainedArtifact;
use crate::dataset;
use crate::error::Result;
use crate::ml::evaluation::{self, EvaluationReport};
use crate::ml::naive_bayes::{DEFAULT_SMOOTHING, MultinomialNb};
use crate::ml::tfidf::TfIdfVectorizer;

/// Default input dataset file name.
pub const DEFAULT_DATA_FILE: &str = "transactions.csv";

/// Default output artifact file name.
pub const DEFAULT_MODEL_FILE: &str = "transaction_model.bin";

/// Configuration for a pipeline run.
///
/// The defaults mirror the documented file names; there is no ambient
/// configuration beyond this struct.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to the CSV file of labeled transactions.
    pub data_path: PathBuf,
    /// Path where the trained artifact is written.
    pub model_path: PathBuf,
    /// Fraction of records held out for evaluation.
    pub test_ratio: f64,
    /// Seed for the train/test shuffle.
    pub seed: u64,
    /// Laplace smoothing constant for the classifier.
    pub smoothing: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            test_ratio: 0.2,
            seed: 42,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

/// Run the full pipeline and return the evaluation report.
pub fn run(config: &PipelineConfig) -> Result<EvaluationReport> {
    log::info!("loading dataset from {}", config.data_path.display());
    let raw = dataset::load_records(&config.data_path)?;
    let records = dataset::clean(raw)?;
    log::info!("{} records after cleaning", records.len());

    let (train, test) = dataset::split(records, config.test_ratio, config.seed)?;
    log::debug!("split into {} train / {} test records", train.len(), test.len());

    let (train_descriptions, train_labels): (Vec<String>, Vec<String>) = train
        .into_iter()
        .map(|r| (r.description, r.category))
        .unzip();
    let (test_descriptions, test_labels): (Vec<String>, Vec<String>) = test
        .into_iter()
        .map(|r| (r.description, r.category))
        .unzip();

    let mut vectorizer = TfIdfVectorizer::new();
    vectorizer.fit(&train_descriptions)?;
    log::debug!("vocabulary size: {}", vectorizer.vocabulary_size());

    let train_features = vectorizer.transform_batch(&train_descriptions)?;
    let test_features = vectorizer.transform_batch(&test_descriptions)?;

    let model = MultinomialNb::new(config.smoothing).train(
        &train_features,
        &train_labels,
        vectorizer.vocabulary_size(),
    )?;
    log::info!("trained on {} categories", model.classes().len());

    let report = evaluation::evaluate(&model, &test_features, &test_labels);

    let artifact = TrainedArtifact { vectorizer, model };
    artifact.save(&config.model_path)?;
    log::info!("artifact saved to {}", config.model_path.display());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.data_path, PathBuf::from("transactions.csv"));
        assert_eq!(config.model_path, PathBuf::from("transaction_model.bin"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.test_ratio, 0.2);
    }
}
