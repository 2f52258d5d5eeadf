//! # txncat
//!
//! A small supervised-learning pipeline that categorizes bank and credit-card
//! transactions from their free-text descriptions.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - CSV ingest with schema validation and cleaning
//! - TF-IDF text vectorization with a fixed training-time vocabulary
//! - Multinomial naive Bayes classification in log space
//! - Accuracy / precision / recall / F1 reporting with a confusion matrix
//! - Atomic persistence of the fitted vectorizer and trained model as one unit

pub mod analysis;
pub mod artifact;
pub mod dataset;
pub mod error;
pub mod ml;
pub mod pipeline;

// Re-export commonly used types
pub use artifact::TrainedArtifact;
pub use error::{Result, TxncatError};
pub use ml::evaluation::EvaluationReport;
pub use ml::naive_bayes::{MultinomialNb, NaiveBayesModel, Prediction};
pub use ml::tfidf::{SparseVector, TfIdfVectorizer};
pub use pipeline::PipelineConfig;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
