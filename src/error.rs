//! Error types for the txncat library.
//!
//! All failures are represented by the [`TxncatError`] enum. Every error is
//! terminal for the run: the pipeline has no retry or partial-success mode,
//! and a failed run never writes an artifact.
//!
//! # Examples
//!
//! ```
//! use txncat::error::{TxncatError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TxncatError::data("no usable records"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for txncat operations.
#[derive(Error, Debug)]
pub enum TxncatError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The supplied dataset path does not exist.
    #[error("input dataset not found: {0}")]
    InputNotFound(PathBuf),

    /// Schema or content of the dataset is unusable.
    #[error("data error: {0}")]
    Data(String),

    /// A vectorizer was asked to transform text before being fitted.
    #[error("not fitted: {0}")]
    NotFitted(String),

    /// The label distribution does not support training.
    #[error("training error: {0}")]
    Training(String),

    /// CSV parsing errors.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Artifact encoding/decoding errors.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for operations that may fail with [`TxncatError`].
pub type Result<T> = std::result::Result<T, TxncatError>;

impl TxncatError {
    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        TxncatError::Data(msg.into())
    }

    /// Create a new not-fitted error.
    pub fn not_fitted<S: Into<String>>(msg: S) -> Self {
        TxncatError::NotFitted(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        TxncatError::Training(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        TxncatError::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TxncatError::data("missing column 'category'");
        assert_eq!(err.to_string(), "data error: missing column 'category'");

        let err = TxncatError::InputNotFound(PathBuf::from("missing.csv"));
        assert_eq!(err.to_string(), "input dataset not found: missing.csv");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: TxncatError = io_err.into();
        assert!(matches!(err, TxncatError::Io(_)));
    }
}
