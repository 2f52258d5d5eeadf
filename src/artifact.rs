//! Persistence of the trained artifact.
//!
//! The fitted vectorizer and the trained model are written and loaded as one
//! bincode blob. The classifier's feature indices are meaningless without
//! the exact vocabulary that produced them, so the two halves are never
//! stored separately. Writes go through a temp file in the destination
//! directory and are renamed into place on success, so a crashed or failed
//! run leaves any previous artifact untouched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Result, TxncatError};
use crate::ml::naive_bayes::{NaiveBayesModel, Prediction};
use crate::ml::tfidf::TfIdfVectorizer;

/// The persisted unit: a fitted vectorizer and the model trained against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedArtifact {
    pub vectorizer: TfIdfVectorizer,
    pub model: NaiveBayesModel,
}

impl TrainedArtifact {
    /// Write the artifact to `path` atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let temp_file = NamedTempFile::new_in(&parent)?;
        let mut writer = BufWriter::new(temp_file.as_file());
        bincode::serialize_into(&mut writer, self)
            .map_err(|e| TxncatError::serialization(format!("failed to encode artifact: {e}")))?;
        writer.flush()?;
        drop(writer);

        temp_file.persist(path).map_err(|e| TxncatError::Io(e.error))?;
        log::debug!("artifact written to {}", path.display());
        Ok(())
    }

    /// Load a previously saved artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        bincode::deserialize_from(reader)
            .map_err(|e| TxncatError::serialization(format!("failed to decode artifact: {e}")))
    }

    /// Categorize a transaction description with the persisted state.
    ///
    /// Applies the same lowercasing as data preparation, then vectorizes
    /// with the stored vocabulary and predicts.
    pub fn classify(&self, description: &str) -> Result<Prediction> {
        let features = self.vectorizer.transform(&description.to_lowercase())?;
        Ok(self.model.predict(&features))
    }
}
