//! TF-IDF vectorizer for text feature extraction.
//!
//! The vocabulary is fixed when [`TfIdfVectorizer::fit`] runs over the
//! training descriptions and is never extended afterwards: transforming
//! later text ignores tokens outside the vocabulary instead of growing it.
//! That keeps every feature index meaningful for the classifier trained
//! against this vectorizer, including after an artifact reload.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::analysis;
use crate::error::{Result, TxncatError};

/// A sparse feature vector: `(term index, weight)` pairs sorted by index.
///
/// Indices refer to the vocabulary of the vectorizer that produced the
/// vector. Terms absent from a document simply have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Create a vector from entries already sorted by index.
    pub fn from_entries(entries: Vec<(usize, f64)>) -> Self {
        SparseVector { entries }
    }

    /// Iterate over `(term index, weight)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of non-zero dimensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// TF-IDF vectorizer with a training-time vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping, in first-seen order over the
    /// training corpus.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each vocabulary term.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Whether `fit` has run.
    fitted: bool,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfVectorizer {
    /// Create a new, unfitted vectorizer.
    pub fn new() -> Self {
        TfIdfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            fitted: false,
        }
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Builds the vocabulary from all surviving tokens (stop words excluded)
    /// and computes `idf[t] = ln(n_documents / df[t])`. A term only enters
    /// the vocabulary when it occurs in at least one document, so the
    /// quotient is always defined.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = analysis::analyze(doc);
            let mut seen_in_doc: std::collections::HashSet<&str> = std::collections::HashSet::new();

            for token in &tokens {
                if !seen_in_doc.insert(token.as_str()) {
                    continue;
                }
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                if !vocabulary.contains_key(token.as_str()) {
                    let idx = vocabulary.len();
                    vocabulary.insert(token.clone(), idx);
                }
            }
        }

        let n_documents = documents.len();
        let mut idf = vec![0.0; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let df = document_frequency[term];
            idf[idx] = (n_documents as f64 / df as f64).ln();
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = n_documents;
        self.fitted = true;

        Ok(())
    }

    /// Transform a document into a sparse TF-IDF feature vector.
    ///
    /// Weight per present term = `(count / document length) * idf`. Tokens
    /// outside the vocabulary contribute nothing; a document with no
    /// surviving tokens yields an empty vector. Fails with
    /// [`TxncatError::NotFitted`] when called before [`fit`](Self::fit).
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.fitted {
            return Err(TxncatError::not_fitted(
                "transform called before fit; fit the vectorizer on training text first",
            ));
        }

        let tokens = analysis::analyze(document);
        let doc_length = tokens.len() as f64;

        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0) += 1;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(idx, count)| (idx, (count as f64 / doc_length) * self.idf[idx]))
            .collect();

        Ok(SparseVector::from_entries(entries))
    }

    /// Transform a batch of documents, preserving input order.
    pub fn transform_batch(&self, documents: &[String]) -> Result<Vec<SparseVector>> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether the vectorizer has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Look up the vocabulary index of a term.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let vectorizer = TfIdfVectorizer::new();
        let err = vectorizer.transform("starbucks coffee").unwrap_err();
        assert!(matches!(err, TxncatError::NotFitted(_)));
    }

    #[test]
    fn test_fit_excludes_stop_words() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&docs(&["payment to the coffee shop", "coffee at the corner"]))
            .unwrap();

        assert!(vectorizer.term_index("coffee").is_some());
        assert!(vectorizer.term_index("the").is_none());
        assert!(vectorizer.term_index("to").is_none());
    }

    #[test]
    fn test_idf_values() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&docs(&["coffee shop", "coffee roaster", "gas station"]))
            .unwrap();

        // "coffee" appears in 2 of 3 documents, "gas" in 1 of 3.
        let coffee = vectorizer.term_index("coffee").unwrap();
        let gas = vectorizer.term_index("gas").unwrap();

        let v = vectorizer.transform("coffee gas").unwrap();
        let weights: std::collections::HashMap<usize, f64> = v.iter().collect();
        let expected_coffee = 0.5 * (3.0_f64 / 2.0).ln();
        let expected_gas = 0.5 * (3.0_f64 / 1.0).ln();
        assert!((weights[&coffee] - expected_coffee).abs() < 1e-12);
        assert!((weights[&gas] - expected_gas).abs() < 1e-12);
    }

    #[test]
    fn test_transform_ignores_unseen_tokens() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&docs(&["starbucks coffee", "shell gas"])).unwrap();
        let size_before = vectorizer.vocabulary_size();

        let v = vectorizer.transform("starbucks downtown").unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(vectorizer.vocabulary_size(), size_before);

        let v = vectorizer.transform("entirely unknown words").unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = docs(&["starbucks coffee", "shell gas station", "netflix subscription"]);

        let mut first = TfIdfVectorizer::new();
        first.fit(&corpus).unwrap();
        let mut second = TfIdfVectorizer::new();
        second.fit(&corpus).unwrap();

        assert_eq!(first, second);
    }
}
