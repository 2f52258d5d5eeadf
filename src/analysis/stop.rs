//! Stop word filtering.
//!
//! Common English function words carry no categorical signal for statement
//! descriptions, so they never enter the vectorizer vocabulary. The list is
//! fixed: it is part of the featurization contract and changing it would
//! invalidate previously persisted artifacts.
//!
//! # Examples
//!
//! ```
//! use txncat::analysis::stop::is_stop_word;
//!
//! assert!(is_stop_word("the"));
//! assert!(!is_stop_word("starbucks"));
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

/// Default English stop words list.
///
/// Common English words that are typically filtered out during indexing.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DEFAULT_ENGLISH_STOP_WORDS.iter().copied().collect());

/// Check whether `word` is on the stop word list.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Number of words on the stop list.
pub fn stop_word_count() -> usize {
    STOP_WORDS.len()
}
