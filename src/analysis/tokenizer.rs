//! Word tokenizer implementation.
//!
//! Splits text using Unicode word boundary rules (UAX #29). Punctuation and
//! whitespace segments are filtered out, which also strips the `#4521`-style
//! reference markers common in card statements down to their digits.
//!
//! # Examples
//!
//! ```
//! use txncat::analysis::tokenizer::WordTokenizer;
//!
//! let tokenizer = WordTokenizer::new();
//! let tokens = tokenizer.tokenize("starbucks coffee #4521");
//! assert_eq!(tokens, vec!["starbucks", "coffee", "4521"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

/// A tokenizer that splits text on Unicode word boundaries.
///
/// Uses the Unicode Text Segmentation algorithm (UAX #29) to identify word
/// boundaries, keeping only word segments. Input is expected to be
/// lowercased upstream, so no case folding happens here.
#[derive(Clone, Debug, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new word tokenizer.
    pub fn new() -> Self {
        WordTokenizer
    }

    /// Split `text` into word tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(|word| word.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("shell gas station");
        assert_eq!(tokens, vec!["shell", "gas", "station"]);
    }

    #[test]
    fn test_tokenize_punctuation_filtered() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("amazon.com*mk1ab23z4 - seattle, wa");
        assert_eq!(tokens, vec!["amazon.com", "mk1ab23z4", "seattle", "wa"]);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenizer = WordTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  !!  ").is_empty());
    }
}
