//! Labeled transaction records: CSV ingest, cleaning, and the train/test split.
//!
//! The input file is a CSV with a header row naming at least a `description`
//! and a `category` column (any other columns are ignored). Loading validates
//! the header up front so a malformed file fails with a [`TxncatError::Data`]
//! before any training work starts.

use std::collections::HashSet;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TxncatError};

/// One labeled transaction: a free-text description and its spending category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub description: String,
    pub category: String,
}

impl Record {
    /// Create a new record.
    pub fn new<S: Into<String>, T: Into<String>>(description: S, category: T) -> Self {
        Record {
            description: description.into(),
            category: category.into(),
        }
    }
}

/// Load raw records from a CSV file.
///
/// Fails with [`TxncatError::InputNotFound`] if the path does not exist and
/// with [`TxncatError::Data`] if the header lacks a required column. Rows
/// shorter than the header are loaded with empty fields and dropped later by
/// [`clean`].
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TxncatError::InputNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = reader.headers()?.clone();
    let description_idx = column_index(&headers, "description")?;
    let category_idx = column_index(&headers, "category")?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let description = row.get(description_idx).unwrap_or("").trim().to_string();
        let category = row.get(category_idx).unwrap_or("").trim().to_string();
        records.push(Record {
            description,
            category,
        });
    }

    log::debug!("loaded {} raw records from {}", records.len(), path.display());
    Ok(records)
}

/// Find the position of a named column in the header row.
fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| TxncatError::data(format!("missing required column '{name}'")))
}

/// Clean raw records into a training-ready set.
///
/// Drops rows missing either field, lowercases descriptions, and removes
/// exact duplicates (first occurrence wins, order otherwise preserved).
/// Fails with [`TxncatError::Data`] if nothing survives.
pub fn clean(records: Vec<Record>) -> Result<Vec<Record>> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut cleaned = Vec::new();

    for record in records {
        if record.description.is_empty() || record.category.is_empty() {
            continue;
        }
        let description = record.description.to_lowercase();
        if seen.insert((description.clone(), record.category.clone())) {
            cleaned.push(Record {
                description,
                category: record.category,
            });
        }
    }

    if cleaned.is_empty() {
        return Err(TxncatError::data("no usable records after cleaning"));
    }

    Ok(cleaned)
}

/// Split records into disjoint train and test partitions.
///
/// One seeded shuffle, then a cut: `ceil(n * test_ratio)` records become the
/// test set, clamped so both partitions are non-empty. The split is not
/// stratified by category. Fails with [`TxncatError::Data`] when fewer than
/// two records are available.
pub fn split(
    mut records: Vec<Record>,
    test_ratio: f64,
    seed: u64,
) -> Result<(Vec<Record>, Vec<Record>)> {
    let n = records.len();
    if n < 2 {
        return Err(TxncatError::data(format!(
            "need at least 2 records to split, got {n}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    records.shuffle(&mut rng);

    let test_len = ((n as f64 * test_ratio).ceil() as usize).clamp(1, n - 1);
    let test = records.split_off(n - test_len);

    Ok((records, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records("no_such_file.csv").unwrap_err();
        assert!(matches!(err, TxncatError::InputNotFound(_)));
    }

    #[test]
    fn test_load_records_missing_column() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_csv(&dir, "bad.csv", "description,amount\nstarbucks,4.50\n");
        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, TxncatError::Data(_)));
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_load_records_extra_columns_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "ok.csv",
            "date,description,amount,category\n2024-01-02,Starbucks Coffee,4.50,Dining\n",
        );
        let records = load_records(&path).unwrap();
        assert_eq!(records, vec![Record::new("Starbucks Coffee", "Dining")]);
    }

    #[test]
    fn test_clean_lowercases_and_drops_missing() {
        let raw = vec![
            Record::new("Starbucks Coffee", "Dining"),
            Record::new("", "Dining"),
            Record::new("shell gas station", ""),
        ];
        let cleaned = clean(raw).unwrap();
        assert_eq!(cleaned, vec![Record::new("starbucks coffee", "Dining")]);
    }

    #[test]
    fn test_clean_collapses_duplicates() {
        let raw = vec![Record::new("Netflix Subscription", "Entertainment"); 5];
        let cleaned = clean(raw).unwrap();
        assert_eq!(
            cleaned,
            vec![Record::new("netflix subscription", "Entertainment")]
        );
    }

    #[test]
    fn test_clean_empty_input_is_error() {
        let err = clean(vec![Record::new("", "")]).unwrap_err();
        assert!(matches!(err, TxncatError::Data(_)));
    }

    #[test]
    fn test_split_sizes_and_disjointness() {
        let records: Vec<Record> = (0..100)
            .map(|i| Record::new(format!("merchant {i}"), "Misc"))
            .collect();

        let (train, test) = split(records.clone(), 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);

        let mut combined: Vec<Record> = train.iter().chain(test.iter()).cloned().collect();
        combined.sort_by(|a, b| a.description.cmp(&b.description));
        let mut expected = records;
        expected.sort_by(|a, b| a.description.cmp(&b.description));
        assert_eq!(combined, expected);
    }

    #[test]
    fn test_split_is_deterministic() {
        let records: Vec<Record> = (0..50)
            .map(|i| Record::new(format!("merchant {i}"), "Misc"))
            .collect();

        let first = split(records.clone(), 0.2, 42).unwrap();
        let second = split(records, 0.2, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_split_two_records() {
        let records = vec![
            Record::new("starbucks", "Dining"),
            Record::new("shell", "Transport"),
        ];
        let (train, test) = split(records, 0.2, 42).unwrap();
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(), 1);
    }

    #[test]
    fn test_split_single_record_is_error() {
        let err = split(vec![Record::new("starbucks", "Dining")], 0.2, 42).unwrap_err();
        assert!(matches!(err, TxncatError::Data(_)));
    }
}
