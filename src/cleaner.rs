//! Raw-to-canonical review cleaning.
//!
//! Steps run in a fixed order: rename to canonical fields, drop rows without
//! review text, drop duplicate `(review_text, bank_name)` pairs, normalize the
//! date to `YYYY-MM-DD`, and project to [`Review`]'s columns.

use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::output::{read_records, write_records};
use crate::stage::StageOutcome;

/// Canonical date format written by the cleaner.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row of the raw (or already cleaned) table, read under either the
/// store's field names or the canonical ones. Unknown columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingReview {
    #[serde(rename = "content", alias = "review_text")]
    pub review_text: Option<String>,
    /// Passed through as written, so `4.0` is kept as well as `4`.
    #[serde(rename = "score", alias = "rating")]
    pub rating: Option<String>,
    #[serde(rename = "at", alias = "review_date")]
    pub review_date: Option<String>,
    pub bank_name: String,
    pub source: String,
}

/// A cleaned review in the canonical column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_text: String,
    pub rating: Option<String>,
    pub review_date: String,
    pub bank_name: String,
    pub source: String,
}

/// Parses the date formats the store and spreadsheet tools emit.
pub fn normalize_date(raw: &str) -> Result<String> {
    let raw = raw.trim();

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|d| d.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|d| d.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|d| d.date_naive()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .map_err(|_| anyhow!("unparseable review date `{}`", raw))?;

    Ok(date.format(DATE_FORMAT).to_string())
}

/// Applies the cleaning steps to `rows`.
///
/// Any unparseable date aborts the whole batch.
pub fn clean_reviews(rows: Vec<IncomingReview>) -> Result<Vec<Review>> {
    let with_text: Vec<_> = rows
        .into_iter()
        .filter_map(|mut row| match row.review_text.take() {
            Some(text) if !text.is_empty() => Some((text, row)),
            _ => None,
        })
        .collect();

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut cleaned = Vec::with_capacity(with_text.len());

    for (text, row) in with_text {
        if !seen.insert((text.clone(), row.bank_name.clone())) {
            continue;
        }

        let raw_date = row.review_date.unwrap_or_default();
        let review_date = normalize_date(&raw_date)?;

        cleaned.push(Review {
            review_text: text,
            rating: row.rating,
            review_date,
            bank_name: row.bank_name,
            source: row.source,
        });
    }

    Ok(cleaned)
}

/// Reads the raw CSV, cleans it, and writes the cleaned CSV.
#[tracing::instrument(skip_all, fields(input = %config.raw_path().display()))]
pub fn clean(config: &PipelineConfig) -> Result<StageOutcome> {
    let input = config.raw_path();
    if !input.exists() {
        warn!(path = %input.display(), "Raw reviews not found");
        return Ok(StageOutcome::skipped("Run the collector first!"));
    }

    let rows: Vec<IncomingReview> = read_records(&input)?;
    let initial = rows.len();
    let cleaned = clean_reviews(rows)?;

    info!("Cleaning Report: {} -> {} reviews.", initial, cleaned.len());

    let path = config.clean_path();
    let rows = write_records(&path, &cleaned)?;
    info!(path = %path.display(), "Cleaned data saved");

    Ok(StageOutcome::Written { path, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(text: Option<&str>, bank: &str, date: &str) -> IncomingReview {
        IncomingReview {
            review_text: text.map(str::to_string),
            rating: Some("5".to_string()),
            review_date: Some(date.to_string()),
            bank_name: bank.to_string(),
            source: "Google Play".to_string(),
        }
    }

    #[test]
    fn test_duplicates_collapse_to_one_row() {
        let rows = vec![
            incoming(Some("Great app!"), "CBE", "2024-01-15"),
            incoming(Some("Great app!"), "CBE", "2024-01-15"),
        ];
        let cleaned = clean_reviews(rows).unwrap();

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].review_text, "Great app!");
        assert_eq!(cleaned[0].review_date, "2024-01-15");
    }

    #[test]
    fn test_same_text_different_bank_is_kept() {
        let rows = vec![
            incoming(Some("Great app!"), "CBE", "2024-01-15"),
            incoming(Some("Great app!"), "BOA", "2024-01-15"),
        ];
        assert_eq!(clean_reviews(rows).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_text_dropped() {
        let rows = vec![
            incoming(None, "CBE", "2024-01-15"),
            incoming(Some(""), "CBE", "2024-01-15"),
            incoming(Some("ok"), "CBE", "2024-01-15 08:30:00"),
        ];
        let cleaned = clean_reviews(rows).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].review_date, "2024-01-15");
    }

    #[test]
    fn test_keeps_first_of_duplicates() {
        let mut second = incoming(Some("slow"), "CBE", "2024-02-01");
        second.rating = Some("1".to_string());
        let rows = vec![incoming(Some("slow"), "CBE", "2024-01-01"), second];

        let cleaned = clean_reviews(rows).unwrap();
        assert_eq!(cleaned[0].rating.as_deref(), Some("5"));
        assert_eq!(cleaned[0].review_date, "2024-01-01");
    }

    #[test]
    fn test_bad_date_fails_the_batch() {
        let rows = vec![
            incoming(Some("fine"), "CBE", "2024-01-15"),
            incoming(Some("broken"), "CBE", "not a date"),
        ];
        let err = clean_reviews(rows).unwrap_err();
        assert!(err.to_string().contains("not a date"));
    }

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("2024-01-15").unwrap(), "2024-01-15");
        assert_eq!(normalize_date("2024-01-15 23:59:59").unwrap(), "2024-01-15");
        assert_eq!(normalize_date("2024-01-15T10:00:00").unwrap(), "2024-01-15");
        assert_eq!(normalize_date("2024-01-15T10:00:00+03:00").unwrap(), "2024-01-15");
        assert_eq!(normalize_date("01/15/2024").unwrap(), "2024-01-15");
        assert!(normalize_date("2024-13-45").is_err());
        assert!(normalize_date("").is_err());
    }

    #[test]
    fn test_missing_raw_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().with_data_dir(dir.path());

        let outcome = clean(&config).unwrap();
        assert!(!outcome.is_written());
        assert!(!config.clean_path().exists());
    }

    #[test]
    fn test_clean_reads_store_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().with_data_dir(dir.path());
        std::fs::write(
            config.raw_path(),
            "reviewId,content,score,at,bank_name,source\n\
             a,Great app!,5,2024-01-15,CBE,Google Play\n\
             b,Great app!,5,2024-01-15,CBE,Google Play\n\
             c,,3,2024-01-16,BOA,Google Play\n",
        )
        .unwrap();

        let outcome = clean(&config).unwrap();
        assert!(outcome.is_written());

        let cleaned: Vec<Review> = read_records(&config.clean_path()).unwrap();
        assert_eq!(
            cleaned,
            vec![Review {
                review_text: "Great app!".into(),
                rating: Some("5".into()),
                review_date: "2024-01-15".into(),
                bank_name: "CBE".into(),
                source: "Google Play".into(),
            }]
        );

        let header = std::fs::read_to_string(config.clean_path()).unwrap();
        assert!(header.starts_with("review_text,rating,review_date,bank_name,source"));
    }

    #[test]
    fn test_rating_passes_through_unparsed() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().with_data_dir(dir.path());
        std::fs::write(
            config.raw_path(),
            "content,score,at,bank_name,source\n\
             Works well,4.0,2024-01-15,CBE,Google Play\n\
             No rating,,2024-01-15,CBE,Google Play\n",
        )
        .unwrap();

        assert!(clean(&config).unwrap().is_written());

        let cleaned: Vec<Review> = read_records(&config.clean_path()).unwrap();
        assert_eq!(cleaned[0].rating.as_deref(), Some("4.0"));
        assert_eq!(cleaned[1].rating, None);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().with_data_dir(dir.path());
        std::fs::write(
            config.raw_path(),
            "content,score,at,bank_name,source\n\
             Keeps crashing,1,2024-03-02 11:00:00,Dashen,Google Play\n\
             Keeps crashing,1,2024-03-02 11:00:00,Dashen,Google Play\n\
             Love it,5,2024-03-03 09:15:00,BOA,Google Play\n",
        )
        .unwrap();

        clean(&config).unwrap();
        let first = std::fs::read_to_string(config.clean_path()).unwrap();

        // Feed the cleaned output back in as the raw input.
        std::fs::copy(config.clean_path(), config.raw_path()).unwrap();
        clean(&config).unwrap();
        let second = std::fs::read_to_string(config.clean_path()).unwrap();

        assert_eq!(first, second);
    }
}
