//! CSV persistence for stage outputs.
//!
//! Every stage writes a fresh file; nothing is appended across runs.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

/// Creates the parent directory of `path` if it is missing.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Serializes `records` to `path`, replacing any existing file.
///
/// Returns the number of rows written.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<usize> {
    ensure_parent(path)?;
    debug!(path = %path.display(), rows = records.len(), "Writing CSV");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Deserializes every row of the CSV at `path`.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let record: T =
            result.with_context(|| format!("{}: malformed row {}", path.display(), line + 1))?;
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        name: String,
        count: u32,
    }

    #[test]
    fn test_write_records_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");

        let rows = vec![Row {
            name: "a".into(),
            count: 1,
        }];
        assert_eq!(write_records(&path, &rows).unwrap(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_write_records_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let rows = vec![
            Row {
                name: "a".into(),
                count: 1,
            },
            Row {
                name: "b".into(),
                count: 2,
            },
        ];
        write_records(&path, &rows).unwrap();
        write_records(&path, &rows[..1]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.contains("count")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_read_records_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![Row {
            name: "hello, world".into(),
            count: 7,
        }];
        write_records(&path, &rows).unwrap();

        let back: Vec<Row> = read_records(&path).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_read_records_missing_file() {
        let result: Result<Vec<Row>> = read_records(Path::new("/definitely/not/here.csv"));
        assert!(result.is_err());
    }
}
