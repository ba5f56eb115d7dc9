//! Column-oriented access to CSV files whose full schema is not known ahead
//! of time.
//!
//! The analyzer must carry every input column through to its output, and the
//! visualizer looks columns up by name, so both work on a [`Table`] rather
//! than a fixed serde struct.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::path::Path;

use crate::output::ensure_parent;

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut rdr = csv::Reader::from_reader(file);

        let headers = rdr
            .headers()
            .with_context(|| format!("{}: missing header row", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.with_context(|| format!("{}: malformed row", path.display()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like [`Table::column_index`], but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        match self.column_index(name) {
            Some(idx) => Ok(idx),
            None => bail!("column `{}` not found (have: {})", name, self.headers.join(", ")),
        }
    }

    /// Values of column `idx`; short rows yield an empty string.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// Replaces column `name` if it exists, otherwise appends it.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            bail!(
                "column `{}` has {} values but table has {} rows",
                name,
                values.len(),
                self.rows.len()
            );
        }

        let width = self.headers.len();
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    if row.len() < width {
                        row.resize(width, String::new());
                    }
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.resize(width, String::new());
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["review_text".into(), "bank_name".into()],
            vec![
                vec!["slow".into(), "CBE".into()],
                vec!["fine".into(), "BOA".into()],
            ],
        )
    }

    #[test]
    fn test_set_column_appends() {
        let mut table = sample();
        table
            .set_column("score", vec!["0.1".into(), "0.2".into()])
            .unwrap();

        assert_eq!(table.headers().len(), 3);
        let idx = table.column_index("score").unwrap();
        let values: Vec<_> = table.column(idx).collect();
        assert_eq!(values, vec!["0.1", "0.2"]);
    }

    #[test]
    fn test_set_column_replaces_existing() {
        let mut table = sample();
        table
            .set_column("bank_name", vec!["X".into(), "Y".into()])
            .unwrap();

        assert_eq!(table.headers().len(), 2);
        let values: Vec<_> = table.column(1).collect();
        assert_eq!(values, vec!["X", "Y"]);
    }

    #[test]
    fn test_set_column_length_mismatch() {
        let mut table = sample();
        assert!(table.set_column("score", vec!["1".into()]).is_err());
    }

    #[test]
    fn test_require_column_missing() {
        let table = sample();
        let err = table.require_column("theme").unwrap_err();
        assert!(err.to_string().contains("theme"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        sample().write(&path).unwrap();

        let back = Table::read(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.column_index("bank_name"), Some(1));
    }
}
