use crate::error::{CheckError, Result};
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// In-memory copy of a delimited file: a header row plus data rows, with
/// column names kept in their original casing.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Load an entire CSV file into memory. The first record is the header
    /// row. A missing file is reported before any parse attempt.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CheckError::MissingFile(path.display().to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true) // Allow rows with different lengths
            .from_path(path)?;

        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value at (row, column name). The first positional column wins when
    /// headers are duplicated; absent rows or columns yield None.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    /// The first `limit` rows, rendered for console preview
    pub fn preview(&self, limit: usize) -> Vec<String> {
        self.rows
            .iter()
            .take(limit)
            .map(|row| row.join(", "))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset_from(content: &str) -> Dataset {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        Dataset::from_csv_path(&path).unwrap()
    }

    #[test]
    fn test_loads_headers_and_rows() {
        let dataset = dataset_from("id,lat,lon\n1,12.5,77.3\n2,13.0,78.1\n");
        assert_eq!(dataset.columns(), &["id", "lat", "lon"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.value(0, "lat"), Some("12.5"));
        assert_eq!(dataset.value(1, "lon"), Some("78.1"));
    }

    #[test]
    fn test_absent_row_or_column_is_none() {
        let dataset = dataset_from("id,lat\n1,12.5\n");
        assert_eq!(dataset.value(0, "missing"), None);
        assert_eq!(dataset.value(5, "lat"), None);
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let dataset = dataset_from("id , lat \n1,12.5\n");
        assert_eq!(dataset.columns(), &["id", "lat"]);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Dataset::from_csv_path("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, CheckError::MissingFile(_)));
    }
}
