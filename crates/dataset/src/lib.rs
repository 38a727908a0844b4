// In crates/dataset/src/lib.rs

use core_types::InputRow;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub mod error;

// Re-export the most important types for easy access.
pub use error::{Error, Result};

/// The only column the job requires.
pub const CLOSE_COLUMN: &str = "close";

/// Cell values treated as a missing observation rather than a parse error.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loads the ordered price table from a CSV file with a header row.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<InputRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    read_rows(file)
}

/// Parses CSV content into rows, validating that a `close` column exists.
///
/// Row order is preserved. Only the `close` column is typed; every other
/// column is accepted as-is and discarded. A row shorter than the header is
/// padded with missing values; a longer one is an error.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<InputRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?;
    let expected = headers.len();
    let close_index = close_column_index(headers).ok_or(Error::MissingCloseColumn)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > expected {
            return Err(Error::TooManyFields {
                row: index + 1,
                expected,
                found: record.len(),
            });
        }

        let cell = record.get(close_index).unwrap_or_default();
        rows.push(InputRow::new(parse_close(cell, index + 1)?));
    }

    if rows.is_empty() {
        return Err(Error::Empty);
    }

    Ok(rows)
}

fn close_column_index(headers: &StringRecord) -> Option<usize> {
    headers.iter().position(|name| name == CLOSE_COLUMN)
}

/// Parses one `close` cell. NA tokens become `NaN`.
fn parse_close(cell: &str, row: usize) -> Result<f64> {
    let trimmed = cell.trim();
    if NA_TOKENS.contains(&trimmed) {
        return Ok(f64::NAN);
    }

    trimmed.parse::<f64>().map_err(|_| Error::InvalidValue {
        row,
        value: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn closes(rows: &[InputRow]) -> Vec<f64> {
        rows.iter().map(|row| row.close).collect()
    }

    #[test]
    fn test_reads_close_column_in_order() {
        let csv = "timestamp,open,close\n1,9.5,10\n2,10.5,11\n3,11.0,9\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(closes(&rows), vec![10.0, 11.0, 9.0]);
    }

    #[test]
    fn test_header_names_are_trimmed() {
        let csv = "timestamp, close \n1,10.25\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(closes(&rows), vec![10.25]);
    }

    #[test]
    fn test_missing_close_column() {
        let csv = "timestamp,open\n1,10\n";
        let err = read_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingCloseColumn));
        assert_eq!(err.to_string(), "Missing required 'close' column in dataset.");
    }

    #[test]
    fn test_column_name_is_case_sensitive() {
        let csv = "Close\n10\n";
        assert!(matches!(read_rows(csv.as_bytes()), Err(Error::MissingCloseColumn)));
    }

    #[test]
    fn test_na_cells_become_missing_values() {
        let csv = "close\n10\n\nNaN\nNA\n12\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        // The blank line is skipped by the reader, the NA tokens are kept as rows.
        assert_eq!(rows.len(), 4);
        assert!(rows[1].is_missing());
        assert!(rows[2].is_missing());
        assert_eq!(rows[3].close, 12.0);
    }

    #[test]
    fn test_empty_cell_in_wider_table_is_missing() {
        let csv = "open,close\n1,\n2,3\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert!(rows[0].is_missing());
        assert_eq!(rows[1].close, 3.0);
    }

    #[test]
    fn test_short_row_pads_close_as_missing() {
        let csv = "timestamp,open,close\n1,9.5,10\n2,10.5\n3,11.0,9\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].close, 10.0);
        assert!(rows[1].is_missing());
        assert_eq!(rows[2].close, 9.0);
    }

    #[test]
    fn test_long_row_is_rejected() {
        let csv = "timestamp,close\n1,10\n2,11,extra\n";
        let err = read_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::TooManyFields { row: 2, expected: 2, found: 3 }));
    }

    #[test]
    fn test_non_numeric_close_reports_row() {
        let csv = "close\n10\nabc\n";
        let err = read_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { row: 2, .. }));
        assert_eq!(err.to_string(), "Invalid numeric value 'abc' in 'close' column at row 2");
    }

    #[test]
    fn test_header_only_table_is_empty() {
        assert!(matches!(read_rows("close\n".as_bytes()), Err(Error::Empty)));
    }

    #[test]
    fn test_load_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "close\n1.5\n2.5\n").unwrap();
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(closes(&rows), vec![1.5, 2.5]);
    }

    #[test]
    fn test_load_rows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rows(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
