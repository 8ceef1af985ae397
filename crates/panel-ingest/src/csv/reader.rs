//! CSV extract reading into raw string columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::layout::SourceLayout;

use super::header::normalize_headers;

/// Identifies the extract being read, for error context.
#[derive(Debug, Clone, Copy)]
pub struct ExtractRef<'a> {
    pub group: &'a str,
    pub year_label: &'a str,
    pub path: &'a Path,
}

impl ExtractRef<'_> {
    pub fn format_error(&self, message: impl Into<String>) -> IngestError {
        IngestError::Format {
            group: self.group.to_string(),
            year_label: self.year_label.to_string(),
            path: self.path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn not_found(&self) -> IngestError {
        IngestError::SourceNotFound {
            group: self.group.to_string(),
            year_label: self.year_label.to_string(),
            path: self.path.to_path_buf(),
        }
    }
}

/// Untyped table: canonical headers and one string vector per column.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<Option<String>>>,
    pub height: usize,
}

/// Rejects UTF-16 input, which the CSV reader would misparse.
fn validate_encoding(extract: &ExtractRef<'_>) -> Result<()> {
    let mut file = File::open(extract.path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            extract.not_found()
        } else {
            IngestError::FileRead {
                path: extract.path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: extract.path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 0 {
        return Err(extract.format_error("file is empty"));
    }
    if bytes_read == 2 && (buffer == [0xFF, 0xFE] || buffer == [0xFE, 0xFF]) {
        return Err(extract.format_error("UTF-16 input is not supported"));
    }
    Ok(())
}

/// Reads the header record as written, before any renaming by the frame reader.
fn read_header_record(extract: &ExtractRef<'_>) -> Result<Vec<String>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(extract.path)
        .map_err(|e| extract.format_error(e.to_string()))?;
    let mut record = ::csv::StringRecord::new();
    let found = reader
        .read_record(&mut record)
        .map_err(|e| extract.format_error(e.to_string()))?;
    if !found {
        return Err(extract.format_error("missing header row"));
    }
    Ok(record.iter().map(str::to_string).collect())
}

/// Reads a CSV extract with every column as string.
///
/// Cells that are empty after trimming, or equal to one of the layout's NA
/// tokens, are `None`. Headers are normalized to lowercase; duplicates,
/// exact or after lowercasing, are a format error.
pub fn read_raw_table(extract: &ExtractRef<'_>, layout: &SourceLayout) -> Result<RawTable> {
    validate_encoding(extract)?;

    let raw_headers = read_header_record(extract)?;
    let headers = normalize_headers(&raw_headers).map_err(|msg| extract.format_error(msg))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(extract.path.to_path_buf()))
        .map_err(|e| extract.format_error(e.to_string()))?
        .finish()
        .map_err(|e| extract.format_error(e.to_string()))?;

    if df.width() != headers.len() {
        return Err(extract.format_error(format!(
            "header has {} columns but {} were read",
            headers.len(),
            df.width()
        )));
    }

    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let values = column
            .as_materialized_series()
            .str()
            .map_err(|e| extract.format_error(e.to_string()))?
            .into_iter()
            .map(|cell| normalize_cell(cell, layout))
            .collect::<Vec<_>>();
        columns.push(values);
    }

    if df.width() > 500 {
        tracing::warn!(
            path = %extract.path.display(),
            columns = df.width(),
            "Extract has more than 500 columns"
        );
    }

    Ok(RawTable {
        headers,
        columns,
        height: df.height(),
    })
}

fn normalize_cell(cell: Option<&str>, layout: &SourceLayout) -> Option<String> {
    let trimmed = cell?.trim();
    if trimmed.is_empty() || layout.is_na_token(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn no_tokens() -> SourceLayout {
        SourceLayout::new("/data").with_na_tokens(Vec::new())
    }

    fn extract(path: &Path) -> ExtractRef<'_> {
        ExtractRef {
            group: "household",
            year_label: "2001",
            path,
        }
    }

    #[test]
    fn test_read_raw_table_lowercases_headers() {
        let file = create_temp_csv(b"SERNUM,HhInc\n1,200\n2,\n");
        let table = read_raw_table(&extract(file.path()), &no_tokens()).unwrap();

        assert_eq!(table.headers, vec!["sernum", "hhinc"]);
        assert_eq!(table.height, 2);
        assert_eq!(table.columns[1], vec![Some("200".to_string()), None]);
    }

    #[test]
    fn test_read_raw_table_na_tokens() {
        let file = create_temp_csv(b"a,b\nNA,x\n.,y\n");
        let table = read_raw_table(&extract(file.path()), &SourceLayout::new("/data")).unwrap();

        assert_eq!(table.columns[0], vec![None, None]);
        assert_eq!(
            table.columns[1],
            vec![Some("x".to_string()), Some("y".to_string())]
        );
    }

    #[test]
    fn test_read_raw_table_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_raw_table(&extract(file.path()), &no_tokens());

        assert!(matches!(result, Err(IngestError::Format { .. })));
    }

    #[test]
    fn test_read_raw_table_utf16_rejected() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'a', 0x00]);
        let result = read_raw_table(&extract(file.path()), &no_tokens());

        assert!(matches!(result, Err(IngestError::Format { .. })));
    }

    #[test]
    fn test_read_raw_table_missing_file() {
        let path = Path::new("/nonexistent/household_2001.csv");
        let result = read_raw_table(&extract(path), &no_tokens());

        assert!(matches!(result, Err(IngestError::SourceNotFound { .. })));
    }

    #[test]
    fn test_read_raw_table_exact_duplicate_header_rejected() {
        let file = create_temp_csv(b"age,age\n1,2\n");
        let result = read_raw_table(&extract(file.path()), &no_tokens());

        match result {
            Err(IngestError::Format { message, .. }) => assert!(message.contains("age")),
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_raw_table_keeps_na_lookalikes_without_tokens() {
        let file = create_temp_csv(b"a\nNA\n");
        let table = read_raw_table(&extract(file.path()), &no_tokens()).unwrap();

        assert_eq!(table.columns[0], vec![Some("NA".to_string())]);
    }
}
