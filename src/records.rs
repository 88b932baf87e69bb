//! Readers for the event-type column of a record file.
//!
//! - [`LineReader`] — one label per line.
//! - [`CsvColumnReader`] — one named column of a CSV file with a header row,
//!   streamed record by record.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::NormalizeError;

/// Reads every record's label, one entry per record, in file order.
pub trait LabelReader {
    fn read_labels(&self, path: &Path) -> Result<Vec<String>>;
}

/// Pick a reader from the file extension: `.csv` uses `column`, anything else
/// is read line by line.
pub fn reader_for(path: &Path, column: &str) -> Box<dyn LabelReader> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        Box::new(CsvColumnReader::new(column))
    } else {
        Box::new(LineReader)
    }
}

pub struct LineReader;

impl LabelReader for LineReader {
    fn read_labels(&self, path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading labels from {}", path.display()))?;
        Ok(parse_lines(&content))
    }
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct CsvColumnReader {
    column: String,
}

impl CsvColumnReader {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }
}

impl LabelReader for CsvColumnReader {
    fn read_labels(&self, path: &Path) -> Result<Vec<String>> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening records {}", path.display()))?;
        extract_column(file, &self.column)
            .with_context(|| format!("reading records from {}", path.display()))
    }
}

/// Pull one column (matched case-insensitively against the header) out of CSV input.
///
/// Rows shorter than the header yield an empty label. Invalid UTF-8 is
/// replaced rather than rejected.
fn extract_column<R: Read>(reader: R, column: &str) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(NormalizeError::InvalidLabelSet {
            reason: "record file is empty; expected a header row".to_string(),
        }
        .into());
    }

    let idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .ok_or_else(|| NormalizeError::InvalidLabelSet {
            reason: format!(
                "column '{}' not found in header [{}]",
                column,
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        })?;

    let mut labels = Vec::new();
    for (line_num, result) in csv_reader.byte_records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error at record {}", line_num + 2))?;
        let label = record
            .get(idx)
            .map(|field| String::from_utf8_lossy(field).trim().to_string())
            .unwrap_or_default();
        labels.push(label);
    }

    Ok(labels)
}
