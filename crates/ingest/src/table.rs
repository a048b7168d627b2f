use crate::error::IngestError;
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// Cell values read as missing, matching what spreadsheet exports commonly emit.
const NULL_TOKENS: [&str; 6] = ["", "na", "n/a", "nan", "null", "none"];

/// An untyped sales table: one header row followed by data rows.
///
/// Rows may be shorter than the header; absent trailing cells read as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads a CSV table with a header row. Surrounding whitespace is trimmed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(rows = rows.len(), "Read raw sales table.");
        Ok(Self { headers, rows })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively after trimming.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// The cell at `(row, column)`, or `None` when it is absent or a null token.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let value = self.rows.get(row)?.get(column)?.trim();
        if NULL_TOKENS.iter().any(|t| value.eq_ignore_ascii_case(t)) {
            None
        } else {
            Some(value)
        }
    }
}
