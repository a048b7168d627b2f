use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid value in row {row}, column '{column}': {reason}")]
    Validation {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Failed to read sales table: {0}")]
    Csv(#[from] csv::Error),
}
