//! # Sales Insight Ingestion
//!
//! Turns a raw sales table into validated `SalesRecord`s.
//!
//! - `RawTable`: untyped header + rows, read from CSV or built in memory.
//! - `Preprocessor`: checks the schema, rejects invalid rows, parses dates.
//! - `RecordFilter`: optional category/region selection applied to clean records.
//!
//! Nothing here deduplicates or imputes; a table either validates in full or the
//! first offending row is reported.

pub mod error;
pub mod filter;
pub mod preprocessor;
pub mod table;

pub use error::IngestError;
pub use filter::RecordFilter;
pub use preprocessor::{parse_date, Preprocessor, REQUIRED_COLUMNS};
pub use table::RawTable;
