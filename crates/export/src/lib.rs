//! Writers for a finished analysis run.
//!
//! The bundle goes out as pretty JSON. The tabular view is one CSV file per
//! sheet: `monthly_sales.csv` and `anomalies.csv`.

pub mod error;
pub mod json;
pub mod sheets;

pub use error::ExportError;
pub use json::{to_json_pretty, write_json};
pub use sheets::{
    anomalies_csv, export_sheets, monthly_csv, write_anomalies_csv, write_monthly_csv,
    ANOMALIES_SHEET, MONTHLY_SHEET,
};
