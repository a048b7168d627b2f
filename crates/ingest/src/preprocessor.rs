use crate::error::IngestError;
use crate::table::RawTable;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core_types::{CoreError, SalesRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

/// The six columns every sales table must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = ["date", "product", "category", "region", "unit_price", "quantity"];

/// Accepted header names for the unit price, in lookup order.
const PRICE_COLUMNS: [&str; 2] = ["unit_price", "price"];

const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// Parses a date in any of the common spreadsheet and ISO forms.
///
/// Slash-separated dates are read month-first. Timestamps keep only their date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Resolved column positions for one table.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    product: usize,
    category: usize,
    region: usize,
    unit_price: usize,
    quantity: usize,
}

/// Normalizes a raw table into validated sales records.
///
/// The output has exactly one record per input row, in input order.
#[derive(Debug, Default, Clone)]
pub struct Preprocessor {}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&self, table: &RawTable) -> Result<Vec<SalesRecord>, IngestError> {
        let columns = self.resolve_columns(table)?;

        let records = (0..table.len())
            .map(|row| self.process_row(table, row, &columns))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(records = records.len(), "Sales table preprocessed.");
        Ok(records)
    }

    /// Checks the schema, reporting every missing column at once.
    fn resolve_columns(&self, table: &RawTable) -> Result<ColumnMap, IngestError> {
        let mut missing = Vec::new();
        let mut find = |name: &str| match table.column_index(name) {
            Some(idx) => idx,
            None => {
                missing.push(name.to_string());
                usize::MAX
            }
        };

        let date = find("date");
        let product = find("product");
        let category = find("category");
        let region = find("region");
        let unit_price = PRICE_COLUMNS
            .iter()
            .find_map(|name| table.column_index(name))
            .unwrap_or_else(|| find("unit_price"));
        let quantity = find("quantity");

        if !missing.is_empty() {
            return Err(IngestError::Schema { missing });
        }

        Ok(ColumnMap {
            date,
            product,
            category,
            region,
            unit_price,
            quantity,
        })
    }

    fn process_row(
        &self,
        table: &RawTable,
        row: usize,
        columns: &ColumnMap,
    ) -> Result<SalesRecord, IngestError> {
        // Rows are reported 1-based, matching what a user sees under the header.
        let line = row + 1;
        let invalid = |column: &str, reason: String| IngestError::Validation {
            row: line,
            column: column.to_string(),
            reason,
        };
        let required = |column: &str, idx: usize| {
            table
                .cell(row, idx)
                .ok_or_else(|| invalid(column, "value is missing".to_string()))
        };

        let date_raw = required("date", columns.date)?;
        let product = required("product", columns.product)?;
        let category = required("category", columns.category)?;
        let region = required("region", columns.region)?;
        let price_raw = required("unit_price", columns.unit_price)?;
        let quantity_raw = required("quantity", columns.quantity)?;

        let date = parse_date(date_raw)
            .ok_or_else(|| invalid("date", format!("'{date_raw}' is not a recognizable date")))?;
        let unit_price = parse_decimal(price_raw)
            .ok_or_else(|| invalid("unit_price", format!("'{price_raw}' is not a number")))?;
        let quantity = parse_decimal(quantity_raw)
            .ok_or_else(|| invalid("quantity", format!("'{quantity_raw}' is not a number")))?;

        // Positivity and revenue range are enforced by the record itself.
        SalesRecord::new(date, product, category, region, unit_price, quantity).map_err(|e| match e {
            CoreError::InvalidInput(field, reason) => invalid(&field, reason),
            other => invalid("record", other.to_string()),
        })
    }
}
