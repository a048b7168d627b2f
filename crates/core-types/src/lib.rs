//! # Sales Insight Core Types
//!
//! The shared vocabulary of the analytics pipeline. Every stage communicates only
//! through the types defined here; no stage reaches into another's internals.
//!
//! - `SalesRecord`: one validated sale. Revenue is always derived, never stored.
//! - `Period`: a calendar year-month bucket.
//! - `MonthlySeries`: the chronologically ordered series of `MonthlyPoint`s.
//! - `CategoryTotal`, `ForecastPoint`, `AnomalyEvent`: per-stage outputs.

pub mod enums;
pub mod error;
pub mod period;
pub mod record;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use enums::{AnomalyKind, BusinessHealth, RiskLevel};
pub use error::CoreError;
pub use period::Period;
pub use record::SalesRecord;
pub use series::{AnomalyEvent, CategoryTotal, ForecastPoint, MonthlyPoint, MonthlySeries};
