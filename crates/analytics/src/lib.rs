//! # Sales Insight Analytics
//!
//! The descriptive half of the pipeline: everything computed directly from the
//! clean records or the monthly series without any policy judgement.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O, no shared state. Each calculator is a stateless
//!   struct whose methods take inputs by reference and return fresh values.
//! - **Decimal throughout:** revenue is money, so every statistic here is a
//!   `Decimal`.
//!
//! ## Public API
//!
//! - `TimeSeriesAggregator`: records → `MonthlySeries` with growth and moving average.
//! - `CategoryRanker`: revenue per category (and per region) in descending order.
//! - `AnomalyDetector`: z-score outlier months.
//! - `KpiSummarizer`: average, best/worst month and volatility.
//! - `stats`: the small set of shared statistical helpers.

pub mod anomaly;
pub mod error;
pub mod kpi;
pub mod ranking;
pub mod stats;
pub mod timeseries;

pub use anomaly::AnomalyDetector;
pub use error::AnalyticsError;
pub use kpi::{KpiReport, KpiSummarizer};
pub use ranking::{BreakdownEntry, CategoryRanker, Dimension, RevenueBreakdown};
pub use timeseries::{TimeSeriesAggregator, MOVING_AVERAGE_WINDOW};
