//! # Sales Insight Engine
//!
//! The orchestrator. `Pipeline` runs every analytical stage in dependency order
//! and returns an `AnalysisRun` holding each intermediate plus the final
//! `ResultBundle`.
//!
//! Stage errors are not caught here. They convert into `EngineError` and
//! propagate to the caller, which decides what the user sees.

pub mod bundle;
pub mod error;
pub mod pipeline;
pub mod summary;

pub use bundle::ResultBundle;
pub use error::EngineError;
pub use pipeline::{AnalysisRun, Pipeline};
pub use summary::{recommendations, SummaryComposer, SummaryInputs, EXPORT_DECIMALS};
