//! # Sales Insight Risk Scoring
//!
//! Combines three independent warning signs into a score from 0 to 100:
//!
//! - the most recent month-over-month growth is negative;
//! - growth has been volatile (population standard deviation above a cutoff);
//! - the forecast averages below the historical monthly mean.
//!
//! Each sign contributes a fixed weight, so only a handful of scores are
//! attainable (0, 30, 40, 60, 70, 100 with the default weights). The level is a
//! step function of the score, see `core_types::RiskLevel::from_score`.

pub mod error;
pub mod scorer;

pub use error::RiskError;
pub use scorer::{RiskAssessment, RiskFactors, RiskScorer};
