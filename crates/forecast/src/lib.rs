//! # Sales Insight Forecasting
//!
//! Projects the next few months of revenue with a multiplicative random walk
//! whose step size is the series' own historical volatility.
//!
//! This is an illustrative simulation, not a fitted model. The ±10% bounds on
//! each point are fixed bands around the simulated value, not prediction
//! intervals calibrated against realized accuracy.
//!
//! The random source is always passed in explicitly. `ForecastEngine::project`
//! takes any `Rng`; `ForecastEngine::forecast` builds a `ChaCha8Rng` from an
//! optional seed so the same seed replays the same forecast on every platform.

pub mod engine;
pub mod error;
pub mod outlook;
pub mod sampling;

pub use engine::{rng_from_seed, ForecastEngine};
pub use error::ForecastError;
pub use outlook::ForecastOutlook;
