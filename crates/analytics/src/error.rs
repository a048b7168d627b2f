use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    InsufficientData(String),

    #[error("Standard deviation is zero or undefined for '{0}'")]
    DegenerateDistribution(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),

    #[error(transparent)]
    Series(#[from] CoreError),
}
