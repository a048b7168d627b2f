use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Risk parameters from configuration are invalid: {0}")]
    InvalidParameters(String),

    #[error("Not enough data to score risk: {0}")]
    InsufficientData(String),

    #[error(transparent)]
    Analytics(#[from] analytics::AnalyticsError),
}
