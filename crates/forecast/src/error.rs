use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Not enough history to forecast from: {0}")]
    InsufficientData(String),

    #[error("Forecast calculation error: {0}")]
    Calculation(String),

    #[error(transparent)]
    Analytics(#[from] analytics::AnalyticsError),
}
