use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Preprocessing failed: {0}")]
    Ingest(#[from] ingest::IngestError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Decision error: {0}")]
    Decision(#[from] decision::DecisionError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] forecast::ForecastError),

    #[error("Risk scoring error: {0}")]
    Risk(#[from] risk::RiskError),

    #[error("Not enough data to run the pipeline: {0}")]
    InsufficientData(String),
}
