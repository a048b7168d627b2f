use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecisionError {
    #[error("Trend classification needs at least {required} months of data, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}
