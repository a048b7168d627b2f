use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Monthly series is out of order: {0} does not come after {1}")]
    UnorderedPeriods(String, String),
}
