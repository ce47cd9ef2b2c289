// Risk assessment error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Unparseable date in {field}: {value:?}")]
    InvalidDate { field: String, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
