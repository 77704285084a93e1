use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid loan parameters for {field}: {reason}")]
    InvalidLoanParameters { field: String, reason: String },

    #[error("Empty series: annual interest series has no entries")]
    EmptySeries,

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidLoanParameters {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}
