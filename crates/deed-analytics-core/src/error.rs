use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeedAnalyticsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient input: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DeedAnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        DeedAnalyticsError::SerializationError(e.to_string())
    }
}
