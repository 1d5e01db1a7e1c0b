use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No financial statement available: import a business profile or pass a statement explicitly")]
    NoStatement,

    #[error("Insufficient history: {required} statements required, {available} available")]
    InsufficientHistory { required: usize, available: usize },

    #[error("No current financial statement to forecast from")]
    NoCurrentStatement,

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::SerializationError(e.to_string())
    }
}
