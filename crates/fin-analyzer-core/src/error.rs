use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Invalid rule for {field}: {reason}")]
    InvalidRule { field: String, reason: String },

    #[error("Capability '{capability}' is not granted to role '{role}'")]
    CapabilityNotGranted { capability: String, role: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(e: serde_json::Error) -> Self {
        AnalyzerError::SerializationError(e.to_string())
    }
}
