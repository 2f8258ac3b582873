use thiserror::Error;

/// Errors surfaced at the crate's API boundary. Per-frame problems
/// (missing keypoints, low confidence, degenerate body scale, absent
/// detections) are absorbed by the engine as "this frame or phase
/// contributes nothing" and never reach this type.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        // Syntax, premature EOF, and shape mismatches all come from the
        // parse side; only I/O failures can originate while encoding a
        // response.
        match err.classify() {
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Eof
            | serde_json::error::Category::Data => {
                AnalysisError::DeserializationError(err.to_string())
            }
            serde_json::error::Category::Io => {
                AnalysisError::SerializationError(err.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
