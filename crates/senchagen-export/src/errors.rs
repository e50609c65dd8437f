use thiserror::Error;

/// Errors emitted by the export engine.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<senchagen_core::Error> for ExportError {
    fn from(err: senchagen_core::Error) -> Self {
        ExportError::InvalidSchema(err.to_string())
    }
}
