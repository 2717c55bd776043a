use thiserror::Error;

/// Errors produced while parsing catalog documents.
#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
