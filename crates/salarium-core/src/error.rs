use thiserror::Error;

/// Application-wide error types for Salarium.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (building or sending).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Server answered with a non-success status. The body is kept so
    /// callers can inspect provider-specific payloads.
    #[error("HTTP {status_code} for {url}")]
    StatusError {
        status_code: u16,
        url: String,
        body: String,
    },

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),
}
