//! Error types for the Document Intelligence client.

use thiserror::Error;

/// Result type for Document Intelligence operations.
pub type Result<T> = std::result::Result<T, DocIntelError>;

/// Document Intelligence client errors.
#[derive(Debug, Error)]
pub enum DocIntelError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, failed analysis operation)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The analysis operation never reached a terminal state
    #[error("Analysis did not complete after {0} polls")]
    Timeout(u32),
}
