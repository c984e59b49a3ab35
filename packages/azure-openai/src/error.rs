//! Error types for the Azure OpenAI client.

use thiserror::Error;

/// Result type for Azure OpenAI client operations.
pub type Result<T> = std::result::Result<T, AzureOpenAIError>;

/// Azure OpenAI client errors.
#[derive(Debug, Error)]
pub enum AzureOpenAIError {
    /// Configuration error (missing endpoint or key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, content filter)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, schema-nonconforming response)
    #[error("Parse error: {0}")]
    Parse(String),
}
