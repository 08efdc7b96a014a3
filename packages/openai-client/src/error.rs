//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response (DNS, connect, TLS, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the body text returned by the service
    #[error("OpenAI API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose envelope could not be read
    #[error("Parse error: {0}")]
    Parse(String),
}

impl OpenAIError {
    /// HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            OpenAIError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
