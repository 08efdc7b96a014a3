//! Typed errors for the analyzer library.
//!
//! Each role converts its own failures to a message string before replying
//! over a channel; these enums are what the roles work with locally.

use openai_client::OpenAIError;
use thiserror::Error;

/// Failures of a single analysis call.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Empty or whitespace-only content; nothing was sent
    #[error("No email content provided")]
    InvalidInput,

    /// The request failed in flight or the service answered non-2xx
    #[error("{}", transport_message(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The service answered but the body is not a usable analysis
    #[error("Invalid analysis response: {0}")]
    Schema(String),
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("OpenAI API error: {} - {}", code, message),
        None => format!("Network error: {}", message),
    }
}

impl From<OpenAIError> for AnalysisError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Api { status, message } => AnalysisError::Transport {
                status: Some(status),
                message,
            },
            OpenAIError::Network(message) | OpenAIError::Config(message) => {
                AnalysisError::Transport {
                    status: None,
                    message,
                }
            }
            OpenAIError::Parse(reason) => AnalysisError::Schema(reason),
        }
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(err: ValidationError) -> Self {
        AnalysisError::Schema(err.to_string())
    }
}

/// Why a parsed analysis failed strict validation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("missing required section: {0}")]
    MissingSection(&'static str),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field {0} is not a number")]
    NotNumeric(String),

    #[error("field {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("field {field} has invalid value {value:?}")]
    InvalidEnum { field: String, value: String },

    #[error("paragraphs must be a whole number of at least 1")]
    InvalidParagraphs,

    /// The retired two-score `political` shape is refused rather than
    /// converted.
    #[error("unsupported schema: {0}")]
    UnsupportedSchema(&'static str),
}

/// Failures while loading or caching API credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("OpenAI API key not found in {0}")]
    MissingApiKey(String),

    #[error("failed to read bundled config {path}: {reason}")]
    Config { path: String, reason: String },
}

/// Failures surfaced at the trigger after a relay round trip.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RelayError {
    /// The page has no open email
    #[error("No email found. Open an email to analyze.")]
    NotFound,

    /// A hop could not be reached or answered garbage
    #[error("{0}. Please try again.")]
    Transport(String),

    /// The analyzer host replied with an error message
    #[error("{0}")]
    Analysis(String),

    /// A previous round trip from this trigger is still outstanding
    #[error("An analysis is already in progress")]
    Busy,
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for relay round trips.
pub type RelayResult<T> = std::result::Result<T, RelayError>;
