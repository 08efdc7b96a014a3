//! Wire messages exchanged between the trigger and the two hosts.
//!
//! Requests are tagged by `type`; replies are plain objects whose present
//! field says what happened.

use serde::{Deserialize, Serialize};

use crate::model::{AnalysisResult, EmailContent};

pub const UNKNOWN_MESSAGE_TYPE: &str = "Unknown message type";
pub const NO_EMAIL_DATA: &str = "No email data provided";
pub const NO_EMAIL_CONTENT: &str = "No email content found in the current view";

/// Requests understood by the extractor host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentRequest {
    GetEmailContent,
}

/// Extractor host reply: the email, `null` for none, or an error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentResponse {
    Error { error: String },
    Email(Option<EmailContent>),
}

/// Requests understood by the analyzer host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackgroundRequest {
    /// `{type: "ANALYZE_EMAIL", data: EmailContent}`
    AnalyzeEmail {
        #[serde(default)]
        data: Option<EmailContent>,
    },

    /// Liveness check, answered with `{status: "ok"}`
    CheckConnection,
}

/// Analyzer host reply. Exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl BackgroundResponse {
    pub fn analysis(result: AnalysisResult) -> Self {
        Self {
            analysis: Some(result),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn ok() -> Self {
        Self {
            status: Some("ok".to_string()),
            ..Default::default()
        }
    }
}
