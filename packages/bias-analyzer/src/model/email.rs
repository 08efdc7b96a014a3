//! The open message as read off the page.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One extracted email.
///
/// `None` in an `Option<EmailContent>` means the page had no usable message;
/// a found message always has a non-empty `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContent {
    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub subject: String,

    /// Sender address
    #[serde(default)]
    pub sender: String,

    /// Sender display name
    #[serde(default, alias = "name")]
    pub sender_name: String,

    #[serde(default)]
    pub id: String,
}

impl EmailContent {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            subject: String::new(),
            sender: String::new(),
            sender_name: String::new(),
            id: fallback_id(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_sender(mut self, address: impl Into<String>, name: impl Into<String>) -> Self {
        self.sender = address.into();
        self.sender_name = name.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// True when the body holds something other than whitespace.
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Body length in characters.
    pub fn content_length(&self) -> usize {
        self.body.chars().count()
    }
}

/// Identifier used when the page does not carry a message id.
pub fn fallback_id() -> String {
    format!("generated-{}", Utc::now().timestamp_millis())
}
