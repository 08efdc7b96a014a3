//! The role living next to the page. Answers content requests by running
//! the extractor against its current snapshot.

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::channel::Inbox;
use super::protocol::{ContentRequest, ContentResponse, UNKNOWN_MESSAGE_TYPE};
use crate::extractor::Extractor;

pub struct ExtractorHost {
    extractor: Extractor,
    page_html: String,
}

impl ExtractorHost {
    pub fn new(extractor: Extractor, page_html: impl Into<String>) -> Self {
        Self {
            extractor,
            page_html: page_html.into(),
        }
    }

    /// Answer one message. Extraction runs synchronously, inside the
    /// handler.
    pub fn handle(&self, message: &Value) -> Value {
        let response = match serde_json::from_value::<ContentRequest>(message.clone()) {
            Ok(ContentRequest::GetEmailContent) => {
                let content = self.extractor.extract(&self.page_html);
                info!(
                    found = content.is_some(),
                    "Sending email content"
                );
                ContentResponse::Email(content)
            }
            Err(_) => {
                warn!(message = %message, "Unknown message type");
                ContentResponse::Error {
                    error: UNKNOWN_MESSAGE_TYPE.to_string(),
                }
            }
        };

        serde_json::to_value(response).unwrap_or(Value::Null)
    }

    /// Serve `inbox` until every port is dropped. Aborting the task plays the
    /// part of the page navigating away.
    pub fn spawn(self, mut inbox: Inbox) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(envelope) = inbox.recv().await {
                let reply = self.handle(envelope.message());
                envelope.reply(reply);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAGE: &str = r#"<div data-message-id="m9"><div dir="ltr">Hello world</div></div>"#;

    #[test]
    fn answers_with_content() {
        let host = ExtractorHost::new(Extractor::default(), PAGE);
        let reply = host.handle(&json!({"type": "GET_EMAIL_CONTENT"}));

        assert_eq!(reply["body"], "Hello world");
        assert_eq!(reply["id"], "m9");
    }

    #[test]
    fn answers_null_when_nothing_open() {
        let host = ExtractorHost::new(Extractor::default(), "<p>Inbox zero</p>");
        assert_eq!(host.handle(&json!({"type": "GET_EMAIL_CONTENT"})), Value::Null);
    }

    #[test]
    fn rejects_unknown_types() {
        let host = ExtractorHost::new(Extractor::default(), PAGE);
        let reply = host.handle(&json!({"type": "SCROLL_TO_TOP"}));
        assert_eq!(reply["error"], UNKNOWN_MESSAGE_TYPE);
    }
}
