//! The background role. Owns the analyzer and answers analysis requests.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::channel::Inbox;
use super::protocol::{
    BackgroundRequest, BackgroundResponse, NO_EMAIL_CONTENT, NO_EMAIL_DATA, UNKNOWN_MESSAGE_TYPE,
};
use crate::analyzer::Analyzer;
use crate::model::{AnalysisMetadata, EmailContent, SenderInfo};

pub struct AnalyzerHost {
    analyzer: Arc<Analyzer>,
}

impl AnalyzerHost {
    /// The analyzer is built once by the caller and handed in.
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self { analyzer }
    }

    /// Answer one message. Every failure becomes `{error: message}`.
    pub async fn handle(&self, message: Value) -> Value {
        let request = match serde_json::from_value::<BackgroundRequest>(message.clone()) {
            Ok(request) => request,
            Err(_) => {
                warn!(message = %message, "Unknown message type");
                return encode(BackgroundResponse::error(UNKNOWN_MESSAGE_TYPE));
            }
        };

        let response = match request {
            BackgroundRequest::CheckConnection => BackgroundResponse::ok(),
            BackgroundRequest::AnalyzeEmail { data } => self.analyze(data).await,
        };
        encode(response)
    }

    async fn analyze(&self, data: Option<EmailContent>) -> BackgroundResponse {
        let Some(email) = data else {
            error!("Analysis requested without email data");
            return BackgroundResponse::error(NO_EMAIL_DATA);
        };
        if !email.has_body() {
            error!(id = %email.id, "Analysis requested for empty body");
            return BackgroundResponse::error(NO_EMAIL_CONTENT);
        }

        info!(
            subject = %email.subject,
            body_len = email.content_length(),
            sender = %email.sender,
            id = %email.id,
            "Analyzing email"
        );

        match self.analyzer.analyze_bias(&email.body).await {
            Ok(result) => {
                let result = result
                    .with_sender(SenderInfo::new(&email.sender_name, &email.sender))
                    .with_metadata(AnalysisMetadata::new(
                        email.id.clone(),
                        &email.subject,
                        email.content_length(),
                    ));
                info!(id = %email.id, "Analysis complete");
                BackgroundResponse::analysis(result)
            }
            Err(e) => {
                error!(id = %email.id, error = %e, "Analysis error");
                BackgroundResponse::error(e.to_string())
            }
        }
    }

    /// Serve `inbox`. Each request gets its own task, which keeps the reply
    /// slot until the analysis settles.
    pub fn spawn(self, mut inbox: Inbox) -> JoinHandle<()> {
        let host = Arc::new(self);
        tokio::spawn(async move {
            while let Some(envelope) = inbox.recv().await {
                let host = host.clone();
                tokio::spawn(async move {
                    let reply = host.handle(envelope.message().clone()).await;
                    envelope.reply(reply);
                });
            }
        })
    }
}

fn encode(response: BackgroundResponse) -> Value {
    serde_json::to_value(response).unwrap_or_else(|e| {
        error!(error = %e, "Could not encode response");
        json!({ "error": "Could not encode analysis response" })
    })
}
