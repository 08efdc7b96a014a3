//! Analyzer client: one chat-completion call per email, parsed and strictly
//! validated.
//!
//! Single attempt, no retry, no result cache.

pub mod backend;
pub mod prompts;

pub use backend::ChatBackend;

use std::sync::Arc;
use std::time::Instant;

use openai_client::{strip_code_blocks, truncate_to_char_boundary, ChatRequest, Message, OpenAIClient};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::credentials::Credentials;
use crate::error::{AnalysisError, Result};
use crate::model::AnalysisResult;

/// Sampling temperature for the analysis call.
pub const TEMPERATURE: f32 = 0.3;
/// Response length cap for the analysis call.
pub const MAX_TOKENS: u32 = 500;

const LOG_PREVIEW_BYTES: usize = 200;

pub struct Analyzer {
    backend: Arc<dyn ChatBackend>,
    model: String,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn ChatBackend>, model: impl Into<String>) -> Self {
        let model = model.into();
        info!(model = %model, "Analyzer initialized");
        Self { backend, model }
    }

    /// Analyzer backed by the real OpenAI client.
    pub fn from_credentials(credentials: &Credentials, base_url: Option<&str>) -> Self {
        let mut client = OpenAIClient::new(credentials.api_key.expose_secret());
        if let Some(url) = base_url {
            client = client.with_base_url(url);
        }
        Self::new(Arc::new(client), credentials.model.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The two-message request sent for `content`.
    pub fn build_request(&self, content: &str) -> ChatRequest {
        ChatRequest::new(&self.model)
            .message(Message::system(prompts::SYSTEM_PROMPT))
            .message(Message::user(prompts::format_analyze_prompt(content)))
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
    }

    /// Rate `content` for bias and credibility.
    pub async fn analyze_bias(&self, content: &str) -> Result<AnalysisResult> {
        if content.trim().is_empty() {
            warn!("Refusing to analyze empty content");
            return Err(AnalysisError::InvalidInput);
        }

        info!(content_len = content.chars().count(), "Starting bias analysis");

        let request = self.build_request(content);
        debug!(
            model = %request.model,
            message_count = request.messages.len(),
            temperature = TEMPERATURE,
            max_tokens = MAX_TOKENS,
            prompt_len = request.prompt_len(),
            "Sending analysis request"
        );

        let start = Instant::now();
        let response = self.backend.chat_completion(request).await.map_err(|e| {
            warn!(error = %e, "Analysis request failed");
            AnalysisError::from(e)
        })?;
        info!(
            duration_ms = start.elapsed().as_millis(),
            "Analysis response received"
        );

        parse_analysis(&response.content)
    }
}

/// Strip code fences, parse JSON, validate strictly.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult> {
    let cleaned = strip_code_blocks(text);
    debug!(
        preview = %truncate_to_char_boundary(&cleaned, LOG_PREVIEW_BYTES),
        "Cleaned analysis content"
    );

    let raw: Value = serde_json::from_str(&cleaned).map_err(|e| {
        warn!(error = %e, "Analysis response is not JSON");
        AnalysisError::Schema(format!("response is not valid JSON: {}", e))
    })?;

    AnalysisResult::validate(&raw).map_err(|e| {
        warn!(error = %e, "Analysis response failed validation");
        AnalysisError::from(e)
    })
}
