//! The seam between the analyzer and the chat-completion service.

use async_trait::async_trait;
use openai_client::{ChatRequest, ChatResponse, OpenAIClient};

/// One chat-completion call. Implemented by the real client and by test
/// doubles.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat_completion(&self, request: ChatRequest) -> openai_client::Result<ChatResponse>;
}

#[async_trait]
impl ChatBackend for OpenAIClient {
    async fn chat_completion(&self, request: ChatRequest) -> openai_client::Result<ChatResponse> {
        OpenAIClient::chat_completion(self, request).await
    }
}
