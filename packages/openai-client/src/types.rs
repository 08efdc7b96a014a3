//! OpenAI chat-completion request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat Completion
// =============================================================================

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "gpt-4-turbo-preview", "gpt-4o")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in the completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Total characters across all message bodies.
    pub fn prompt_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.chars().count()).sum()
    }
}

/// Chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Content of the first choice
    pub content: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Build a response without usage data (test doubles, proxies).
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }
}

/// Raw chat response from API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessageResponse {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens in the completion
    pub completion_tokens: u32,

    /// Total tokens used
    pub total_tokens: u32,
}

// =============================================================================
// Utilities
// =============================================================================

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Strip markdown code fences from a response.
///
/// Every ```` ``` ```` marker is removed wherever it appears, together with an
/// optional `json` language tag, so a fenced body and the bare body yield the
/// same text.
pub fn strip_code_blocks(response: &str) -> String {
    let mut out = String::with_capacity(response.len());
    let mut rest = response;

    while let Some(idx) = rest.find("```") {
        out.push_str(rest[..idx].trim_end());
        rest = &rest[idx + 3..];
        if let Some(after_tag) = rest.strip_prefix("json") {
            rest = after_tag;
        }
        rest = rest.trim_start();
    }
    out.push_str(rest);

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let sys = Message::system("You are helpful");
        assert_eq!(sys.role, "system");

        let user = Message::user("Hello");
        assert_eq!(user.role, "user");

        let assistant = Message::assistant("Hi there");
        assert_eq!(assistant.role, "assistant");
    }

    #[test]
    fn test_chat_request_builder() {
        let req = ChatRequest::new("gpt-4-turbo-preview")
            .message(Message::system("sys"))
            .message(Message::user("Hello"))
            .temperature(0.3)
            .max_tokens(500);

        assert_eq!(req.model, "gpt-4-turbo-preview");
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.temperature, Some(0.3));
        assert_eq!(req.max_tokens, Some(500));
        assert_eq!(req.prompt_len(), 8);
    }

    #[test]
    fn test_request_serializes_wire_names() {
        let req = ChatRequest::new("m")
            .message(Message::user("hi"))
            .temperature(0.3)
            .max_tokens(500);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "m");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "user");
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_unset_options_are_omitted() {
        let json = serde_json::to_value(ChatRequest::new("m")).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_truncate_to_char_boundary() {
        let text = "Hello 世界";
        let truncated = truncate_to_char_boundary(text, 8);
        assert!(truncated.len() <= 8);
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
    }

    #[test]
    fn test_strip_code_blocks_with_surrounding_text() {
        let fenced = "  ```json   {\"a\": 1}  ```  ";
        assert_eq!(strip_code_blocks(fenced), "{\"a\": 1}");
    }

    #[test]
    fn test_fenced_and_bare_parse_identically() {
        let bare = r#"{"structureAnalysis": {"paragraphs": 4}}"#;
        let fenced = format!("```json\n{}\n```", bare);

        let a: serde_json::Value = serde_json::from_str(&strip_code_blocks(bare)).unwrap();
        let b: serde_json::Value = serde_json::from_str(&strip_code_blocks(&fenced)).unwrap();
        assert_eq!(a, b);
    }
}
