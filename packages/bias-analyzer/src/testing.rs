//! Test doubles.
//!
//! These let applications exercise the analyzer and the relay without
//! making real network calls.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use openai_client::{ChatRequest, ChatResponse, OpenAIError};
use tokio::sync::Notify;

use crate::analyzer::ChatBackend;

enum Scripted {
    Reply(String),
    Status(u16, String),
    Network(String),
}

/// A chat backend that answers from a script, in order, and records every
/// request it sees.
#[derive(Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ChatRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply with `content` as the first choice.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.push(Scripted::Reply(content.into()));
        self
    }

    /// Queue a non-2xx answer.
    pub fn with_status(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Scripted::Status(status, body.into()));
        self
    }

    /// Queue a failure that never reached the service.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Network(message.into()));
        self
    }

    /// Hold every reply until `gate` is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, item: Scripted) {
        self.script.lock().unwrap().push_back(item);
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn chat_completion(&self, request: ChatRequest) -> openai_client::Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(content)) => Ok(ChatResponse::text(content)),
            Some(Scripted::Status(status, message)) => Err(OpenAIError::Api { status, message }),
            Some(Scripted::Network(message)) => Err(OpenAIError::Network(message)),
            None => Err(OpenAIError::Network("no scripted reply left".into())),
        }
    }
}
