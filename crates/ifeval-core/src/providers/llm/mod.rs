//! Chat transports used by the judge backend.
//!
//! Remote providers are async-native ([`ChatClient`]); in-process models are
//! blocking ([`LocalModel`]). The judge backend bridges both styles so callers
//! cannot tell them apart.

pub mod fake;
pub mod openai;

use crate::errors::JudgeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One complete chat round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Provider-specific request parameters merged into the request body.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChatRequest {
    /// Content of the last user message.
    pub fn prompt(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Assistant text.
    pub text: String,
    /// Full provider response, kept for reasoning extraction.
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, JudgeError>;

    fn provider_name(&self) -> &'static str;
}

/// In-process inference whose call blocks the calling thread.
pub trait LocalModel: Send + Sync {
    fn generate(&self, request: &ChatRequest) -> Result<ChatReply, JudgeError>;

    fn name(&self) -> &str {
        "local"
    }
}
