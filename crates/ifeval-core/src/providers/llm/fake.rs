//! Scripted transports for tests and offline dry runs.

use super::{ChatClient, ChatReply, ChatRequest, LocalModel};
use crate::errors::JudgeError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

type Responder = dyn Fn(&ChatRequest) -> Result<ChatReply, JudgeError> + Send + Sync;

/// Async client answering from a closure, with optional artificial latency.
#[derive(Clone)]
pub struct ScriptedClient {
    responder: Arc<Responder>,
    latency: Duration,
}

impl ScriptedClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ChatRequest) -> Result<ChatReply, JudgeError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            latency: Duration::ZERO,
        }
    }

    /// Always answer `text`, with an empty raw body.
    pub fn fixed(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| {
            Ok(ChatReply {
                text: text.clone(),
                raw: serde_json::json!({}),
            })
        })
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, JudgeError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.responder)(request)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// Blocking counterpart of [`ScriptedClient`].
#[derive(Clone)]
pub struct ScriptedModel {
    responder: Arc<Responder>,
    latency: Duration,
}

impl ScriptedModel {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ChatRequest) -> Result<ChatReply, JudgeError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl LocalModel for ScriptedModel {
    fn generate(&self, request: &ChatRequest) -> Result<ChatReply, JudgeError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        (self.responder)(request)
    }

    fn name(&self) -> &str {
        "scripted-local"
    }
}
