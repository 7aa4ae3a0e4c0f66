//! LLM judge backend for semantic constraints.
//!
//! A [`JudgeBackend`] turns yes/no questions about a response into a parsed
//! boolean verdict plus the oracle's reasoning. It exposes a blocking
//! ([`JudgeBackend::ask`]) and an awaitable ([`JudgeBackend::async_ask`]) batch
//! surface over either transport style, and bounds the number of in-flight
//! requests with a counting gate.

mod judge_internal;

pub use judge_internal::prompt::{build_judge_prompt, OUTPUT_ONLY_FRAGMENT, SYSTEM_PROMPT};
pub use judge_internal::verdict::parse_verdict;

use crate::errors::{ConfigError, JudgeError};
use crate::providers::llm::openai::{OpenAiClient, DEFAULT_BASE_URL};
use crate::providers::llm::{ChatClient, ChatMessage, ChatRequest, LocalModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Request routing for the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Provider {
    /// Remote hosted chat-completions API (async-native).
    #[default]
    OpenAi,
    /// In-process inference (blocking-native).
    Local,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Local => "local",
        }
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "local" => Ok(Self::Local),
            _ => Err(ConfigError::UnknownProvider {
                provider: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Provider {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Provider> for String {
    fn from(value: Provider) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Judge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// Request routing.
    #[serde(default)]
    pub provider: Provider,

    /// Model identifier passed to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature; 0.0 keeps judging deterministic.
    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum number of in-flight judge requests.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-request timeout. A timed-out call is a backend failure.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Base URL of an OpenAI-compatible server.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Provider-specific request parameters.
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_max_concurrency() -> usize {
    8
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// Unset is `None`; set but unparseable is an error.
fn env_number<T: FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            ConfigError::invalid_argument(var, format!("expected a non-negative integer, got {raw:?}"))
        }),
        Err(_) => Ok(None),
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: default_model(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            max_concurrency: default_max_concurrency(),
            timeout_ms: None,
            base_url: None,
            api_key_env: default_api_key_env(),
            extra: serde_json::Map::new(),
        }
    }
}

impl JudgeConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `IFEVAL_JUDGE_PROVIDER` | `openai` or `local` |
    /// | `IFEVAL_JUDGE_MODEL` | Model identifier |
    /// | `IFEVAL_JUDGE_BASE_URL` | OpenAI-compatible base URL |
    /// | `IFEVAL_JUDGE_MAX_CONCURRENCY` | In-flight request bound |
    /// | `IFEVAL_JUDGE_TIMEOUT_MS` | Per-request timeout |
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match std::env::var("IFEVAL_JUDGE_PROVIDER") {
            Ok(raw) => raw.parse()?,
            Err(_) => Provider::default(),
        };
        let config = Self {
            provider,
            model: std::env::var("IFEVAL_JUDGE_MODEL").unwrap_or_else(|_| default_model()),
            base_url: std::env::var("IFEVAL_JUDGE_BASE_URL").ok(),
            max_concurrency: env_number("IFEVAL_JUDGE_MAX_CONCURRENCY")?
                .unwrap_or_else(default_max_concurrency),
            timeout_ms: env_number("IFEVAL_JUDGE_TIMEOUT_MS")?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::invalid_argument(
                "max_concurrency",
                "must be at least 1",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid_argument("model", "must not be empty"));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::invalid_argument(
                "timeout_ms",
                "must be positive when set",
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Raw answer to one prompt in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeReply {
    pub verdict_text: String,
    pub raw_detail: serde_json::Value,
}

/// Parsed answer to one semantic question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeVerdict {
    pub passed: bool,
    pub reasoning: Option<String>,
    pub reply: String,
}

#[derive(Clone)]
pub(crate) enum Transport {
    Remote(Arc<dyn ChatClient>),
    Local(Arc<dyn LocalModel>),
}

/// Provider-polymorphic judge client. Cloning shares the concurrency gate.
#[derive(Clone)]
pub struct JudgeBackend {
    config: JudgeConfig,
    transport: Transport,
    gate: Arc<Semaphore>,
}

impl fmt::Debug for JudgeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JudgeBackend")
            .field("config", &self.config)
            .field("available_permits", &self.gate.available_permits())
            .finish()
    }
}

impl JudgeBackend {
    /// Build the transport named by `config.provider`.
    ///
    /// The local provider has no built-in model; use [`Self::with_local_model`].
    pub fn from_config(config: JudgeConfig) -> Result<Self, ConfigError> {
        match config.provider {
            Provider::OpenAi => {
                let api_key = std::env::var(&config.api_key_env).map_err(|_| {
                    ConfigError::MissingCredential {
                        var: config.api_key_env.clone(),
                    }
                })?;
                let base_url = config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                let client = OpenAiClient::new(base_url, api_key);
                Self::with_client(config, Arc::new(client))
            }
            Provider::Local => Err(ConfigError::invalid_argument(
                "provider",
                "the local provider needs an in-process model; construct it with JudgeBackend::with_local_model",
            )),
        }
    }

    /// Async-native transport.
    pub fn with_client(config: JudgeConfig, client: Arc<dyn ChatClient>) -> Result<Self, ConfigError> {
        Self::build(config, Transport::Remote(client))
    }

    /// Blocking-native transport; async calls are offloaded to worker threads.
    pub fn with_local_model(
        config: JudgeConfig,
        model: Arc<dyn LocalModel>,
    ) -> Result<Self, ConfigError> {
        Self::build(config, Transport::Local(model))
    }

    fn build(config: JudgeConfig, transport: Transport) -> Result<Self, ConfigError> {
        config.validate()?;
        let gate = Arc::new(Semaphore::new(config.max_concurrency));
        Ok(Self {
            config,
            transport,
            gate,
        })
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    pub fn provider(&self) -> Provider {
        self.config.provider
    }

    /// Permits currently free in the concurrency gate.
    pub fn available_permits(&self) -> usize {
        self.gate.available_permits()
    }

    pub(crate) fn request_for(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            extra: self.config.extra.clone(),
        }
    }

    /// Answer every prompt, preserving input order.
    pub async fn async_ask(&self, prompts: &[String]) -> Result<Vec<JudgeReply>, JudgeError> {
        judge_internal::client::ask_all(self, prompts).await
    }

    /// Blocking form of [`Self::async_ask`].
    ///
    /// Must not be called from a current-thread async runtime.
    pub fn ask(&self, prompts: &[String]) -> Result<Vec<JudgeReply>, JudgeError> {
        match &self.transport {
            Transport::Local(model) => prompts
                .iter()
                .map(|prompt| judge_internal::client::ask_local_blocking(self, model, prompt))
                .collect(),
            Transport::Remote(_) => judge_internal::bridge::block_on(self.async_ask(prompts))?,
        }
    }

    /// Ask whether `response` satisfies `question`.
    pub async fn judge(&self, question: &str, response: &str) -> Result<JudgeVerdict, JudgeError> {
        let prompt = build_judge_prompt(question, response);
        let reply = judge_internal::client::ask_one(self, &prompt).await?;
        judge_internal::verdict::interpret(self.config.provider, reply)
    }

    /// Blocking form of [`Self::judge`].
    pub fn judge_blocking(&self, question: &str, response: &str) -> Result<JudgeVerdict, JudgeError> {
        let prompt = build_judge_prompt(question, response);
        let reply = self
            .ask(&[prompt])?
            .pop()
            .ok_or_else(|| JudgeError::provider(self.config.provider.as_str(), "empty batch reply"))?;
        judge_internal::verdict::interpret(self.config.provider, reply)
    }
}
