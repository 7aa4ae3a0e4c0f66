use super::{ChatClient, ChatReply, ChatRequest};
use crate::errors::JudgeError;
use crate::providers::network::check_outbound;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions client for OpenAI and OpenAI-compatible servers.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn body(request: &ChatRequest) -> serde_json::Value {
        let mut body = json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        if let Some(obj) = body.as_object_mut() {
            for (key, value) in &request.extra {
                obj.insert(key.clone(), value.clone());
            }
        }
        body
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, JudgeError> {
        let url = format!("{}/chat/completions", self.base_url);
        check_outbound(&url)?;
        debug!(url = %url, model = %request.model, "sending judge request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&Self::body(request))
            .send()
            .await
            .map_err(|e| JudgeError::provider(self.provider_name(), e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "judge provider returned an error status");
            return Err(JudgeError::provider(
                self.provider_name(),
                format!("chat API error (status {}): {}", status.as_u16(), error_text),
            ));
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| JudgeError::provider(self.provider_name(), format!("invalid JSON: {e}")))?;

        let text = raw
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                JudgeError::provider(self.provider_name(), "response missing choices[0].message.content")
            })?
            .to_string();

        Ok(ChatReply { text, raw })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::ChatMessage;
    use crate::providers::network::NetworkPolicyGuard;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        let mut extra = serde_json::Map::new();
        extra.insert("seed".into(), json!(7));
        ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::user("Is the sky blue?")],
            temperature: 0.0,
            max_tokens: 16,
            extra,
        }
    }

    #[tokio::test]
    #[serial(network_policy)]
    async fn parses_content_and_keeps_raw_body() {
        let server = MockServer::start().await;
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "True: it is"}}]
        });
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "gpt-4o-mini", "seed": 7, "temperature": 0.0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(format!("{}/", server.uri()), "sk-test");
        let reply = client.complete(&request()).await.unwrap();
        assert_eq!(reply.text, "True: it is");
        assert_eq!(reply.raw, body);
    }

    #[tokio::test]
    #[serial(network_policy)]
    async fn error_status_is_provider_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), "sk-test");
        let err = client.complete(&request()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("503"), "{msg}");
        assert!(msg.contains("overloaded"), "{msg}");
    }

    #[tokio::test]
    #[serial(network_policy)]
    async fn missing_content_is_provider_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), "sk-test");
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, JudgeError::Provider { .. }));
    }

    #[tokio::test]
    #[serial(network_policy)]
    async fn respects_network_deny_policy() {
        let _guard = NetworkPolicyGuard::deny("unit test");
        let client = OpenAiClient::new(DEFAULT_BASE_URL, "sk-test");
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, JudgeError::Config(_)));
        assert!(err.to_string().contains("api.openai.com"));
    }
}
