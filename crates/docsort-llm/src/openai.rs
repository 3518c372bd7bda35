//! OpenAI-compatible Provider Implementation
//!
//! Talks to any endpoint that speaks the `/chat/completions` protocol
//! (OpenAI itself, or a local gateway exposing the same API).
//!
//! # Examples
//!
//! ```no_run
//! use docsort_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new(
//!     "https://api.openai.com/v1",
//!     "gpt-3.5-turbo",
//!     "sk-...",
//! ).unwrap();
//! ```

use crate::LlmError;
use docsort_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default HTTP timeout for a single request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat-completions provider with bearer authentication
#[derive(Clone)]
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    client: reqwest::Client,
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL, without the `/chat/completions` suffix
    /// - `model`: Model to use (e.g., "gpt-3.5-turbo")
    /// - `api_key`: Bearer token
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: DEFAULT_TEMPERATURE,
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
        })
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Replace the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Run one chat completion and return the first choice's content
    ///
    /// # Errors
    ///
    /// - `Unauthorized` on HTTP 401
    /// - `ModelNotAvailable` on HTTP 404
    /// - `RateLimitExceeded` on HTTP 429
    /// - `Communication` on transport failures and other non-success statuses
    /// - `InvalidResponse` when the body is not a completion with content
    pub async fn chat(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let request_body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => {
                return Err(LlmError::Unauthorized(
                    "API key rejected by provider".to_string(),
                ))
            }
            StatusCode::NOT_FOUND => return Err(LlmError::ModelNotAvailable(self.model.clone())),
            StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimitExceeded),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Communication(format!("HTTP {}: {}", s, body)));
            }
            _ => {}
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no content".to_string()))
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    async fn generate(&self, system: &str, prompt: &str) -> Result<String, Self::Error> {
        self.chat(system, prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new(DEFAULT_ENDPOINT, "gpt-4o-mini", "key").unwrap();
        assert_eq!(provider.model_name(), "gpt-4o-mini");
        assert_eq!(provider.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = OpenAiProvider::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, "sk-secret").unwrap();
        let rendered = format!("{:?}", provider);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_chat_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    { "role": "system", "content": "be terse" },
                    { "role": "user", "content": "classify me" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"category\":\"Bills\"}")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(server.uri(), DEFAULT_MODEL, "test-key").unwrap();
        let content = provider.generate("be terse", "classify me").await.unwrap();
        assert_eq!(content, "{\"category\":\"Bills\"}");
    }

    #[tokio::test]
    async fn test_trailing_slash_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .mount(&server)
            .await;

        let endpoint = format!("{}/", server.uri());
        let provider = OpenAiProvider::new(endpoint, DEFAULT_MODEL, "k").unwrap();
        assert_eq!(provider.chat("s", "p").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(server.uri(), DEFAULT_MODEL, "bad").unwrap();
        let result = provider.chat("s", "p").await;
        assert!(matches!(result, Err(LlmError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_model_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(server.uri(), "no-such-model", "k").unwrap();
        match provider.chat("s", "p").await {
            Err(LlmError::ModelNotAvailable(model)) => assert_eq!(model, "no-such-model"),
            other => panic!("Expected ModelNotAvailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_communication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(server.uri(), DEFAULT_MODEL, "k").unwrap();
        match provider.chat("s", "p").await {
            Err(LlmError::Communication(msg)) => assert!(msg.contains("upstream down")),
            other => panic!("Expected Communication, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(server.uri(), DEFAULT_MODEL, "k").unwrap();
        let result = provider.chat("s", "p").await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(server.uri(), DEFAULT_MODEL, "k").unwrap();
        let result = provider.chat("s", "p").await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Nothing listens on port 1
        let provider = OpenAiProvider::new("http://127.0.0.1:1", DEFAULT_MODEL, "k")
            .unwrap()
            .with_timeout(Duration::from_secs(2))
            .unwrap();
        let result = provider.chat("s", "p").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
