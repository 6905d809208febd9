//! Text-generation capability and its HTTP backends.
//!
//! [`TextGenerator`] is the seam the generator talks to: a system message
//! and a user message in, text out. [`LlmBackend`] implements it with enum
//! dispatch over the concrete wire formats, since the trait's async method
//! makes it unusable as a trait object.

use std::future::Future;

use tracing::debug;

use crate::config::{BackendType, LlmConfig};
use crate::error::GenerationError;
use crate::prompt::RenderedPrompt;

/// Anything that turns a rendered prompt into generated text.
pub trait TextGenerator {
    /// Generate a reply of at most `max_tokens` tokens.
    fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

impl<T: TextGenerator + Sync> TextGenerator for &T {
    fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send {
        (**self).complete(prompt, max_tokens)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// An HTTP LLM backend.
#[derive(Debug, Clone)]
pub enum LlmBackend {
    /// `OpenAI`-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Anthropic Messages API.
    Anthropic(AnthropicBackend),
}

impl TextGenerator for LlmBackend {
    async fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        match self {
            Self::OpenAi(backend) => backend.complete(prompt, max_tokens).await,
            Self::Anthropic(backend) => backend.complete(prompt, max_tokens).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::OpenAi(_) => OpenAiBackend::NAME,
            Self::Anthropic(_) => AnthropicBackend::NAME,
        }
    }
}

/// Connection details shared by both wire formats.
#[derive(Debug, Clone)]
struct Endpoint {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl Endpoint {
    fn new(config: &LlmConfig, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            model: config.model.clone(),
        }
    }

    /// Send `request` with a JSON `body` and decode the JSON of a 2xx response.
    async fn post(
        &self,
        backend: &'static str,
        request: reqwest::RequestBuilder,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, GenerationError> {
        let response = request
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Request {
                backend,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(GenerationError::Status {
                backend,
                status: status.as_u16(),
                body: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(format!("{backend} response parse failed: {e}")))
    }
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Backend for `OpenAI`-compatible chat completions APIs.
///
/// Works with `OpenAI`, `DeepSeek`, and Ollama endpoints.
/// Sends requests to `{api_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    endpoint: Endpoint,
}

impl OpenAiBackend {
    const NAME: &'static str = "openai-compatible";

    /// Create a new `OpenAI`-compatible backend.
    pub fn new(config: &LlmConfig, api_key: &str) -> Self {
        Self {
            endpoint: Endpoint::new(config, api_key),
        }
    }

    async fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.endpoint.api_url);
        let body = openai_request_body(&self.endpoint.model, prompt, max_tokens);

        debug!(url = url, model = self.endpoint.model, "sending chat completion");
        let request = self
            .endpoint
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.endpoint.api_key));
        let json = self.endpoint.post(Self::NAME, request, &body).await?;
        extract_openai_content(&json)
    }
}

fn openai_request_body(model: &str, prompt: &RenderedPrompt, max_tokens: u32) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [
            {"role": "system", "content": prompt.system},
            {"role": "user", "content": prompt.user}
        ],
        "temperature": 0.8,
        "max_tokens": max_tokens
    })
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, GenerationError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            GenerationError::Malformed("response missing choices[0].message.content".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Anthropic Messages API backend
// ---------------------------------------------------------------------------

/// Backend for the Anthropic Messages API.
///
/// Differs from `OpenAI` in three ways: the key goes in `x-api-key`, the
/// system prompt is a top-level field, and the reply is at `content[0].text`.
#[derive(Debug, Clone)]
pub struct AnthropicBackend {
    endpoint: Endpoint,
}

impl AnthropicBackend {
    const NAME: &'static str = "anthropic";

    /// Create a new Anthropic Messages API backend.
    pub fn new(config: &LlmConfig, api_key: &str) -> Self {
        Self {
            endpoint: Endpoint::new(config, api_key),
        }
    }

    async fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/messages", self.endpoint.api_url);
        let body = anthropic_request_body(&self.endpoint.model, prompt, max_tokens);

        debug!(url = url, model = self.endpoint.model, "sending messages request");
        let request = self
            .endpoint
            .client
            .post(&url)
            .header("x-api-key", &self.endpoint.api_key)
            .header("anthropic-version", "2023-06-01");
        let json = self.endpoint.post(Self::NAME, request, &body).await?;
        extract_anthropic_content(&json)
    }
}

fn anthropic_request_body(
    model: &str,
    prompt: &RenderedPrompt,
    max_tokens: u32,
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "max_tokens": max_tokens,
        "system": prompt.system,
        "messages": [
            {"role": "user", "content": prompt.user}
        ]
    })
}

/// Extract the text content from an Anthropic Messages API response.
fn extract_anthropic_content(json: &serde_json::Value) -> Result<String, GenerationError> {
    json.get("content")
        .and_then(|c| c.get(0))
        .and_then(|b| b.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| GenerationError::Malformed("response missing content[0].text".to_owned()))
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create a backend from configuration.
///
/// Returns `None` when no usable API key is configured; the generator
/// reports that as a missing credential instead of attempting a call.
pub fn create_backend(config: &LlmConfig) -> Option<LlmBackend> {
    let api_key = config.usable_api_key()?;
    Some(match config.backend {
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend::new(config, api_key)),
        BackendType::Anthropic => LlmBackend::Anthropic(AnthropicBackend::new(config, api_key)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> RenderedPrompt {
        RenderedPrompt {
            system: "You write mnemonics.".to_owned(),
            user: "Letters: L L G".to_owned(),
        }
    }

    #[test]
    fn extract_openai_content_valid() {
        let json = serde_json::json!({
            "choices": [{
                "message": {"content": "  Liberty Lights Glory\n"}
            }]
        });
        let result = extract_openai_content(&json);
        assert_eq!(result.ok().as_deref(), Some("  Liberty Lights Glory\n"));
    }

    #[test]
    fn extract_openai_content_missing_choices() {
        let json = serde_json::json!({"error": "rate_limit"});
        let result = extract_openai_content(&json);
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[test]
    fn extract_anthropic_content_valid() {
        let json = serde_json::json!({
            "content": [{"type": "text", "text": "Loyal Lads Gathered"}]
        });
        let result = extract_anthropic_content(&json);
        assert_eq!(result.ok().as_deref(), Some("Loyal Lads Gathered"));
    }

    #[test]
    fn extract_anthropic_content_missing() {
        let json = serde_json::json!({"content": []});
        assert!(extract_anthropic_content(&json).is_err());
    }

    #[test]
    fn request_bodies_carry_both_messages_and_token_cap() {
        let openai = openai_request_body("gpt-3.5-turbo", &prompt(), 150);
        assert_eq!(openai["max_tokens"], 150);
        assert_eq!(openai["messages"][0]["role"], "system");
        assert_eq!(openai["messages"][1]["content"], "Letters: L L G");

        let anthropic = anthropic_request_body("claude-haiku-4-5", &prompt(), 120);
        assert_eq!(anthropic["max_tokens"], 120);
        assert_eq!(anthropic["system"], "You write mnemonics.");
        assert_eq!(anthropic["messages"][0]["role"], "user");
    }

    #[test]
    fn create_backend_requires_a_key() {
        let config = LlmConfig::default();
        assert!(create_backend(&config).is_none());

        let blank = LlmConfig {
            api_key: Some(String::new()),
            ..LlmConfig::default()
        };
        assert!(create_backend(&blank).is_none());
    }

    #[test]
    fn create_backend_dispatches_correctly() {
        let openai = LlmConfig {
            api_key: Some("test".to_owned()),
            ..LlmConfig::default()
        };
        assert_eq!(
            create_backend(&openai).as_ref().map(TextGenerator::name),
            Some("openai-compatible")
        );

        let anthropic = LlmConfig {
            backend: BackendType::Anthropic,
            api_url: "https://api.anthropic.com/v1/".to_owned(),
            api_key: Some("test".to_owned()),
            ..LlmConfig::default()
        };
        let backend = create_backend(&anthropic);
        assert_eq!(backend.as_ref().map(TextGenerator::name), Some("anthropic"));
        if let Some(LlmBackend::Anthropic(b)) = backend {
            assert_eq!(b.endpoint.api_url, "https://api.anthropic.com/v1");
        }
    }
}
