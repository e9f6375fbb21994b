//! Completion Bridge: topic keyword -> canned prompt -> chat-completion provider.
//!
//! The provider speaks the OpenAI-compatible `/chat/completions` shape. Any transport,
//! status or payload problem comes back as a [`CompletionError`]; callers degrade the
//! reply and carry on.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const PERSONA: &str = "You are ElderCore, AI advisor for DRP. Be helpful and encouraging.";

/// Topic used when the requested one is unknown or absent.
pub const DEFAULT_TOPIC: &str = "drp";

const TOPIC_PROMPTS: &[(&str, &str)] = &[
    (
        "drp",
        "Explain DRP in 150 words focusing on AI verification, proof of activity, human rights, and SDGs.",
    ),
    ("blockchain", "Explain blockchain for beginners in 100 words."),
    ("ai", "Explain AI ethics in 100 words."),
    ("rights", "Why are human rights important? 100 words."),
];

/// Prompt for `topic`; unknown topics get the default topic's prompt.
pub fn prompt_for(topic: &str) -> &'static str {
    TOPIC_PROMPTS
        .iter()
        .find(|(key, _)| *key == topic)
        .or_else(|| TOPIC_PROMPTS.iter().find(|(key, _)| *key == DEFAULT_TOPIC))
        .map(|(_, prompt)| *prompt)
        .unwrap_or(TOPIC_PROMPTS[0].1)
}

pub fn is_known_topic(topic: &str) -> bool {
    TOPIC_PROMPTS.iter().any(|(key, _)| *key == topic)
}

/// One completion call: persona, prompt and sampling bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// reqwest client for an OpenAI-compatible completion endpoint.
pub struct OpenAiClient {
    api_key: String,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key: api_key.trim().to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            client,
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status(status.as_u16(), text));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| CompletionError::Malformed(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(CompletionError::Empty)
    }
}

/// Turns topics into provider calls with the fixed persona and bounds.
pub struct CompletionBridge {
    provider: Box<dyn CompletionProvider>,
    max_tokens: u32,
    temperature: f32,
}

impl CompletionBridge {
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn request_for(&self, topic: &str) -> CompletionRequest {
        CompletionRequest {
            system: PERSONA.to_string(),
            prompt: prompt_for(topic).to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub async fn explain(&self, topic: &str) -> Result<String, CompletionError> {
        if !is_known_topic(topic) {
            tracing::debug!(topic, "unknown topic, using default prompt");
        }
        self.provider.complete(&self.request_for(topic)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            system: PERSONA.to_string(),
            prompt: prompt_for("ai").to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[test]
    fn unknown_topic_falls_back_to_default() {
        assert_eq!(prompt_for("cooking"), prompt_for(DEFAULT_TOPIC));
        assert_eq!(prompt_for(""), prompt_for(DEFAULT_TOPIC));
        assert_ne!(prompt_for("blockchain"), prompt_for(DEFAULT_TOPIC));
        assert!(prompt_for("drp").contains("150 words"));
        assert!(!is_known_topic("BLOCKCHAIN"));
    }

    #[tokio::test]
    async fn client_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": DEFAULT_MODEL,
                "max_tokens": 500,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "AI ethics is..." } },
                    { "message": { "role": "assistant", "content": "ignored" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test").with_api_base(&server.uri());
        let text = client.complete(&sample_request()).await.expect("completion");
        assert_eq!(text, "AI ethics is...");
    }

    #[tokio::test]
    async fn non_success_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test").with_api_base(&server.uri());
        match client.complete(&sample_request()).await {
            Err(CompletionError::Status(429, body)) => assert_eq!(body, "slow down"),
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_and_empty_payloads_are_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bad/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/empty/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
            .mount(&server)
            .await;

        let bad = OpenAiClient::new("k").with_api_base(&format!("{}/bad/", server.uri()));
        assert!(matches!(
            bad.complete(&sample_request()).await,
            Err(CompletionError::Malformed(_))
        ));

        let empty = OpenAiClient::new("k").with_api_base(&format!("{}/empty", server.uri()));
        assert!(matches!(
            empty.complete(&sample_request()).await,
            Err(CompletionError::Empty)
        ));
    }

    #[tokio::test]
    async fn unreachable_provider_is_failure() {
        let client = OpenAiClient::new("k").with_api_base("http://127.0.0.1:9");
        assert!(matches!(
            client.complete(&sample_request()).await,
            Err(CompletionError::Transport(_))
        ));
    }
}
