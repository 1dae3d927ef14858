// src/ai/backend.rs
use crate::ai::AiError;
use crate::config::{AiConfig, ModelSettings};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One single-message completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    /// Pipeline stage, used for logs and the `X-Title` header.
    pub stage: &'static str,
    pub model: &'a str,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(stage: &'static str, settings: &'a ModelSettings, prompt: String) -> Self {
        Self {
            stage,
            model: &settings.model,
            prompt,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            timeout: settings.timeout,
        }
    }
}

/// Anything that can turn a prompt into the model's reply text.
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, AiError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// OpenRouter-compatible `chat/completions` client.
pub struct OpenRouterClient {
    api_key: Option<String>,
    endpoint: String,
    referer: String,
    app_title: String,
    client: Client,
}

impl OpenRouterClient {
    pub fn new(cfg: &AiConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self {
            api_key: cfg.api_key.clone(),
            endpoint: cfg.endpoint.clone(),
            referer: cfg.referer.clone(),
            app_title: cfg.app_title.clone(),
            client,
        })
    }
}

impl CompletionBackend for OpenRouterClient {
    fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, AiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AiError::MissingApiKey);
        };

        let payload = ChatPayload {
            model: request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        log::debug!(
            "[{}] POST {} model={} prompt_chars={}",
            request.stage,
            self.endpoint,
            request.model,
            request.prompt.len()
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", format!("{} - {}", self.app_title, request.stage))
            .timeout(request.timeout)
            .json(&payload)
            .send()
            .map_err(|e| AiError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .map_err(|e| AiError::MalformedResponse(e.without_url().to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| AiError::MalformedResponse("choices[0].message.content missing".into()))
    }
}
