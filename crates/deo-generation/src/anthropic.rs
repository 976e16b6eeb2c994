//! Anthropic Messages API backend

use crate::backend::{CompletionRequest, CompletionResponse, ContentBlock, GenerationBackend};
use crate::error::BackendError;
use async_trait::async_trait;
use deo_model::TokenUsage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// API key; read from `ANTHROPIC_API_KEY` by default
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model to use
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            model: DEFAULT_MODEL.to_string(),
            base_url: ANTHROPIC_API_BASE.to_string(),
            timeout_secs: 180,
        }
    }
}

impl AnthropicConfig {
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }
}

/// Anthropic Messages API backend
///
/// Sends exactly one request per call: no retry loop.
#[derive(Debug)]
pub struct AnthropicBackend {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicBackend {
    /// Create a backend; fails when no API key is configured
    pub fn new(config: AnthropicConfig) -> Result<Self, BackendError> {
        if config.api_key.is_empty() {
            return Err(BackendError::Configuration(
                "Anthropic API key is required. Set ANTHROPIC_API_KEY environment variable."
                    .to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, BackendError> {
        Self::new(AnthropicConfig::default())
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    #[serde(default)]
    content: Vec<ResponseBlock>,
    usage: ResponseUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    input_tokens: u64,
    output_tokens: u64,
}

impl From<MessagesResponse> for CompletionResponse {
    fn from(response: MessagesResponse) -> Self {
        Self {
            model: response.model,
            blocks: response
                .content
                .into_iter()
                .map(|block| match block {
                    ResponseBlock::Text { text } => ContentBlock::Text(text),
                    ResponseBlock::Other => ContentBlock::Other("non_text".to_string()),
                })
                .collect(),
            usage: TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens),
        }
    }
}

#[async_trait]
impl GenerationBackend for AnthropicBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, BackendError> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![MessageParam {
                role: "user",
                content: &request.prompt,
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_chars = request.prompt.len(),
            "sending Anthropic messages request"
        );

        let response = self
            .client
            .post(format!("{}/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        Ok(parsed.into())
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}
