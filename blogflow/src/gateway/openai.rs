//! OpenAI-compatible chat completions gateway.

use super::{GatewayConfig, GenerationParams, ModelGateway};
use crate::errors::{BlogflowError, ModelCallError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Gateway posting to `{base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl OpenAiGateway {
    /// Creates a gateway from explicit configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, BlogflowError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| BlogflowError::Config("Invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| BlogflowError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Creates a gateway from `OPENAI_*` environment variables.
    pub fn from_env() -> Result<Self, BlogflowError> {
        Self::new(GatewayConfig::from_env()?)
    }

    /// Model identifier sent with every call.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Serialize)]
struct ChatApiRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatApiResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn generate(
        &self,
        system_instruction: &str,
        user_prompt: &str,
        params: GenerationParams,
    ) -> Result<String, ModelCallError> {
        let start = Instant::now();
        let body = ChatApiRequest {
            model: &self.config.model,
            messages: [
                ApiMessage { role: "system", content: system_instruction },
                ApiMessage { role: "user", content: user_prompt },
            ],
            max_tokens: params.max_output_tokens,
            temperature: params.temperature,
        };

        let response = self
            .client
            .post(self.config.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelCallError::network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ModelCallError::network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ChatApiResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ModelCallError::http(status.as_u16(), message));
        }

        let parsed: ChatApiResponse = serde_json::from_str(&text)
            .map_err(|e| ModelCallError::malformed(format!("Invalid JSON: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(ModelCallError::api(error.message.unwrap_or_default()));
        }

        let content = parsed
            .choices
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| ModelCallError::malformed("No choices in response"))?;

        debug!(
            model = %self.config.model,
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            chars = content.len(),
            "Model call completed"
        );
        Ok(content)
    }
}
