//! Client for OpenAI-compatible chat-completions endpoints.

use super::{LanguageModel, ModelConfig};
use crate::errors::{BlogflowError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// A [`LanguageModel`] backed by `POST {base_url}/chat/completions`.
///
/// Each prompt is sent as a single user message. No retries.
#[derive(Clone)]
pub struct OpenAiChatModel {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl OpenAiChatModel {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ModelUninitialized` when no credential is configured and
    /// `Config` when a value is out of range or the HTTP client cannot be
    /// built.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            BlogflowError::ModelUninitialized(format!(
                "{} is not set",
                super::config::ENV_API_KEY
            ))
        })?;
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BlogflowError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Returns the endpoint URL requests are sent to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for OpenAiChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatModel")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LanguageModel for OpenAiChatModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                BlogflowError::ModelUnavailable(format!("failed to reach {}: {}", self.url, e))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(BlogflowError::ModelCallFailed(format!(
                "service returned {status}: {text}"
            )));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| BlogflowError::ModelCallFailed(format!("invalid response body: {e}")))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Model call finished"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                BlogflowError::ModelCallFailed("response contained no message content".to_string())
            })
    }

    fn describe(&self) -> String {
        format!("{} via {}", self.model, self.url)
    }
}
