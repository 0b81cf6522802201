//! Configuration for the language-model client.

use crate::errors::{BlogflowError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the service credential.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the service base URL.
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "BLOGFLOW_MODEL";
/// Environment variable overriding the sampling temperature.
pub const ENV_TEMPERATURE: &str = "BLOGFLOW_TEMPERATURE";
/// Environment variable setting a per-call timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "BLOGFLOW_MODEL_TIMEOUT_SECS";

/// Configuration for an OpenAI-compatible chat-completions client.
#[derive(Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Bearer credential. `None` leaves the model handle uninitialized.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Service base URL, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Per-call timeout. `None` keeps the HTTP client's default.
    #[serde(default)]
    pub timeout_seconds: Option<f64>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_seconds: None,
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ModelConfig {
    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `Config` if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = get(ENV_API_KEY);
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(model) = get(ENV_MODEL) {
            config.model = model;
        }
        if let Some(raw) = get(ENV_TEMPERATURE) {
            config.temperature = parse_number(ENV_TEMPERATURE, &raw)?;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.timeout_seconds = Some(parse_number(ENV_TIMEOUT_SECS, &raw)?);
        }

        Ok(config)
    }

    /// Sets the credential.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: f64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Returns the per-call timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(Duration::from_secs_f64)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an out-of-range temperature, a non-positive
    /// timeout or an empty model name.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(BlogflowError::Config(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        if let Some(seconds) = self.timeout_seconds {
            if !seconds.is_finite() || seconds <= 0.0 {
                return Err(BlogflowError::Config(format!(
                    "timeout must be a positive number of seconds, got {seconds}"
                )));
            }
        }
        if self.model.trim().is_empty() {
            return Err(BlogflowError::Config("model name cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_number(key: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|e| BlogflowError::Config(format!("{key}={raw:?} is not a number: {e}")))
}
