//! The process-wide model handle.

use super::{LanguageModel, ModelConfig, OpenAiChatModel};
use crate::errors::{BlogflowError, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared, read-only access to the language model.
///
/// Constructed once at startup and cloned into every run. When the client
/// could not be built the handle stays `Uninitialized` for the life of the
/// process and every call fails with `ModelUninitialized` without touching
/// the network.
#[derive(Clone)]
pub enum ModelHandle {
    /// A usable model.
    Ready(Arc<dyn LanguageModel>),
    /// Construction failed; `reason` says why.
    Uninitialized {
        /// Why the client could not be constructed.
        reason: Arc<str>,
    },
}

impl ModelHandle {
    /// Wraps a ready model.
    pub fn ready(model: impl LanguageModel + 'static) -> Self {
        Self::Ready(Arc::new(model))
    }

    /// Creates a permanently uninitialized handle.
    pub fn uninitialized(reason: impl Into<String>) -> Self {
        Self::Uninitialized {
            reason: Arc::from(reason.into()),
        }
    }

    /// Builds the network client from configuration.
    ///
    /// Construction failures are logged and produce an uninitialized handle
    /// instead of an error.
    #[must_use]
    pub fn from_config(config: &ModelConfig) -> Self {
        match OpenAiChatModel::new(config) {
            Ok(model) => {
                info!(model = %model.describe(), "Language model client initialized");
                Self::ready(model)
            }
            Err(e) => {
                warn!(error = %e, "Language model client unavailable; generation will return placeholders");
                Self::uninitialized(e.to_string())
            }
        }
    }

    /// Builds the handle from process environment variables.
    ///
    /// A variable that does not parse leaves the handle uninitialized, the
    /// same as any other construction failure.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the handle through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match ModelConfig::from_lookup(lookup) {
            Ok(config) => Self::from_config(&config),
            Err(e) => {
                warn!(error = %e, "Invalid model configuration; generation will return placeholders");
                Self::uninitialized(e.to_string())
            }
        }
    }

    /// Returns true if a model is available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Generates text for a prompt.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrompt` for an empty prompt, `ModelUninitialized` if
    /// the handle has no model, and otherwise whatever the model returns.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(BlogflowError::InvalidPrompt(
                "prompt cannot be empty or whitespace-only".to_string(),
            ));
        }
        match self {
            Self::Ready(model) => model.generate(prompt).await,
            Self::Uninitialized { reason } => {
                Err(BlogflowError::ModelUninitialized(reason.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(model) => f.debug_tuple("Ready").field(&model.describe()).finish(),
            Self::Uninitialized { reason } => f
                .debug_struct("Uninitialized")
                .field("reason", reason)
                .finish(),
        }
    }
}
