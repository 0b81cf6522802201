//! Language-model client.
//!
//! [`LanguageModel`] is the seam the steps call through. [`OpenAiChatModel`]
//! is the network implementation; [`ModelHandle`] is the process-wide,
//! read-only handle injected into every run, which stays usable (and fails
//! deterministically) when the client could not be constructed.

mod config;
mod handle;
mod openai;

pub use config::ModelConfig;
pub use handle::ModelHandle;
pub use openai::OpenAiChatModel;

use crate::errors::Result;
use async_trait::async_trait;

/// A text-completion capability: one prompt in, one generated text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates text for the prompt.
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` when the service cannot be reached and
    /// `ModelCallFailed` when it answers with an error or unusable body.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Returns a short description of the backing model, for logs.
    fn describe(&self) -> String {
        "language-model".to_string()
    }
}
