//! Mock models and steps for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::context::{PipelineState, StateField};
use crate::errors::{BlogflowError, Result};
use crate::llm::LanguageModel;
use crate::stages::{Step, StepContext};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    CallFailed(String),
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: VecDeque<Reply>,
    prompts: Vec<String>,
}

/// A model that answers from a fixed script and records every prompt.
///
/// Clones share the script and the recorded prompts. When the script runs
/// out, calls fail with `ModelCallFailed`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedModel {
    state: Arc<Mutex<ScriptState>>,
    delay: Option<Duration>,
}

impl ScriptedModel {
    /// Creates a model answering with `responses` in order.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies = responses.into_iter().map(|r| Reply::Text(r.into())).collect();
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                replies,
                prompts: Vec::new(),
            })),
            delay: None,
        }
    }

    /// Appends a call that fails with `ModelCallFailed`.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.state
            .lock()
            .replies
            .push_back(Reply::CallFailed(message.into()));
        self
    }

    /// Sleeps before answering each call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns the prompts received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().prompts.clone()
    }

    /// Returns the number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().prompts.len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let reply = {
            let mut state = self.state.lock();
            state.prompts.push(prompt.to_string());
            state.replies.pop_front()
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::CallFailed(message)) => Err(BlogflowError::ModelCallFailed(message)),
            None => Err(BlogflowError::ModelCallFailed("script exhausted".to_string())),
        }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// A model whose every call fails.
#[derive(Debug, Clone)]
pub struct FailingModel {
    unavailable: bool,
    message: String,
    calls: Arc<Mutex<usize>>,
}

impl FailingModel {
    /// Fails every call with `ModelCallFailed`.
    #[must_use]
    pub fn call_failed(message: impl Into<String>) -> Self {
        Self {
            unavailable: false,
            message: message.into(),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Fails every call with `ModelUnavailable`.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            unavailable: true,
            ..Self::call_failed(message)
        }
    }

    /// Returns the number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl LanguageModel for FailingModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        *self.calls.lock() += 1;
        if self.unavailable {
            Err(BlogflowError::ModelUnavailable(self.message.clone()))
        } else {
            Err(BlogflowError::ModelCallFailed(self.message.clone()))
        }
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// A step that panics when executed.
#[derive(Debug)]
pub struct PanickingStep {
    name: String,
    message: String,
}

impl PanickingStep {
    /// Creates a step that panics with `message`.
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Step for PanickingStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn produces(&self) -> StateField {
        StateField::Content
    }

    async fn execute(&self, _ctx: &StepContext<'_>, _state: &mut PipelineState) -> Result<()> {
        panic!("{}", self.message);
    }
}

/// A step that returns success without writing its field.
#[derive(Debug)]
pub struct SilentStep {
    name: String,
    field: StateField,
}

impl SilentStep {
    /// Creates a step that claims to produce `field` but never writes it.
    #[must_use]
    pub fn new(name: impl Into<String>, field: StateField) -> Self {
        Self {
            name: name.into(),
            field,
        }
    }
}

#[async_trait]
impl Step for SilentStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn produces(&self) -> StateField {
        self.field
    }

    async fn execute(&self, _ctx: &StepContext<'_>, _state: &mut PipelineState) -> Result<()> {
        Ok(())
    }
}
