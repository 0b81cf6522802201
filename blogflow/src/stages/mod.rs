//! Step trait and the two blog-generation steps.
//!
//! Steps are the units of work of a pipeline. Each one reads the shared
//! [`PipelineState`], calls the model through its [`StepContext`], and
//! writes exactly one output field.

mod blog;
mod outline;
pub mod prompts;

pub use blog::CreateBlogStep;
pub use outline::CreateOutlineStep;

use crate::context::{PipelineState, RunIdentity, StateField};
use crate::errors::Result;
use crate::llm::ModelHandle;
use crate::pipeline::FailureMode;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};

/// Trait for pipeline steps.
#[async_trait]
pub trait Step: Send + Sync + Debug {
    /// Returns the name of the step.
    fn name(&self) -> &str;

    /// Returns the state field this step writes.
    fn produces(&self) -> StateField;

    /// Executes the step against the run's state.
    ///
    /// # Errors
    ///
    /// Returns an error for faults the failure policy does not absorb.
    async fn execute(&self, ctx: &StepContext<'_>, state: &mut PipelineState) -> Result<()>;
}

/// What a step may use while it runs.
#[derive(Debug)]
pub struct StepContext<'a> {
    model: &'a ModelHandle,
    failure_mode: FailureMode,
    identity: &'a RunIdentity,
    step_name: &'a str,
    degraded: AtomicBool,
}

impl<'a> StepContext<'a> {
    /// Creates a context for one step execution.
    #[must_use]
    pub fn new(
        model: &'a ModelHandle,
        failure_mode: FailureMode,
        identity: &'a RunIdentity,
        step_name: &'a str,
    ) -> Self {
        Self {
            model,
            failure_mode,
            identity,
            step_name,
            degraded: AtomicBool::new(false),
        }
    }

    /// Returns the run identity.
    #[must_use]
    pub fn identity(&self) -> &RunIdentity {
        self.identity
    }

    /// Returns the name of the step this context belongs to.
    #[must_use]
    pub fn step_name(&self) -> &str {
        self.step_name
    }

    /// Calls the model and applies the failure policy to the result.
    ///
    /// # Errors
    ///
    /// Returns the model error when the policy does not substitute a
    /// placeholder for it.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let result = self.model.generate(prompt).await;
        let substituted = result.is_err();
        let text = self.failure_mode.resolve(self.step_name, result)?;
        if substituted {
            self.degraded.store(true, Ordering::SeqCst);
        }
        Ok(text)
    }

    /// Returns true if any call in this step produced placeholder text.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedModel;

    #[tokio::test]
    async fn test_context_passes_model_text_through() {
        let model = ModelHandle::ready(ScriptedModel::new(["generated"]));
        let identity = RunIdentity::new();
        let ctx = StepContext::new(&model, FailureMode::Placeholder, &identity, "create_outline");

        assert_eq!(ctx.generate("prompt").await.unwrap(), "generated");
        assert!(!ctx.is_degraded());
        assert_eq!(ctx.step_name(), "create_outline");
    }

    #[tokio::test]
    async fn test_context_marks_placeholder_as_degraded() {
        let model = ModelHandle::uninitialized("no key");
        let identity = RunIdentity::new();
        let ctx = StepContext::new(&model, FailureMode::Placeholder, &identity, "create_outline");

        let text = ctx.generate("prompt").await.unwrap();
        assert_eq!(text, crate::pipeline::UNINITIALIZED_PLACEHOLDER);
        assert!(ctx.is_degraded());
    }

    #[tokio::test]
    async fn test_context_fail_fast_propagates() {
        let model = ModelHandle::uninitialized("no key");
        let identity = RunIdentity::new();
        let ctx = StepContext::new(&model, FailureMode::FailFast, &identity, "create_outline");

        assert!(ctx.generate("prompt").await.is_err());
        assert!(!ctx.is_degraded());
    }
}
