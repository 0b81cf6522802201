//! The `create_blog` step.

use super::{prompts, Step, StepContext};
use crate::context::{PipelineState, StateField};
use crate::errors::{BlogflowError, Result};
use async_trait::async_trait;
use tracing::info;

/// Expands `state.outline` into a ten-line post for `state.title`.
#[derive(Debug, Clone, Default)]
pub struct CreateBlogStep;

impl CreateBlogStep {
    /// The step name.
    pub const NAME: &'static str = "create_blog";

    /// Creates the step.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Step for CreateBlogStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn produces(&self) -> StateField {
        StateField::Content
    }

    async fn execute(&self, ctx: &StepContext<'_>, state: &mut PipelineState) -> Result<()> {
        info!(run_id = %ctx.identity().pipeline_run_id, step = %ctx.step_name(), "Executing step");
        let outline = state.outline().ok_or_else(|| {
            BlogflowError::PipelineExecution(
                "create_blog ran before an outline was written".to_string(),
            )
        })?;
        let prompt = prompts::blog_prompt(state.title(), outline);
        let content = ctx.generate(&prompt).await?;
        state.set(StateField::Content, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunIdentity;
    use crate::llm::ModelHandle;
    use crate::pipeline::FailureMode;
    use crate::testing::ScriptedModel;

    #[tokio::test]
    async fn test_prompt_contains_outline() {
        let scripted = ScriptedModel::new(["the post"]);
        let model = ModelHandle::ready(scripted.clone());
        let identity = RunIdentity::new();
        let ctx = StepContext::new(&model, FailureMode::Placeholder, &identity, CreateBlogStep::NAME);
        let mut state = PipelineState::new("Rust");
        state.set(StateField::Outline, "1. Ownership\n2. Borrowing").unwrap();

        CreateBlogStep::new().execute(&ctx, &mut state).await.unwrap();

        assert_eq!(state.content(), Some("the post"));
        let prompts = scripted.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("1. Ownership\n2. Borrowing"));
    }

    #[tokio::test]
    async fn test_missing_outline_is_execution_error() {
        let scripted = ScriptedModel::new(["unused"]);
        let model = ModelHandle::ready(scripted.clone());
        let identity = RunIdentity::new();
        let ctx = StepContext::new(&model, FailureMode::Placeholder, &identity, CreateBlogStep::NAME);
        let mut state = PipelineState::new("Rust");

        let err = CreateBlogStep::new().execute(&ctx, &mut state).await.unwrap_err();
        assert!(matches!(err, BlogflowError::PipelineExecution(_)));
        assert_eq!(scripted.call_count(), 0);
    }
}
