//! The `create_outline` step.

use super::{prompts, Step, StepContext};
use crate::context::{PipelineState, StateField};
use crate::errors::Result;
use async_trait::async_trait;
use tracing::info;

/// Generates a five-point outline for `state.title`.
#[derive(Debug, Clone, Default)]
pub struct CreateOutlineStep;

impl CreateOutlineStep {
    /// The step name.
    pub const NAME: &'static str = "create_outline";

    /// Creates the step.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Step for CreateOutlineStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn produces(&self) -> StateField {
        StateField::Outline
    }

    async fn execute(&self, ctx: &StepContext<'_>, state: &mut PipelineState) -> Result<()> {
        info!(run_id = %ctx.identity().pipeline_run_id, step = %ctx.step_name(), "Executing step");
        let prompt = prompts::outline_prompt(state.title());
        let outline = ctx.generate(&prompt).await?;
        state.set(StateField::Outline, outline)?;
        Ok(())
    }
}
