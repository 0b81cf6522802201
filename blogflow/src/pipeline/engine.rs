//! Sequential step engine.
//!
//! Runs a fixed, ordered list of steps over one [`PipelineState`]. Steps
//! never overlap: step N+1 starts only after step N's write is visible. The
//! engine reports each completed step as soon as it finishes.

use super::{FailureMode, PipelineBuilder};
use crate::cancellation::CancellationToken;
use crate::context::{PipelineState, RunIdentity};
use crate::core::{StepCompletion, StepEvent, StepStatus};
use crate::errors::{BlogflowError, Result};
use crate::events::{EventSink, LoggingEventSink};
use crate::llm::ModelHandle;
use crate::observability::SpanTimer;
use crate::stages::{CreateBlogStep, CreateOutlineStep, Step, StepContext};
use async_stream::try_stream;
use futures::stream::BoxStream;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, Instrument};

/// An ordered chain of steps bound to a model handle.
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    steps: Vec<Arc<dyn Step>>,
    model: ModelHandle,
    failure_mode: FailureMode,
    sink: Arc<dyn EventSink>,
}

impl Pipeline {
    /// The name of the standard blog pipeline.
    pub const BLOG: &'static str = "blog";

    /// Creates a new pipeline builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    /// The standard chain: `create_outline` then `create_blog`.
    #[must_use]
    pub fn blog(model: ModelHandle) -> Self {
        Self::from_parts(
            Self::BLOG.to_string(),
            vec![
                Arc::new(CreateOutlineStep::new()),
                Arc::new(CreateBlogStep::new()),
            ],
            model,
            FailureMode::default(),
            Arc::new(LoggingEventSink),
        )
    }

    pub(super) fn from_parts(
        name: String,
        steps: Vec<Arc<dyn Step>>,
        model: ModelHandle,
        failure_mode: FailureMode,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            name,
            steps,
            model,
            failure_mode,
            sink,
        }
    }

    /// Replaces the failure policy.
    #[must_use]
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Replaces the lifecycle event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the step names in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Returns the failure policy.
    #[must_use]
    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Returns the model handle.
    #[must_use]
    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Runs every step and returns the final state.
    ///
    /// # Errors
    ///
    /// Returns the first error a step does not absorb.
    pub async fn run(&self, state: PipelineState) -> Result<PipelineState> {
        let identity = RunIdentity::new();
        let cancel = CancellationToken::new();
        let timer = self.run_started(&identity, &state).await;
        let mut state = state;
        for step in &self.steps {
            self.run_step(step.as_ref(), &identity, &mut state, &cancel)
                .await?;
        }
        self.run_finished(&identity, &timer).await;
        Ok(state)
    }

    /// Runs the steps lazily, yielding one completion per finished step.
    ///
    /// Nothing runs until the stream is polled. The first error is yielded
    /// and ends the stream. Cancelling `cancel` stops the run before the
    /// next step, or aborts the step in flight.
    pub fn execute_streaming(
        self: &Arc<Self>,
        state: PipelineState,
        cancel: Arc<CancellationToken>,
    ) -> BoxStream<'static, Result<StepCompletion>> {
        let pipeline = Arc::clone(self);
        let identity = RunIdentity::new();

        Box::pin(try_stream! {
            let timer = pipeline.run_started(&identity, &state).await;
            let mut state = state;
            for step in &pipeline.steps {
                let completion = pipeline
                    .run_step(step.as_ref(), &identity, &mut state, &cancel)
                    .await?;
                yield completion;
            }
            pipeline.run_finished(&identity, &timer).await;
        })
    }

    async fn run_started(&self, identity: &RunIdentity, state: &PipelineState) -> SpanTimer {
        let run_id = identity.run_id();
        info!(
            run_id = %run_id,
            pipeline = %self.name,
            title = %state.title(),
            "Pipeline run started"
        );
        self.sink
            .emit(&StepEvent::pipeline_started(&run_id, &self.name))
            .await;
        SpanTimer::start()
    }

    async fn run_finished(&self, identity: &RunIdentity, timer: &SpanTimer) {
        let run_id = identity.run_id();
        let duration_ms = timer.elapsed_ms();
        info!(run_id = %run_id, pipeline = %self.name, duration_ms, "Pipeline run finished");
        self.sink
            .emit(&StepEvent::pipeline_completed(&run_id, &self.name, duration_ms))
            .await;
    }

    async fn run_step(
        &self,
        step: &dyn Step,
        identity: &RunIdentity,
        state: &mut PipelineState,
        cancel: &CancellationToken,
    ) -> Result<StepCompletion> {
        let run_id = identity.run_id();
        let name = step.name();

        if cancel.is_cancelled() {
            return Err(self.cancelled(&run_id, name, cancel).await);
        }

        self.sink.emit(&StepEvent::started(&run_id, name)).await;
        let span = tracing::info_span!("step", run_id = %run_id, step = %name);
        let timer = SpanTimer::start();
        let ctx = StepContext::new(&self.model, self.failure_mode, identity, name);

        let execution = AssertUnwindSafe(step.execute(&ctx, state)).catch_unwind();
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            outcome = execution.instrument(span) => Some(outcome),
        };
        let duration_ms = timer.elapsed_ms();

        let result = match outcome {
            None => return Err(self.cancelled(&run_id, name, cancel).await),
            Some(Ok(result)) => result,
            Some(Err(panic)) => Err(BlogflowError::PipelineExecution(format!(
                "step '{name}' panicked: {}",
                panic_message(panic.as_ref())
            ))),
        };

        let result = result.and_then(|()| {
            let field = step.produces();
            state
                .get(field)
                .map(|text| {
                    StepCompletion::new(name, field, text)
                        .with_duration_ms(duration_ms)
                        .degraded(ctx.is_degraded())
                })
                .ok_or_else(|| {
                    BlogflowError::PipelineExecution(format!(
                        "step '{name}' finished without writing '{field}'"
                    ))
                })
        });

        match &result {
            Ok(completion) => {
                info!(
                    run_id = %run_id,
                    step = %name,
                    duration_ms,
                    degraded = completion.degraded,
                    status = %StepStatus::Ok,
                    "Step completed"
                );
                self.sink
                    .emit(&StepEvent::completed(&run_id, name, duration_ms, completion.degraded))
                    .await;
            }
            Err(e) => {
                error!(run_id = %run_id, step = %name, error = %e, status = %StepStatus::Fail, "Step failed");
                self.sink
                    .emit(&StepEvent::failed(&run_id, name, &e.to_string()))
                    .await;
            }
        }
        result
    }

    async fn cancelled(&self, run_id: &str, step: &str, cancel: &CancellationToken) -> BlogflowError {
        let reason = cancel.reason().unwrap_or_else(|| "cancelled".to_string());
        info!(
            run_id = %run_id,
            step = %step,
            reason = %reason,
            status = %StepStatus::Cancel,
            "Run cancelled; skipping remaining steps"
        );
        self.sink
            .emit(&StepEvent::cancelled(run_id, step, &reason))
            .await;
        BlogflowError::Cancelled(reason)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
