//! Pipeline builder with validation.

use super::{FailureMode, Pipeline};
use crate::errors::{BlogflowError, Result};
use crate::events::{EventSink, LoggingEventSink};
use crate::llm::ModelHandle;
use crate::stages::Step;
use std::collections::HashSet;
use std::sync::Arc;

/// Builder for creating validated pipelines.
#[derive(Debug)]
pub struct PipelineBuilder {
    name: String,
    steps: Vec<Arc<dyn Step>>,
    model: Option<ModelHandle>,
    failure_mode: FailureMode,
    sink: Option<Arc<dyn EventSink>>,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            model: None,
            failure_mode: FailureMode::default(),
            sink: None,
        }
    }

    /// Appends a step. Steps run in the order they are added.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPipeline` if a step with the same name exists.
    pub fn step(mut self, step: Arc<dyn Step>) -> Result<Self> {
        if self.steps.iter().any(|s| s.name() == step.name()) {
            return Err(BlogflowError::InvalidPipeline(format!(
                "duplicate step name '{}'",
                step.name()
            )));
        }
        self.steps.push(step);
        Ok(self)
    }

    /// Sets the model handle passed to every step.
    #[must_use]
    pub fn with_model(mut self, model: ModelHandle) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Sets the sink receiving lifecycle events.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPipeline` for an empty or whitespace name, no steps,
    /// two steps writing the same field, or a missing model handle.
    pub fn build(self) -> Result<Pipeline> {
        if self.name.trim().is_empty() {
            return Err(BlogflowError::InvalidPipeline(
                "pipeline name cannot be empty or whitespace-only".to_string(),
            ));
        }
        if self.steps.is_empty() {
            return Err(BlogflowError::InvalidPipeline(format!(
                "pipeline '{}' has no steps",
                self.name
            )));
        }
        let mut written = HashSet::new();
        for step in &self.steps {
            if !written.insert(step.produces()) {
                return Err(BlogflowError::InvalidPipeline(format!(
                    "more than one step writes '{}'",
                    step.produces()
                )));
            }
        }
        let model = self.model.ok_or_else(|| {
            BlogflowError::InvalidPipeline(format!("pipeline '{}' has no model handle", self.name))
        })?;
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(LoggingEventSink));

        Ok(Pipeline::from_parts(
            self.name,
            self.steps,
            model,
            self.failure_mode,
            sink,
        ))
    }
}
