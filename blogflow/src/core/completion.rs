//! The completion signal yielded by the engine after each step.

use crate::context::StateField;
use serde::{Deserialize, Serialize};

/// Reports that one step finished and which state field it wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCompletion {
    /// The step name (e.g., "create_outline").
    pub step: String,
    /// The state field the step wrote.
    pub field: StateField,
    /// The text now stored in that field.
    pub text: String,
    /// Wall-clock duration of the step.
    pub duration_ms: f64,
    /// Whether the text is a placeholder substituted for a failed model call.
    pub degraded: bool,
}

impl StepCompletion {
    /// Creates a completion for a step that wrote `field`.
    #[must_use]
    pub fn new(step: impl Into<String>, field: StateField, text: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            field,
            text: text.into(),
            duration_ms: 0.0,
            degraded: false,
        }
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Marks the completion as carrying placeholder text.
    #[must_use]
    pub fn degraded(mut self, degraded: bool) -> Self {
        self.degraded = degraded;
        self
    }
}
