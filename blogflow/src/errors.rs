//! Error types for the blogflow pipeline.
//!
//! Model failures (`ModelUninitialized`, `ModelUnavailable`,
//! `ModelCallFailed`) are normally absorbed by the failure policy of the
//! pipeline and turned into placeholder text. Everything else is an
//! orchestration fault and ends the output stream with an `error` event.

use thiserror::Error;

/// The main error type for blogflow operations.
#[derive(Debug, Error)]
pub enum BlogflowError {
    /// The language-model client could not be constructed at startup.
    #[error("Model not initialized: {0}")]
    ModelUninitialized(String),

    /// The language-model service could not be reached.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The language-model service returned an error or an unusable response.
    #[error("Model call failed: {0}")]
    ModelCallFailed(String),

    /// A prompt was empty or whitespace-only.
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    /// A write-once state field was written twice.
    #[error("{0}")]
    StateConflict(#[from] StateConflictError),

    /// A pipeline definition was rejected by the builder.
    #[error("Invalid pipeline: {0}")]
    InvalidPipeline(String),

    /// Any other fault during orchestration.
    #[error("Pipeline execution error: {0}")]
    PipelineExecution(String),

    /// The run was cancelled before it finished.
    #[error("Pipeline cancelled: {0}")]
    Cancelled(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BlogflowError {
    /// Returns true for errors raised by the language-model client itself.
    #[must_use]
    pub fn is_model_failure(&self) -> bool {
        matches!(
            self,
            Self::ModelUninitialized(_) | Self::ModelUnavailable(_) | Self::ModelCallFailed(_)
        )
    }

    /// Returns a stable, snake_case name for the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUninitialized(_) => "model_uninitialized",
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::ModelCallFailed(_) => "model_call_failed",
            Self::InvalidPrompt(_) => "invalid_prompt",
            Self::StateConflict(_) => "state_conflict",
            Self::InvalidPipeline(_) => "invalid_pipeline",
            Self::PipelineExecution(_) => "pipeline_execution",
            Self::Cancelled(_) => "cancelled",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}

/// Error raised when writing to a state field that already holds a value.
#[derive(Debug, Clone, Error)]
#[error("State conflict: field '{field}' is already set")]
pub struct StateConflictError {
    /// The conflicting field.
    pub field: String,
}

impl StateConflictError {
    /// Creates a new state conflict error.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BlogflowError>;
