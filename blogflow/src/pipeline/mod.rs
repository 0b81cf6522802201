//! Pipeline building and execution.
//!
//! This module provides:
//! - The sequential step engine and its streaming form
//! - A builder with validation
//! - The failure policy for model calls

mod builder;
mod engine;
mod failure_tolerance;
#[cfg(test)]
mod integration_tests;

pub use builder::PipelineBuilder;
pub use engine::Pipeline;
pub use failure_tolerance::{FailureMode, MODEL_CALL_FAILED_PLACEHOLDER, UNINITIALIZED_PLACEHOLDER};
