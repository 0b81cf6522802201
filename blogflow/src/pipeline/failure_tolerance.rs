//! The policy applied when a model call inside a step fails.
//!
//! This is the one place that decides whether a model failure becomes
//! placeholder text (and the run continues) or ends the run.

use crate::errors::{BlogflowError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Placeholder written when the model client was never constructed.
pub const UNINITIALIZED_PLACEHOLDER: &str = "Error: Model not initialized. Please check API key.";

/// Placeholder written when a model call fails at runtime.
pub const MODEL_CALL_FAILED_PLACEHOLDER: &str = "Error: Model call failed. Please try again later.";

/// How to handle model failures inside steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Substitute placeholder text and continue (default).
    #[default]
    Placeholder,
    /// Propagate the failure and end the run.
    FailFast,
}

impl FailureMode {
    /// Applies the policy to a model result.
    ///
    /// Only model failures are eligible for substitution; every other error
    /// is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the original error when it is not absorbed.
    pub fn resolve(self, step: &str, result: Result<String>) -> Result<String> {
        match result {
            Ok(text) => Ok(text),
            Err(err) if self == Self::Placeholder && err.is_model_failure() => {
                warn!(step = %step, error = %err, kind = err.kind(), "Model call failed; substituting placeholder");
                Ok(placeholder_for(&err).to_string())
            }
            Err(err) => Err(err),
        }
    }
}

impl FromStr for FailureMode {
    type Err = BlogflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "fail_fast" => Ok(Self::FailFast),
            other => Err(BlogflowError::Config(format!(
                "unknown failure mode '{other}', expected 'placeholder' or 'fail_fast'"
            ))),
        }
    }
}

fn placeholder_for(err: &BlogflowError) -> &'static str {
    match err {
        BlogflowError::ModelUninitialized(_) => UNINITIALIZED_PLACEHOLDER,
        _ => MODEL_CALL_FAILED_PLACEHOLDER,
    }
}
