//! Step status enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The execution status of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step is currently running.
    Running,
    /// Step completed, possibly with placeholder text.
    Ok,
    /// Step failed with an orchestration fault.
    Fail,
    /// Step was not started because the run was cancelled.
    Cancel,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Ok => write!(f, "ok"),
            Self::Fail => write!(f, "fail"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}
