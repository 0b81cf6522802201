//! Run identity for correlating the log lines of one pipeline run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentity {
    /// The unique ID for this pipeline run.
    pub pipeline_run_id: Uuid,
}

impl RunIdentity {
    /// Creates a new run identity with a generated run ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pipeline_run_id: Uuid::new_v4(),
        }
    }

    /// Returns the run ID as a string.
    #[must_use]
    pub fn run_id(&self) -> String {
        self.pipeline_run_id.to_string()
    }
}

impl Default for RunIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_v4() {
        let identity = RunIdentity::new();
        assert_eq!(identity.pipeline_run_id.get_version_num(), 4);
    }

    #[test]
    fn test_identities_are_unique() {
        assert_ne!(RunIdentity::new(), RunIdentity::new());
    }
}
