//! The client-facing stream event and its ndjson encoding.

use crate::context::StateField;
use crate::core::StepCompletion;
use crate::errors::{BlogflowError, Result};
use serde::{Deserialize, Serialize};

/// One line of the ndjson response.
///
/// Serializes as `{"type": "outline" | "content" | "error", "data": <text>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum StreamEvent {
    /// The outline produced by `create_outline`.
    Outline(String),
    /// The post produced by `create_blog`.
    Content(String),
    /// A fault that ended the run early.
    Error(String),
}

impl StreamEvent {
    /// Creates an error event from any displayable error.
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::Error(err.to_string())
    }

    /// Returns the event's `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Outline(_) => "outline",
            Self::Content(_) => "content",
            Self::Error(_) => "error",
        }
    }

    /// Returns the event's payload.
    #[must_use]
    pub fn data(&self) -> &str {
        match self {
            Self::Outline(text) | Self::Content(text) | Self::Error(text) => text,
        }
    }

    /// Returns true for the error event.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Encodes the event as one JSON object followed by `\n`.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    /// Decodes one ndjson line. A trailing newline is allowed.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the line is not a valid event.
    pub fn from_line(line: &str) -> Result<Self> {
        serde_json::from_str(line.trim_end_matches(['\r', '\n'])).map_err(BlogflowError::from)
    }
}

impl From<StepCompletion> for StreamEvent {
    fn from(completion: StepCompletion) -> Self {
        match completion.field {
            StateField::Outline => Self::Outline(completion.text),
            StateField::Content => Self::Content(completion.text),
        }
    }
}
