//! The state record shared by the steps of one run.

use crate::errors::StateConflictError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The output fields of [`PipelineState`] a step can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateField {
    /// The bullet-point outline written by `create_outline`.
    Outline,
    /// The full post written by `create_blog`.
    Content,
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline => write!(f, "outline"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// Mutable record threaded through the steps of a single run.
///
/// `title` is fixed at construction. `outline` and `content` are absent
/// until the step that produces them completes, and each can be written
/// only once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    outline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl PipelineState {
    /// Creates a fresh state for the given topic title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: None,
            content: None,
        }
    }

    /// Returns the topic title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the outline, if step 1 has completed.
    #[must_use]
    pub fn outline(&self) -> Option<&str> {
        self.outline.as_deref()
    }

    /// Returns the post content, if step 2 has completed.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the value of an output field.
    #[must_use]
    pub fn get(&self, field: StateField) -> Option<&str> {
        match field {
            StateField::Outline => self.outline(),
            StateField::Content => self.content(),
        }
    }

    /// Writes an output field.
    ///
    /// # Errors
    ///
    /// Returns [`StateConflictError`] if the field already holds a value.
    pub fn set(&mut self, field: StateField, value: impl Into<String>) -> Result<(), StateConflictError> {
        let slot = match field {
            StateField::Outline => &mut self.outline,
            StateField::Content => &mut self.content,
        };
        if slot.is_some() {
            return Err(StateConflictError::new(field.to_string()));
        }
        *slot = Some(value.into());
        Ok(())
    }

    /// Returns true once both output fields are populated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outline.is_some() && self.content.is_some()
    }
}
