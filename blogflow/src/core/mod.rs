//! Core domain model types for blogflow.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Step status enum
//! - Step lifecycle events
//! - The completion signal the engine yields after each step

mod completion;
mod event;
mod status;

pub use completion::StepCompletion;
pub use event::StepEvent;
pub use status::StepStatus;
