//! Testing utilities for blogflow pipelines.
//!
//! This module provides:
//! - Scripted and failing language models
//! - Misbehaving steps for exercising orchestration faults

mod mocks;

pub use mocks::{FailingModel, PanickingStep, ScriptedModel, SilentStep};
