//! # Blogflow
//!
//! A two-step blog generation pipeline over a language model.
//!
//! Blogflow turns a title into a blog post with two sequential model calls:
//!
//! - **`create_outline`**: asks for a 5-point outline of the title
//! - **`create_blog`**: asks for a 10-line post that follows the outline
//!
//! Each step's output is streamed as soon as it is ready, one
//! newline-delimited JSON object per line. Model failures become
//! placeholder text so the run always reaches the end; orchestration
//! faults end the stream with a single `error` line.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blogflow::prelude::*;
//!
//! let model = ModelHandle::from_env();
//! let pipeline = Arc::new(Pipeline::blog(model));
//! let cancel = Arc::new(CancellationToken::new());
//!
//! let mut lines = Box::pin(ndjson_stream(&pipeline, PipelineState::new("Rust"), cancel));
//! while let Some(line) = lines.next().await {
//!     print!("{line}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cancellation;
pub mod context;
pub mod core;
pub mod errors;
pub mod events;
pub mod llm;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod streaming;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cancellation::CancellationToken;
    pub use crate::context::{PipelineState, RunIdentity, StateField};
    pub use crate::core::{StepCompletion, StepEvent, StepStatus};
    pub use crate::errors::{BlogflowError, Result, StateConflictError};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::llm::{LanguageModel, ModelConfig, ModelHandle, OpenAiChatModel};
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::pipeline::{FailureMode, Pipeline, PipelineBuilder};
    pub use crate::stages::{CreateBlogStep, CreateOutlineStep, Step, StepContext};
    pub use crate::streaming::{ndjson_stream, StreamEvent, NDJSON_CONTENT_TYPE};
}
