//! Streaming adapter: pipeline completions as newline-delimited JSON.
//!
//! Each completed step becomes one `{"type": ..., "data": ...}` line,
//! emitted as soon as the step finishes.

mod adapter;
mod event;

pub use adapter::{ndjson_stream, NDJSON_CONTENT_TYPE};
pub use event::StreamEvent;
