//! Drives a pipeline and renders its completions as ndjson lines.

use super::StreamEvent;
use crate::cancellation::CancellationToken;
use crate::context::PipelineState;
use crate::pipeline::Pipeline;
use async_stream::stream;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tracing::{error, warn};

/// Media type of the streamed response.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

const ENCODE_FAILURE_LINE: &str = "{\"type\":\"error\",\"data\":\"failed to encode event\"}\n";

/// Turns one pipeline run into a lazy stream of ndjson lines.
///
/// Yields one line per completed step, in order. If the run fails, one
/// `error` line is yielded and the stream ends. No step starts until the
/// consumer asks for the next line. Dropping the stream before it ends
/// cancels `cancel`.
pub fn ndjson_stream(
    pipeline: &Arc<Pipeline>,
    state: PipelineState,
    cancel: Arc<CancellationToken>,
) -> impl Stream<Item = String> + Send + 'static {
    let mut completions = pipeline.execute_streaming(state, Arc::clone(&cancel));

    stream! {
        let mut guard = DisconnectGuard::new(cancel);
        while let Some(item) = completions.next().await {
            let (event, last) = match item {
                Ok(completion) => (StreamEvent::from(completion), false),
                Err(e) => {
                    warn!(error = %e, kind = e.kind(), "Pipeline run ended early");
                    (StreamEvent::error(&e), true)
                }
            };
            match event.to_line() {
                Ok(line) => yield line,
                Err(e) => {
                    error!(error = %e, "Failed to encode stream event");
                    yield ENCODE_FAILURE_LINE.to_string();
                    break;
                }
            }
            if last {
                break;
            }
        }
        guard.finish();
    }
}

/// Cancels the run if the stream is dropped before it finished.
struct DisconnectGuard {
    cancel: Arc<CancellationToken>,
    finished: bool,
}

impl DisconnectGuard {
    fn new(cancel: Arc<CancellationToken>) -> Self {
        Self {
            cancel,
            finished: false,
        }
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        if !self.finished && self.cancel.cancel("client disconnected") {
            warn!("Client disconnected before the stream finished; abandoning remaining steps");
        }
    }
}
