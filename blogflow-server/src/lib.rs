//! # Blogflow server
//!
//! HTTP front end for the blogflow pipeline.
//!
//! - `POST /generate-blog-stream/` streams one run as ndjson
//! - `GET /` serves the landing page
//!
//! Every route allows any origin, method and header.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod config;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use blogflow::cancellation::CancellationToken;
use blogflow::context::PipelineState;
use blogflow::llm::ModelHandle;
use blogflow::pipeline::{FailureMode, Pipeline};
use blogflow::streaming::{ndjson_stream, NDJSON_CONTENT_TYPE};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use config::ServerArgs;

/// Path of the streaming endpoint.
pub const GENERATE_PATH: &str = "/generate-blog-stream/";

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Request body of the streaming endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRequest {
    /// The topic to write about.
    pub title: String,
}

/// Shared, read-only state of the service.
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Builds the blog pipeline over the process-wide model handle.
    #[must_use]
    pub fn new(model: ModelHandle, failure_mode: FailureMode) -> Self {
        Self::with_pipeline(Pipeline::blog(model).with_failure_mode(failure_mode))
    }

    /// Serves an already-assembled pipeline.
    #[must_use]
    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Returns the pipeline every request runs.
    #[must_use]
    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(GENERATE_PATH, post(generate_blog_stream))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn generate_blog_stream(
    State(state): State<AppState>,
    Json(request): Json<BlogRequest>,
) -> Response {
    info!(title = %request.title, "Received blog generation request");

    let cancel = Arc::new(CancellationToken::new());
    let lines = ndjson_stream(state.pipeline(), PipelineState::new(request.title), cancel);
    let body = Body::from_stream(lines.map(Ok::<_, Infallible>));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .unwrap_or_else(|e| {
            error!("Failed to build streaming response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}
