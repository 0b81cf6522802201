//! End-to-end tests of the blog pipeline over scripted models.

use super::*;
use crate::cancellation::CancellationToken;
use crate::context::{PipelineState, StateField};
use crate::core::{StepCompletion, StepStatus};
use crate::errors::{BlogflowError, Result};
use crate::events::CollectingEventSink;
use crate::llm::{MockLanguageModel, ModelHandle};
use crate::stages::{CreateBlogStep, CreateOutlineStep};
use crate::testing::{FailingModel, ScriptedModel, SilentStep};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::sync::Arc;

async fn completions(pipeline: Pipeline, title: &str) -> Vec<Result<StepCompletion>> {
    let pipeline = Arc::new(pipeline);
    pipeline
        .execute_streaming(PipelineState::new(title), Arc::new(CancellationToken::new()))
        .collect()
        .await
}

#[tokio::test]
async fn test_outline_then_content() {
    let model = ScriptedModel::new(["1. One\n2. Two", "Line one.\nLine two."]);
    let results = completions(Pipeline::blog(ModelHandle::ready(model)), "Rust").await;

    assert_eq!(results.len(), 2);
    let outline = results[0].as_ref().unwrap();
    let content = results[1].as_ref().unwrap();
    assert_eq!(outline.step, "create_outline");
    assert_eq!(outline.field, StateField::Outline);
    assert_eq!(outline.text, "1. One\n2. Two");
    assert_eq!(content.step, "create_blog");
    assert_eq!(content.field, StateField::Content);
    assert_eq!(content.text, "Line one.\nLine two.");
}

#[tokio::test]
async fn test_outline_is_embedded_verbatim_in_second_prompt() {
    let outline = "- Ownership\n- Borrowing\n- Lifetimes\n- Traits\n- Async";
    let model = ScriptedModel::new([outline, "post"]);
    let pipeline = Pipeline::blog(ModelHandle::ready(model.clone()));

    let state = pipeline.run(PipelineState::new("Learning Rust")).await.unwrap();

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Learning Rust"));
    assert!(prompts[1].contains("Learning Rust"));
    assert!(prompts[1].contains(outline));
    assert!(state.is_complete());
}

#[tokio::test]
async fn test_failed_outline_call_still_runs_blog_step() {
    let model = ScriptedModel::default()
        .with_failure("upstream 503")
        .with_failure("upstream 503");
    let pipeline = Pipeline::blog(ModelHandle::ready(model.clone()));

    let state = pipeline.run(PipelineState::new("Rust")).await.unwrap();

    assert_eq!(model.call_count(), 2);
    assert_eq!(state.outline(), Some(MODEL_CALL_FAILED_PLACEHOLDER));
    assert_eq!(state.content(), Some(MODEL_CALL_FAILED_PLACEHOLDER));
    assert!(model.prompts()[1].contains(MODEL_CALL_FAILED_PLACEHOLDER));
}

#[tokio::test]
async fn test_uninitialized_model_yields_placeholders_without_calls() {
    let results = completions(Pipeline::blog(ModelHandle::uninitialized("no key")), "Rust").await;

    let texts: Vec<_> = results
        .into_iter()
        .map(|r| {
            let completion = r.unwrap();
            assert!(completion.degraded);
            completion.text
        })
        .collect();
    assert_eq!(texts, vec![UNINITIALIZED_PLACEHOLDER, UNINITIALIZED_PLACEHOLDER]);
}

#[tokio::test]
async fn test_ready_model_is_called_once_per_step() {
    let mut mock = MockLanguageModel::new();
    mock.expect_generate()
        .times(2)
        .returning(|prompt| Ok(format!("reply to {} chars", prompt.len())));

    let state = Pipeline::blog(ModelHandle::ready(mock))
        .run(PipelineState::new("Rust"))
        .await
        .unwrap();
    assert!(state.is_complete());
}

#[tokio::test]
async fn test_fail_fast_ends_after_first_step() {
    let model = FailingModel::unavailable("connection refused");
    let pipeline = Pipeline::builder("strict")
        .step(Arc::new(CreateOutlineStep::new()))
        .unwrap()
        .step(Arc::new(CreateBlogStep::new()))
        .unwrap()
        .with_model(ModelHandle::ready(model.clone()))
        .with_failure_mode(FailureMode::FailFast)
        .build()
        .unwrap();

    let results = completions(pipeline, "Rust").await;

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(BlogflowError::ModelUnavailable(_))));
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_lifecycle_events() {
    let sink = Arc::new(CollectingEventSink::new());
    let pipeline = Pipeline::blog(ModelHandle::ready(ScriptedModel::new(["o", "c"])))
        .with_event_sink(sink.clone());

    pipeline.run(PipelineState::new("Rust")).await.unwrap();

    assert_eq!(
        sink.event_types(),
        vec![
            "pipeline.started",
            "step.started",
            "step.completed",
            "step.started",
            "step.completed",
            "pipeline.completed",
        ]
    );
    let steps: Vec<_> = sink
        .events_of_type("step.completed")
        .iter()
        .filter_map(|e| e.step().map(str::to_string))
        .collect();
    assert_eq!(steps, vec!["create_outline", "create_blog"]);
    assert!(sink
        .events_of_type("step.completed")
        .iter()
        .all(|e| e.status() == Some(StepStatus::Ok)));
}

#[tokio::test]
async fn test_run_and_stream_report_the_same_events() {
    let run_sink = Arc::new(CollectingEventSink::new());
    Pipeline::blog(ModelHandle::ready(ScriptedModel::new(["o", "c"])))
        .with_event_sink(run_sink.clone())
        .run(PipelineState::new("Rust"))
        .await
        .unwrap();

    let stream_sink = Arc::new(CollectingEventSink::new());
    let pipeline = Pipeline::blog(ModelHandle::ready(ScriptedModel::new(["o", "c"])))
        .with_event_sink(stream_sink.clone());
    let results = completions(pipeline, "Rust").await;

    assert_eq!(results.len(), 2);
    assert_eq!(run_sink.event_types(), stream_sink.event_types());
    assert_eq!(stream_sink.events_of_type("pipeline.").len(), 2);
}

#[tokio::test]
async fn test_step_that_skips_its_write_is_a_fault() {
    let sink = Arc::new(CollectingEventSink::new());
    let pipeline = Pipeline::builder("silent")
        .step(Arc::new(SilentStep::new("quiet", StateField::Outline)))
        .unwrap()
        .step(Arc::new(CreateBlogStep::new()))
        .unwrap()
        .with_model(ModelHandle::ready(ScriptedModel::new(["unused"])))
        .with_event_sink(sink.clone())
        .build()
        .unwrap();

    let results = completions(pipeline, "Rust").await;

    assert_eq!(results.len(), 1);
    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.kind(), "pipeline_execution");
    assert!(err.to_string().contains("finished without writing 'outline'"));
    assert_eq!(
        sink.event_types(),
        vec!["pipeline.started", "step.started", "step.failed"]
    );
}

#[tokio::test]
async fn test_cancelled_before_start_runs_nothing() {
    let model = ScriptedModel::new(["o", "c"]);
    let pipeline = Arc::new(Pipeline::blog(ModelHandle::ready(model.clone())));
    let cancel = Arc::new(CancellationToken::new());
    cancel.cancel("client disconnected");

    let results: Vec<_> = pipeline
        .execute_streaming(PipelineState::new("Rust"), cancel)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(BlogflowError::Cancelled(ref r)) if r == "client disconnected"));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_cancelled_run_reports_cancel_status() {
    let sink = Arc::new(CollectingEventSink::new());
    let pipeline = Arc::new(
        Pipeline::blog(ModelHandle::ready(ScriptedModel::new(["o", "c"]))).with_event_sink(sink.clone()),
    );
    let cancel = Arc::new(CancellationToken::new());
    cancel.cancel("shutdown");

    let _: Vec<_> = pipeline
        .execute_streaming(PipelineState::new("Rust"), cancel)
        .collect()
        .await;

    let cancelled = sink.events_of_type("step.cancelled");
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].status(), Some(StepStatus::Cancel));
    assert_eq!(cancelled[0].step(), Some("create_outline"));
}

#[tokio::test]
async fn test_stream_is_lazy_between_steps() {
    let model = ScriptedModel::new(["o", "c"]);
    let pipeline = Arc::new(Pipeline::blog(ModelHandle::ready(model.clone())));
    let mut stream =
        pipeline.execute_streaming(PipelineState::new("Rust"), Arc::new(CancellationToken::new()));

    assert_eq!(model.call_count(), 0);
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.text, "o");
    assert_eq!(model.call_count(), 1);

    drop(stream);
    assert_eq!(model.call_count(), 1);
}
