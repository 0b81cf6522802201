//! Benchmarks for pipeline execution.

use blogflow::prelude::*;
use blogflow::testing::ScriptedModel;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use futures::StreamExt;
use std::sync::Arc;

fn pipeline_benchmark(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Runtime::new() else {
        return;
    };

    c.bench_function("blog_run_scripted", |b| {
        b.to_async(&runtime).iter(|| async {
            let model = ScriptedModel::new(["1. a\n2. b\n3. c\n4. d\n5. e", "ten lines"]);
            let pipeline = Pipeline::blog(ModelHandle::ready(model));
            black_box(pipeline.run(PipelineState::new("Rust")).await)
        });
    });

    c.bench_function("blog_ndjson_uninitialized", |b| {
        let pipeline = Arc::new(
            Pipeline::blog(ModelHandle::uninitialized("bench")).with_event_sink(Arc::new(NoOpEventSink)),
        );
        b.to_async(&runtime).iter(|| async {
            let lines: Vec<String> = ndjson_stream(
                &pipeline,
                PipelineState::new("Rust"),
                Arc::new(CancellationToken::new()),
            )
            .collect()
            .await;
            black_box(lines)
        });
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
