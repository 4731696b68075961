//! Benchmarks for meta extraction and a full scripted run.

use blogflow::meta::MetaExtractor;
use blogflow::pipeline::BlogPipeline;
use blogflow::testing::{optimized_text, sample_request, ScriptedGateway};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn large_optimized_output() -> String {
    let body = "Sandy shores welcome leashed dogs before nine in the morning.\n".repeat(5_000);
    optimized_text("Best Dog Beaches", "Top beaches for pets", &body)
}

fn meta_benchmark(c: &mut Criterion) {
    let text = large_optimized_output();

    c.bench_function("meta_extract_large", |b| {
        b.iter(|| MetaExtractor::extract(black_box(&text)))
    });

    c.bench_function("optimized_body_large", |b| {
        b.iter(|| MetaExtractor::optimized_body(black_box(&text)).len())
    });
}

fn pipeline_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let text = large_optimized_output();
    let request = sample_request();

    c.bench_function("scripted_pipeline_run", |b| {
        b.iter(|| {
            let pipeline = BlogPipeline::new(Arc::new(ScriptedGateway::repeating(text.clone())));
            runtime.block_on(pipeline.run_pipeline(black_box(&request))).unwrap()
        })
    });
}

criterion_group!(benches, meta_benchmark, pipeline_benchmark);
criterion_main!(benches);
