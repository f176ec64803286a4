//! Benchmarks for end-to-end chain throughput
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pipechain::{Pipeline, PipelineConfig};

fn bench_stream_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_length");

    for &elements in &[100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(elements));
        group.bench_with_input(
            BenchmarkId::new("four_workers", elements),
            &elements,
            |b, &n| {
                let pipeline = Pipeline::new(PipelineConfig {
                    num_elements: n,
                    ..Default::default()
                });
                b.iter(|| black_box(pipeline.run().unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_depth");
    group.throughput(Throughput::Elements(1_000));

    for &workers in &[2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &w| {
            let pipeline = Pipeline::new(PipelineConfig {
                workers: w,
                num_elements: 1_000,
                ..Default::default()
            });
            b.iter(|| black_box(pipeline.run().unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stream_length, bench_chain_depth);
criterion_main!(benches);
