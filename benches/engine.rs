use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use multipath_sssp::algorithm::ShortestPathEngine;
use multipath_sssp::graph::generators::{generate_grid, generate_random};

fn bench_random(c: &mut Criterion) {
    let engine = ShortestPathEngine::new();
    let mut group = c.benchmark_group("random");
    for &n in &[1_000usize, 10_000, 50_000] {
        let graph = generate_random(n, 3.0, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| engine.compute(graph, black_box(0)).unwrap())
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let engine = ShortestPathEngine::new();
    let graph = generate_grid(200, 200);
    c.bench_function("grid 200x200", |b| {
        b.iter(|| engine.compute(&graph, black_box(0)).unwrap())
    });
}

criterion_group!(benches, bench_random, bench_grid);
criterion_main!(benches);
