//! Reachability engine benchmarks over layered random label graphs.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use faultline_analysis::connectivity::{build_adjacency, AdjacencyMatrix};
use faultline_analysis::importance::{analyze_importance_with, reachability, ReachabilityEngine};

/// Deterministic graph with `n` labels and about `3n` edges.
fn graph(n: usize) -> AdjacencyMatrix {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let pairs: Vec<(String, String)> = (0..n * 3)
        .map(|_| {
            let a = (next() % n as u64) as usize;
            let b = (next() % n as u64) as usize;
            (format!("L{a:04}"), format!("L{b:04}"))
        })
        .collect();
    build_adjacency(&pairs)
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachability");
    for n in [16usize, 64, 256] {
        let m = graph(n);
        for engine in [ReachabilityEngine::MatrixPower, ReachabilityEngine::Bfs] {
            group.bench_with_input(BenchmarkId::new(engine.name(), n), &m, |b, m| {
                b.iter(|| reachability(m, engine))
            });
        }
    }
    group.finish();
}

fn bench_importance(c: &mut Criterion) {
    let m = graph(128);
    let sinks: Vec<String> = m.labels().iter().take(8).cloned().collect();
    c.bench_function("importance_table_128", |b| {
        b.iter(|| analyze_importance_with(&m, &sinks, ReachabilityEngine::Bfs))
    });
}

criterion_group!(benches, bench_engines, bench_importance);
criterion_main!(benches);
