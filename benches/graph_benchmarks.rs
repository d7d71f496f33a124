use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use typed_multigraph::graph::{Edge, EdgeType, Multigraph, TypedGraph};

const TYPES: [&str; 4] = ["KNOWS", "LIKES", "FOLLOWS", "BLOCKS"];

/// Sparse random-looking graph: every vertex gets `fanout` edges
fn build_graph(size: u32, fanout: u32) -> Multigraph {
    let graph = Multigraph::directed();
    for v in 0..size {
        for k in 1..=fanout {
            let to = (v.wrapping_mul(31) + k * 17) % size;
            let t = TYPES[((v + k) % TYPES.len() as u32) as usize];
            let _ = graph.add_edge(Edge::directed(v, to, t));
        }
    }
    graph
}

/// Benchmark edge insertion throughput
fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for size in [100u32, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let graph = build_graph(size, 4);
                criterion::black_box(graph.size());
            });
        });
    }
    group.finish();
}

/// Benchmark edge membership checks
fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains_edge");

    for size in [1000u32, 10_000].iter() {
        let graph = build_graph(*size, 8);
        let probes: Vec<Edge<EdgeType>> = (0..*size)
            .map(|v| Edge::directed(v, (v * 7) % size, "KNOWS"))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let hits = probes.iter().filter(|e| graph.contains_edge(e)).count();
                criterion::black_box(hits);
            });
        });
    }
    group.finish();
}

/// Benchmark subgraph size, which is recomputed on every call
fn bench_subgraph_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("subgraph_size");
    let graph = build_graph(10_000, 8);

    for k in [10u32, 100, 1000].iter() {
        let sub = graph.subgraph(0..*k).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, _| {
            b.iter(|| criterion::black_box(sub.size()));
        });
    }

    let typed = graph
        .subgraph_with_types(0..1000, [EdgeType::new("KNOWS")])
        .unwrap();
    group.bench_function("typed_1000", |b| {
        b.iter(|| criterion::black_box(typed.size()));
    });
    group.finish();
}

/// Benchmark vertex removal with live subgraphs registered
fn bench_vertex_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("vertex_removal");

    for views in [0usize, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(views), views, |b, &views| {
            b.iter(|| {
                let graph = build_graph(1000, 4);
                let subs: Vec<_> = (0..views)
                    .filter_map(|i| graph.subgraph((i as u32)..(i as u32 + 50)).ok())
                    .collect();
                for v in 0..100 {
                    let _ = graph.remove_vertex(v);
                }
                criterion::black_box(subs.len());
            });
        });
    }
    group.finish();
}

/// Benchmark whole-graph edge iteration and induced copies
fn bench_iteration_and_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");
    let graph = build_graph(10_000, 4);

    group.bench_function("edges", |b| {
        b.iter(|| criterion::black_box(graph.edges().iter().count()));
    });

    group.bench_function("copy_half", |b| {
        b.iter(|| {
            let copy = graph.copy(0..5000).unwrap();
            criterion::black_box(copy.size());
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_edge_insertion,
    bench_contains,
    bench_subgraph_size,
    bench_vertex_removal,
    bench_iteration_and_copy
);
criterion_main!(benches);
