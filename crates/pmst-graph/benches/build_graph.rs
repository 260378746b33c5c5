use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pmst_core::rng::RngHandle;
use pmst_graph::{gen_complete, Graph};

fn generate_complete(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_generation");
    for nodes in [50usize, 200] {
        group.bench_with_input(BenchmarkId::new("gen_complete", nodes), &nodes, |b, &n| {
            b.iter(|| {
                let mut rng = RngHandle::from_seed(42);
                let graph: Graph<3> = gen_complete(n, 1_000, &mut rng).unwrap();
                black_box(graph)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, generate_complete);
criterion_main!(benches);
