use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pmst_core::rng::RngHandle;
use pmst_graph::{gen_complete, Graph};
use pmst_search::{solve, Algorithm, SearchConfig};

fn search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_graph_search");
    group.sample_size(10);
    for nodes in [10usize, 12] {
        let mut rng = RngHandle::for_substream(11, nodes as u64);
        let graph: Graph<2> = gen_complete(nodes, 100, &mut rng).unwrap();
        for algorithm in [Algorithm::Primary, Algorithm::Alternative] {
            let config = SearchConfig::with_algorithm(algorithm);
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), nodes),
                &graph,
                |b, graph| b.iter(|| black_box(solve(graph, &config).unwrap().solution_count())),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
