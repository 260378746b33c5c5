use pmst_core::rng::RngHandle;
use pmst_core::CostVector;
use pmst_graph::{gen_random_connected, preprocess, CompactGraph, Graph};
use pmst_search::{solve, Algorithm, SearchConfig};

fn front<const D: usize>(graph: &Graph<D>, algorithm: Algorithm) -> Vec<CostVector<D>> {
    solve(graph, &SearchConfig::with_algorithm(algorithm))
        .unwrap()
        .sorted_costs()
}

fn check<const D: usize>(graph: Graph<D>) {
    let raw = front(&graph, Algorithm::Primary);

    let mut flagged = graph.clone();
    preprocess(&mut flagged).unwrap();
    let flagged_front = front(&flagged, Algorithm::Primary);
    assert_eq!(flagged_front, raw, "red edges changed the front");

    let compact = CompactGraph::contract(&flagged).unwrap();
    for algorithm in [Algorithm::Primary, Algorithm::Alternative] {
        let outcome = solve(compact.graph(), &SearchConfig::with_algorithm(algorithm)).unwrap();
        let mut lifted: Vec<_> = outcome
            .solutions()
            .iter()
            .map(|solution| compact.total_cost(&solution.cost).unwrap())
            .collect();
        lifted.sort_unstable();
        assert_eq!(lifted, raw, "{algorithm} on the compact graph changed the front");

        for (idx, solution) in outcome.solutions().iter().enumerate() {
            let edges = compact.expand_tree(&outcome.tree(idx).unwrap()).unwrap();
            assert_eq!(edges.len(), graph.node_count() - 1);
            let cost = edges.iter().fold(CostVector::zero(), |acc, id| {
                acc.checked_add(graph.edge(*id).unwrap().cost()).unwrap()
            });
            assert_eq!(cost, compact.total_cost(&solution.cost).unwrap());
        }
    }
}

#[test]
fn sparse_graphs_keep_their_front() {
    for seed in 0..30 {
        let mut rng = RngHandle::for_substream(9, seed);
        check::<2>(gen_random_connected(9, 0.25, 12, &mut rng).unwrap());
    }
}

#[test]
fn dense_graphs_with_ties_keep_their_front() {
    for seed in 0..15 {
        let mut rng = RngHandle::for_substream(10, seed);
        check::<3>(gen_random_connected(8, 0.6, 4, &mut rng).unwrap());
    }
}

#[test]
fn trees_contract_to_a_single_node() {
    let mut rng = RngHandle::from_seed(3);
    let mut graph: Graph<2> = gen_random_connected(7, 0.0, 30, &mut rng).unwrap();
    let report = preprocess(&mut graph).unwrap();
    assert_eq!(report.blue_edges, 6);
    assert_eq!(report.red_edges, 0);
    let compact = CompactGraph::contract(&graph).unwrap();
    assert_eq!(compact.graph().node_count(), 1);
    let outcome = solve(compact.graph(), &SearchConfig::default()).unwrap();
    assert_eq!(outcome.solution_count(), 1);
    let total = compact.total_cost(&outcome.solutions()[0].cost).unwrap();
    assert_eq!(compact.expand_tree(&outcome.tree(0).unwrap()).unwrap().len(), 6);
    assert_eq!(&total, compact.fixed_cost());
}
