use pmst_core::{CostVector, EdgeId, NodeId};
use pmst_graph::{path_graph, Graph};
use pmst_search::{solve, Algorithm, SearchConfig, SearchOutcome};

const BOTH: [Algorithm; 2] = [Algorithm::Primary, Algorithm::Alternative];

fn n(raw: u32) -> NodeId {
    NodeId::from_raw(raw)
}

fn run<const D: usize>(graph: &Graph<D>, algorithm: Algorithm) -> SearchOutcome<D> {
    solve(graph, &SearchConfig::with_algorithm(algorithm)).expect("search runs")
}

fn triangle() -> Graph<2> {
    let mut graph = Graph::new(3);
    graph.add_edge(n(0), n(1), CostVector::new([1, 10])).unwrap();
    graph.add_edge(n(1), n(2), CostVector::new([10, 1])).unwrap();
    graph.add_edge(n(0), n(2), CostVector::new([6, 6])).unwrap();
    graph
}

#[test]
fn path_has_a_single_mandatory_tree() {
    let graph = path_graph(&[CostVector::new([1, 5]), CostVector::new([1, 5])]).unwrap();
    for algorithm in BOTH {
        let outcome = run(&graph, algorithm);
        assert_eq!(outcome.algorithm(), algorithm);
        assert_eq!(outcome.solution_count(), 1);
        assert_eq!(outcome.sorted_costs(), vec![CostVector::new([2, 10])]);
        assert_eq!(
            outcome.tree(0).unwrap(),
            vec![EdgeId::from_raw(0), EdgeId::from_raw(1)]
        );
        assert_eq!(outcome.stats().solutions, 1);
        assert_eq!(outcome.stats().extractions, 2);
    }
}

#[test]
fn triangle_has_three_incomparable_trees() {
    let graph = triangle();
    let expected = vec![
        CostVector::new([7, 16]),
        CostVector::new([11, 11]),
        CostVector::new([16, 7]),
    ];
    for algorithm in BOTH {
        let outcome = run(&graph, algorithm);
        assert_eq!(outcome.solution_count(), 3);
        assert_eq!(outcome.sorted_costs(), expected);
        for (idx, solution) in outcome.solutions().iter().enumerate() {
            let tree = outcome.tree(idx).unwrap();
            assert_eq!(tree.len(), 2);
            let mut sum = CostVector::zero();
            for edge in &tree {
                sum = sum.checked_add(graph.edge(*edge).unwrap().cost()).unwrap();
            }
            assert_eq!(sum, solution.cost);
        }
    }
}

#[test]
fn single_node_yields_the_empty_tree() {
    let graph = Graph::<3>::new(1);
    for algorithm in BOTH {
        let outcome = run(&graph, algorithm);
        assert_eq!(outcome.solution_count(), 1);
        assert_eq!(outcome.solutions()[0].cost, CostVector::zero());
        assert!(outcome.tree(0).unwrap().is_empty());
    }
}

#[test]
fn disconnected_graph_has_no_spanning_tree() {
    let mut graph = Graph::<2>::new(4);
    graph.add_edge(n(0), n(1), CostVector::new([1, 1])).unwrap();
    graph.add_edge(n(2), n(3), CostVector::new([1, 1])).unwrap();
    for algorithm in BOTH {
        let outcome = run(&graph, algorithm);
        assert_eq!(outcome.solution_count(), 0);
        assert!(outcome.sorted_costs().is_empty());
        assert_eq!(outcome.tree(0).unwrap_err().code(), "unknown-solution");
    }
}

#[test]
fn parallel_edges_keep_only_pareto_copies() {
    let mut graph = Graph::<2>::new(2);
    graph.add_edge(n(0), n(1), CostVector::new([3, 3])).unwrap();
    let cheap = graph.add_edge(n(1), n(0), CostVector::new([1, 4])).unwrap();
    graph.add_edge(n(0), n(1), CostVector::new([2, 5])).unwrap();
    for algorithm in BOTH {
        let outcome = run(&graph, algorithm);
        assert_eq!(
            outcome.sorted_costs(),
            vec![CostVector::new([1, 4]), CostVector::new([3, 3])]
        );
        let first = outcome
            .solutions()
            .iter()
            .position(|solution| solution.cost == CostVector::new([1, 4]))
            .unwrap();
        assert_eq!(outcome.tree(first).unwrap(), vec![cheap]);
    }
}

#[test]
fn identical_trees_are_reported_once() {
    // Two spanning trees with the same cost vector.
    let mut graph = Graph::<2>::new(3);
    graph.add_edge(n(0), n(1), CostVector::new([2, 2])).unwrap();
    graph.add_edge(n(1), n(2), CostVector::new([2, 2])).unwrap();
    graph.add_edge(n(0), n(2), CostVector::new([2, 2])).unwrap();
    for algorithm in BOTH {
        let outcome = run(&graph, algorithm);
        assert_eq!(outcome.sorted_costs(), vec![CostVector::new([4, 4])]);
    }
}

#[test]
fn tight_dominance_bound_prunes_everything_but_the_root() {
    let graph = triangle();
    for algorithm in BOTH {
        let mut config = SearchConfig::with_algorithm(algorithm);
        config.dominance_bound = Some(CostVector::zero());
        let outcome = solve(&graph, &config).unwrap();
        assert_eq!(outcome.solution_count(), 0);

        config.dominance_bound = Some(CostVector::splat(1_000));
        let outcome = solve(&graph, &config).unwrap();
        assert_eq!(outcome.solution_count(), 3);
    }
}

#[test]
fn stats_count_the_work_done() {
    let graph = triangle();
    for algorithm in BOTH {
        let stats = run(&graph, algorithm).stats().clone();
        assert_eq!(stats.solutions, 3);
        // root, {0, 1} and {0, 2}; pops at the full subset are not expansions
        assert_eq!(stats.extractions, 3, "{algorithm}");
        assert!(stats.insertions >= stats.solutions as u64);
        assert_eq!(stats.materialized_states, 4);
        assert!(stats.elapsed_secs >= 0.0);
    }
}
