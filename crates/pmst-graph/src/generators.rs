use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::rng::RngHandle;
use pmst_core::{CostType, CostVector};
use rand::Rng;

use crate::graph::Graph;
use crate::ids::make_node;

/// Generates a complete graph on `n_nodes` nodes with costs drawn uniformly from `1..=max_cost`.
pub fn gen_complete<const D: usize>(
    n_nodes: usize,
    max_cost: CostType,
    rng: &mut RngHandle,
) -> Result<Graph<D>, PmstError> {
    ensure_cost_range(max_cost)?;
    let mut graph = Graph::new(n_nodes);
    for u in 0..n_nodes {
        for v in (u + 1)..n_nodes {
            let cost = rng.cost_vector(max_cost);
            graph.add_edge(make_node(u), make_node(v), cost)?;
        }
    }
    Ok(graph)
}

/// Generates a connected graph: a random spanning tree plus every other pair with probability
/// `extra_edge_probability`.
pub fn gen_random_connected<const D: usize>(
    n_nodes: usize,
    extra_edge_probability: f64,
    max_cost: CostType,
    rng: &mut RngHandle,
) -> Result<Graph<D>, PmstError> {
    ensure_cost_range(max_cost)?;
    if !(0.0..=1.0).contains(&extra_edge_probability) {
        return Err(PmstError::Graph(
            ErrorInfo::new("invalid-probability", "edge probability must lie in [0, 1]")
                .with_context("probability", extra_edge_probability),
        ));
    }
    let mut graph = Graph::new(n_nodes);
    let mut order: Vec<usize> = (0..n_nodes).collect();
    rng.shuffle(&mut order);
    let mut present = vec![false; n_nodes * n_nodes];
    for idx in 1..order.len() {
        let parent = order[rng.gen_range(0..idx)];
        let child = order[idx];
        present[parent * n_nodes + child] = true;
        present[child * n_nodes + parent] = true;
        let cost = rng.cost_vector(max_cost);
        graph.add_edge(make_node(parent), make_node(child), cost)?;
    }
    for u in 0..n_nodes {
        for v in (u + 1)..n_nodes {
            if present[u * n_nodes + v] || !rng.gen_bool(extra_edge_probability) {
                continue;
            }
            let cost = rng.cost_vector(max_cost);
            graph.add_edge(make_node(u), make_node(v), cost)?;
        }
    }
    Ok(graph)
}

/// Builds the path `0 - 1 - ... - k` whose `i`-th edge carries `costs[i]`.
pub fn path_graph<const D: usize>(costs: &[CostVector<D>]) -> Result<Graph<D>, PmstError> {
    let mut graph = Graph::new(costs.len() + 1);
    for (idx, cost) in costs.iter().enumerate() {
        graph.add_edge(make_node(idx), make_node(idx + 1), *cost)?;
    }
    Ok(graph)
}

fn ensure_cost_range(max_cost: CostType) -> Result<(), PmstError> {
    if max_cost == 0 {
        return Err(PmstError::Graph(
            ErrorInfo::new("invalid-cost-range", "max_cost must be positive")
                .with_hint("costs are drawn from 1..=max_cost"),
        ));
    }
    Ok(())
}
