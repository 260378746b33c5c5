//! Red/blue edge classification.
//!
//! A *blue* edge `e = (u, v)` is one whose endpoints cannot be joined by a path avoiding `e` that
//! only uses edges not dominated by `e` (or edges already known to be blue); some Pareto-optimal
//! tree for every front point contains it. A *red* edge is one whose endpoints are joined by a
//! path of non-red edges that each dominate `e`; replacing it along that path never increases
//! any cost component, so the search may skip it.

use std::time::Instant;

use pmst_core::errors::PmstError;
use pmst_core::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{Edge, Graph};
use crate::ids::make_edge;

/// Counters produced by [`preprocess`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PreprocessReport {
    /// Number of edges flagged blue.
    pub blue_edges: usize,
    /// Number of edges flagged red.
    pub red_edges: usize,
    /// Wall-clock time spent classifying edges, in seconds.
    pub duration_secs: f64,
}

/// Clears existing flags, then runs [`find_blue_edges`] followed by [`find_red_edges`].
pub fn preprocess<const D: usize>(graph: &mut Graph<D>) -> Result<PreprocessReport, PmstError> {
    let start = Instant::now();
    graph.clear_flags();
    let blue_edges = find_blue_edges(graph)?;
    let red_edges = find_red_edges(graph)?;
    let report = PreprocessReport {
        blue_edges,
        red_edges,
        duration_secs: start.elapsed().as_secs_f64(),
    };
    debug!(
        blue = report.blue_edges,
        red = report.red_edges,
        edges = graph.edge_count(),
        "edge classification finished"
    );
    Ok(report)
}

/// Flags blue edges in edge-id order. Returns the number of newly flagged edges.
pub fn find_blue_edges<const D: usize>(graph: &mut Graph<D>) -> Result<usize, PmstError> {
    let mut flagged = 0;
    for idx in 0..graph.edge_count() {
        let id = make_edge(idx);
        let edge = graph.edge(id)?.clone();
        if edge.is_blue() {
            continue;
        }
        let reachable = reaches(graph, id, &edge, |candidate| {
            !edge.cost().dominates(candidate.cost()) || candidate.is_blue()
        });
        if !reachable {
            graph.mark_blue(id)?;
            flagged += 1;
        }
    }
    Ok(flagged)
}

/// Flags red edges in edge-id order. Blue edges are never flagged red.
pub fn find_red_edges<const D: usize>(graph: &mut Graph<D>) -> Result<usize, PmstError> {
    let mut flagged = 0;
    for idx in 0..graph.edge_count() {
        let id = make_edge(idx);
        let edge = graph.edge(id)?.clone();
        if edge.is_red() || edge.is_blue() {
            continue;
        }
        let reachable = reaches(graph, id, &edge, |candidate| {
            !candidate.is_red() && candidate.cost().dominates(edge.cost())
        });
        if reachable {
            graph.mark_red(id)?;
            flagged += 1;
        }
    }
    Ok(flagged)
}

/// Depth-first search from `edge.u()` towards `edge.v()` that never uses `skip` and only follows
/// edges accepted by `usable`.
fn reaches<const D: usize>(
    graph: &Graph<D>,
    skip: EdgeId,
    edge: &Edge<D>,
    usable: impl Fn(&Edge<D>) -> bool,
) -> bool {
    let target: NodeId = edge.v();
    let mut visited = vec![false; graph.node_count()];
    let mut stack = vec![edge.u()];
    visited[edge.u().index()] = true;
    while let Some(node) = stack.pop() {
        for arc in graph.adjacency(node) {
            if arc.edge == skip || visited[arc.far.index()] {
                continue;
            }
            let Ok(candidate) = graph.edge(arc.edge) else {
                continue;
            };
            if !usable(candidate) {
                continue;
            }
            if arc.far == target {
                return true;
            }
            visited[arc.far.index()] = true;
            stack.push(arc.far);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmst_core::CostVector;

    fn n(raw: u32) -> NodeId {
        NodeId::from_raw(raw)
    }

    #[test]
    fn bridges_are_blue() {
        let mut graph = Graph::<2>::new(3);
        let bridge = graph.add_edge(n(0), n(1), CostVector::new([9, 9])).unwrap();
        graph.add_edge(n(1), n(2), CostVector::new([1, 5])).unwrap();
        graph.add_edge(n(1), n(2), CostVector::new([5, 1])).unwrap();
        let report = preprocess(&mut graph).unwrap();
        assert!(graph.edge(bridge).unwrap().is_blue());
        assert_eq!(report.blue_edges, 1);
        assert_eq!(report.red_edges, 0);
    }

    #[test]
    fn dominated_parallel_edge_is_red() {
        let mut graph = Graph::<2>::new(3);
        graph.add_edge(n(0), n(1), CostVector::new([1, 1])).unwrap();
        graph.add_edge(n(1), n(2), CostVector::new([1, 1])).unwrap();
        let chord = graph.add_edge(n(0), n(2), CostVector::new([2, 3])).unwrap();
        let report = preprocess(&mut graph).unwrap();
        assert!(graph.edge(chord).unwrap().is_red());
        assert_eq!(report.red_edges, 1);
        // Both cheap edges are blue: every alternative path uses the dominated chord.
        assert_eq!(report.blue_edges, 2);
    }

    #[test]
    fn equal_parallel_edges_keep_exactly_one() {
        let mut graph = Graph::<2>::new(2);
        let first = graph.add_edge(n(0), n(1), CostVector::new([4, 4])).unwrap();
        let second = graph.add_edge(n(0), n(1), CostVector::new([4, 4])).unwrap();
        preprocess(&mut graph).unwrap();
        assert!(graph.edge(first).unwrap().is_blue());
        assert!(!graph.edge(first).unwrap().is_red());
        assert!(graph.edge(second).unwrap().is_red());
    }

    #[test]
    fn incomparable_triangle_is_untouched() {
        let mut graph = Graph::<2>::new(3);
        graph.add_edge(n(0), n(1), CostVector::new([1, 10])).unwrap();
        graph.add_edge(n(1), n(2), CostVector::new([10, 1])).unwrap();
        graph.add_edge(n(0), n(2), CostVector::new([6, 6])).unwrap();
        let report = preprocess(&mut graph).unwrap();
        assert_eq!(report.blue_edges, 0);
        assert_eq!(report.red_edges, 0);
    }
}
