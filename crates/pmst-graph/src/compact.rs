use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::{CostVector, EdgeId, NodeId};

use crate::graph::Graph;
use crate::ids::make_node;

/// Graph obtained by contracting every blue component into a single node.
///
/// Components are discovered in node order, so the component holding node `0` becomes the compact
/// root `0`. Each non-red edge joining two different components is copied once; red edges and
/// edges inside a component are dropped. The blue spanning edges of every component (and their
/// summed cost) are kept so search results can be mapped back onto the input graph.
#[derive(Debug, Clone)]
pub struct CompactGraph<const D: usize> {
    graph: Graph<D>,
    original_edges: Vec<EdgeId>,
    component_of: Vec<NodeId>,
    blue_edges: Vec<EdgeId>,
    fixed_cost: CostVector<D>,
}

impl<const D: usize> CompactGraph<D> {
    /// Contracts `graph` using its current red and blue flags.
    pub fn contract(graph: &Graph<D>) -> Result<Self, PmstError> {
        let n = graph.node_count();
        let mut component_of: Vec<Option<NodeId>> = vec![None; n];
        let mut blue_edges = Vec::new();
        let mut fixed_cost = CostVector::zero();
        let mut components = 0usize;

        for start in graph.nodes() {
            if component_of[start.index()].is_some() {
                continue;
            }
            let component = make_node(components);
            components += 1;
            component_of[start.index()] = Some(component);
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                for arc in graph.adjacency(node) {
                    if component_of[arc.far.index()].is_some() {
                        continue;
                    }
                    let edge = graph.edge(arc.edge)?;
                    if !edge.is_blue() {
                        continue;
                    }
                    component_of[arc.far.index()] = Some(component);
                    blue_edges.push(arc.edge);
                    fixed_cost = add_fixed(&fixed_cost, edge.cost())?;
                    stack.push(arc.far);
                }
            }
        }

        let component_of: Vec<NodeId> = component_of
            .into_iter()
            .map(|slot| slot.unwrap_or(NodeId::ROOT))
            .collect();
        let mut compact = Graph::new(components);
        let mut original_edges = Vec::new();
        for (id, edge) in graph.edges() {
            if edge.is_red() {
                continue;
            }
            let a = component_of[edge.u().index()];
            let b = component_of[edge.v().index()];
            if a == b {
                continue;
            }
            compact.add_edge(a, b, *edge.cost())?;
            original_edges.push(id);
        }
        blue_edges.sort_unstable();

        Ok(Self {
            graph: compact,
            original_edges,
            component_of,
            blue_edges,
            fixed_cost,
        })
    }

    /// The contracted graph handed to the search.
    pub fn graph(&self) -> &Graph<D> {
        &self.graph
    }

    /// Identifier, in the input graph, of compact edge `compact`.
    pub fn original_edge(&self, compact: EdgeId) -> Result<EdgeId, PmstError> {
        self.original_edges
            .get(compact.index())
            .copied()
            .ok_or_else(|| {
                PmstError::Graph(
                    ErrorInfo::new("unknown-edge", "compact edge does not exist")
                        .with_context("edge", compact),
                )
            })
    }

    /// Compact node representing input node `node`.
    pub fn component_of(&self, node: NodeId) -> Option<NodeId> {
        self.component_of.get(node.index()).copied()
    }

    /// Blue edges contracted away, sorted by id.
    pub fn blue_edges(&self) -> &[EdgeId] {
        &self.blue_edges
    }

    /// Summed cost of the contracted blue edges.
    pub fn fixed_cost(&self) -> &CostVector<D> {
        &self.fixed_cost
    }

    /// Maps a tree of the compact graph onto the input graph, adding the contracted blue edges.
    /// The result is sorted by edge id.
    pub fn expand_tree(&self, compact_edges: &[EdgeId]) -> Result<Vec<EdgeId>, PmstError> {
        let mut edges = self.blue_edges.clone();
        for edge in compact_edges {
            edges.push(self.original_edge(*edge)?);
        }
        edges.sort_unstable();
        Ok(edges)
    }

    /// Cost in the input graph of a tree whose compact cost is `search_cost`.
    pub fn total_cost(&self, search_cost: &CostVector<D>) -> Result<CostVector<D>, PmstError> {
        add_fixed(&self.fixed_cost, search_cost)
    }
}

fn add_fixed<const D: usize>(
    a: &CostVector<D>,
    b: &CostVector<D>,
) -> Result<CostVector<D>, PmstError> {
    a.checked_add(b).ok_or_else(|| {
        PmstError::Graph(
            ErrorInfo::new("cost-overflow", "summed cost exceeds the component range")
                .with_context("lhs", a)
                .with_context("rhs", b),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::preprocess;

    fn n(raw: u32) -> NodeId {
        NodeId::from_raw(raw)
    }

    #[test]
    fn unflagged_graph_contracts_to_itself() {
        let mut graph = Graph::<2>::new(3);
        graph.add_edge(n(0), n(1), CostVector::new([1, 2])).unwrap();
        graph.add_edge(n(2), n(1), CostVector::new([3, 4])).unwrap();
        let compact = CompactGraph::contract(&graph).unwrap();
        assert_eq!(compact.graph(), &graph);
        assert!(compact.blue_edges().is_empty());
        assert_eq!(compact.fixed_cost(), &CostVector::zero());
        assert_eq!(
            compact.original_edge(EdgeId::from_raw(1)).unwrap(),
            EdgeId::from_raw(1)
        );
    }

    #[test]
    fn blue_components_collapse() {
        // 0 -(blue bridge)- 1, then a 1-2-3 triangle with incomparable costs.
        let mut graph = Graph::<2>::new(4);
        let bridge = graph.add_edge(n(0), n(1), CostVector::new([2, 2])).unwrap();
        graph.add_edge(n(1), n(2), CostVector::new([1, 10])).unwrap();
        graph.add_edge(n(2), n(3), CostVector::new([10, 1])).unwrap();
        let chord = graph.add_edge(n(1), n(3), CostVector::new([6, 6])).unwrap();
        preprocess(&mut graph).unwrap();

        let compact = CompactGraph::contract(&graph).unwrap();
        assert_eq!(compact.graph().node_count(), 3);
        assert_eq!(compact.graph().edge_count(), 3);
        assert_eq!(compact.blue_edges(), &[bridge]);
        assert_eq!(compact.fixed_cost(), &CostVector::new([2, 2]));
        assert_eq!(compact.component_of(n(1)), Some(NodeId::ROOT));
        assert_eq!(compact.original_edge(EdgeId::from_raw(2)).unwrap(), chord);

        let expanded = compact.expand_tree(&[EdgeId::from_raw(2)]).unwrap();
        assert_eq!(expanded, vec![bridge, chord]);
        assert_eq!(
            compact.total_cost(&CostVector::new([6, 6])).unwrap(),
            CostVector::new([8, 8])
        );
    }
}
