use std::collections::VecDeque;

use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::{CostVector, EdgeId, NodeId};

use crate::ids::{make_edge, make_node};

/// One undirected edge with its cost vector and preprocessing flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<const D: usize> {
    u: NodeId,
    v: NodeId,
    cost: CostVector<D>,
    red: bool,
    blue: bool,
}

impl<const D: usize> Edge<D> {
    /// First endpoint, as passed to [`Graph::add_edge`].
    pub fn u(&self) -> NodeId {
        self.u
    }

    /// Second endpoint, as passed to [`Graph::add_edge`].
    pub fn v(&self) -> NodeId {
        self.v
    }

    /// Both endpoints in insertion order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.u, self.v)
    }

    /// Cost vector carried by the edge.
    pub fn cost(&self) -> &CostVector<D> {
        &self.cost
    }

    /// Whether preprocessing proved that no Pareto-optimal tree needs this edge.
    pub fn is_red(&self) -> bool {
        self.red
    }

    /// Whether preprocessing proved that the Pareto front is reachable with this edge fixed.
    pub fn is_blue(&self) -> bool {
        self.blue
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.u == node || self.v == node
    }

    /// The endpoint opposite to `node`. Returns `u` when `node` is not an endpoint.
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.u == node {
            self.v
        } else {
            self.u
        }
    }
}

/// Entry of an adjacency list: the far endpoint and the edge leading to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arc {
    /// Far endpoint of the edge as seen from the owning node.
    pub far: NodeId,
    /// Edge identifier.
    pub edge: EdgeId,
}

/// Undirected multigraph whose edges carry `D`-dimensional costs.
///
/// Nodes are `0..node_count`; node `0` is the root of every search. Parallel edges are allowed,
/// self loops are rejected. Each edge appears in the adjacency lists of both endpoints in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<const D: usize> {
    adjacency: Vec<Vec<Arc>>,
    edges: Vec<Edge<D>>,
}

impl<const D: usize> Graph<D> {
    /// Creates a graph with `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edges: Vec::new(),
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, including red ones.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all node identifiers in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len()).map(make_node)
    }

    /// Iterates over all edges with their identifiers.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<D>)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| (make_edge(idx), edge))
    }

    /// Adds an undirected edge between `u` and `v`.
    pub fn add_edge(
        &mut self,
        u: NodeId,
        v: NodeId,
        cost: CostVector<D>,
    ) -> Result<EdgeId, PmstError> {
        self.ensure_node(u)?;
        self.ensure_node(v)?;
        if u == v {
            return Err(PmstError::Graph(
                ErrorInfo::new("self-loop", "edge endpoints must differ")
                    .with_context("node", u.as_raw()),
            ));
        }
        if self.edges.len() >= u32::MAX as usize {
            return Err(PmstError::Capacity(ErrorInfo::new(
                "edge-id-overflow",
                "edge identifiers are limited to 32 bits",
            )));
        }
        let id = make_edge(self.edges.len());
        self.edges.push(Edge {
            u,
            v,
            cost,
            red: false,
            blue: false,
        });
        self.adjacency[u.index()].push(Arc { far: v, edge: id });
        self.adjacency[v.index()].push(Arc { far: u, edge: id });
        Ok(id)
    }

    /// Looks up an edge.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge<D>, PmstError> {
        self.edges.get(id.index()).ok_or_else(|| unknown_edge(id))
    }

    /// Adjacency list of `node`; empty for unknown nodes.
    pub fn adjacency(&self, node: NodeId) -> &[Arc] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Flags an edge as excludable from every Pareto-optimal tree.
    pub fn mark_red(&mut self, id: EdgeId) -> Result<(), PmstError> {
        let edge = self.edges.get_mut(id.index()).ok_or_else(|| unknown_edge(id))?;
        edge.red = true;
        Ok(())
    }

    /// Flags an edge as part of every tree the search needs to consider.
    pub fn mark_blue(&mut self, id: EdgeId) -> Result<(), PmstError> {
        let edge = self.edges.get_mut(id.index()).ok_or_else(|| unknown_edge(id))?;
        edge.blue = true;
        Ok(())
    }

    /// Drops every red and blue flag.
    pub fn clear_flags(&mut self) {
        for edge in &mut self.edges {
            edge.red = false;
            edge.blue = false;
        }
    }

    /// Number of red edges.
    pub fn red_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.red).count()
    }

    /// Number of blue edges.
    pub fn blue_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.blue).count()
    }

    /// Whether every node is reachable from node 0, ignoring flags. The empty graph is connected.
    pub fn is_connected(&self) -> bool {
        let n = self.node_count();
        if n == 0 {
            return true;
        }
        let mut reached = vec![false; n];
        let mut queue = VecDeque::from([0usize]);
        reached[0] = true;
        let mut count = 1;
        while let Some(node) = queue.pop_front() {
            for arc in &self.adjacency[node] {
                let far = arc.far.index();
                if !reached[far] {
                    reached[far] = true;
                    count += 1;
                    queue.push_back(far);
                }
            }
        }
        count == n
    }

    fn ensure_node(&self, node: NodeId) -> Result<(), PmstError> {
        if node.index() < self.adjacency.len() {
            Ok(())
        } else {
            Err(PmstError::Graph(
                ErrorInfo::new("unknown-node", "node is out of range")
                    .with_context("node", node.as_raw())
                    .with_context("node_count", self.adjacency.len()),
            ))
        }
    }
}

fn unknown_edge(id: EdgeId) -> PmstError {
    PmstError::Graph(ErrorInfo::new("unknown-edge", "edge does not exist").with_context("edge", id))
}
