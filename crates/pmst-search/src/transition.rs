//! Implicit search states of the primary formulation.

use std::collections::VecDeque;

use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::{CostVector, EdgeId, NodeId};
use pmst_graph::Graph;

use crate::front::TruncatedFront;
use crate::pool::{narrow_index, LabelHandle};
use crate::subset::NodeSubset;

/// An edge leaving a state's subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutEdge<const D: usize> {
    /// Edge identifier in the searched graph.
    pub edge: EdgeId,
    /// Endpoint outside the subset.
    pub far: NodeId,
    /// Edge cost.
    pub cost: CostVector<D>,
    /// An earlier cut edge dominates this one; the state does not expand along it.
    pub chen_pruned: bool,
    /// A dominating cut edge reaches the same node; no descendant state inherits this one.
    pub cut_exit_pruned: bool,
    /// Waiting bucket of the successor reserved for labels produced along this edge.
    pub incoming: Option<u32>,
}

impl<const D: usize> CutEdge<D> {
    fn fresh(edge: EdgeId, far: NodeId, cost: CostVector<D>) -> Self {
        Self {
            edge,
            far,
            cost,
            chen_pruned: false,
            cut_exit_pruned: false,
            incoming: None,
        }
    }
}

/// A node subset together with its pruned cut, its active label and its waiting buckets.
#[derive(Debug)]
pub struct TransitionNode<const D: usize> {
    subset: NodeSubset,
    cut_edges: Vec<CutEdge<D>>,
    active: Option<LabelHandle>,
    buckets: Vec<VecDeque<LabelHandle>>,
    front: TruncatedFront<D>,
}

impl<const D: usize> TransitionNode<D> {
    /// The state `{0}`, built from the root's non-red adjacency.
    pub fn root(graph: &Graph<D>) -> Result<Self, PmstError> {
        let subset = NodeSubset::root(graph.node_count());
        let mut cut_edges = Vec::new();
        for arc in graph.adjacency(NodeId::ROOT) {
            let edge = graph.edge(arc.edge)?;
            if !edge.is_red() {
                cut_edges.push(CutEdge::fresh(arc.edge, arc.far, *edge.cost()));
            }
        }
        Ok(Self::with_cut(subset, cut_edges))
    }

    /// The state reached by adding `new_node`, whose cut is derived from this one's.
    pub fn successor(&self, new_node: NodeId, graph: &Graph<D>) -> Result<Self, PmstError> {
        let subset = self.subset.with(new_node);
        let mut cut_edges: Vec<CutEdge<D>> = self
            .cut_edges
            .iter()
            .filter(|cut| !cut.cut_exit_pruned && cut.far != new_node)
            .map(|cut| CutEdge {
                chen_pruned: false,
                incoming: None,
                ..*cut
            })
            .collect();
        for arc in graph.adjacency(new_node) {
            if subset.contains(arc.far) {
                continue;
            }
            let edge = graph.edge(arc.edge)?;
            if !edge.is_red() {
                cut_edges.push(CutEdge::fresh(arc.edge, arc.far, *edge.cost()));
            }
        }
        Ok(Self::with_cut(subset, cut_edges))
    }

    fn with_cut(subset: NodeSubset, mut cut_edges: Vec<CutEdge<D>>) -> Self {
        cut_edges.sort_by(|a, b| a.cost.cmp(&b.cost));
        chen_prune(&mut cut_edges);
        Self {
            subset,
            cut_edges,
            active: None,
            buckets: Vec::new(),
            front: TruncatedFront::new(),
        }
    }

    /// Node subset of the state.
    pub fn subset(&self) -> &NodeSubset {
        &self.subset
    }

    /// Canonical index.
    pub fn index(&self) -> usize {
        self.subset.index()
    }

    /// Cut edges sorted lexicographically by cost.
    pub fn cut_edges(&self) -> &[CutEdge<D>] {
        &self.cut_edges
    }

    /// Number of cut edges the state expands along.
    pub fn active_cut_edges(&self) -> usize {
        self.cut_edges.iter().filter(|cut| !cut.chen_pruned).count()
    }

    /// Bucket reserved for cut edge `position`, assigned on first use.
    pub(crate) fn set_incoming(&mut self, position: usize, bucket: u32) {
        if let Some(cut) = self.cut_edges.get_mut(position) {
            cut.incoming = Some(bucket);
        }
    }

    /// Label currently resident in the queue on behalf of this state.
    pub fn active(&self) -> Option<LabelHandle> {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: Option<LabelHandle>) {
        self.active = active;
    }

    /// Opens a new waiting bucket and returns its index.
    pub(crate) fn add_bucket(&mut self) -> Result<u32, PmstError> {
        let bucket = narrow_index(self.buckets.len(), "bucket-capacity")?;
        self.buckets.push(VecDeque::new());
        Ok(bucket)
    }

    /// Number of waiting buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn bucket_mut(
        &mut self,
        bucket: u32,
    ) -> Result<&mut VecDeque<LabelHandle>, PmstError> {
        let count = self.buckets.len();
        self.buckets.get_mut(bucket as usize).ok_or_else(|| {
            PmstError::Search(
                ErrorInfo::new("bucket-out-of-range", "waiting bucket does not exist")
                    .with_context("bucket", bucket)
                    .with_context("buckets", count),
            )
        })
    }

    /// Dominance filter of labels already extracted at this state.
    pub fn front(&self) -> &TruncatedFront<D> {
        &self.front
    }

    pub(crate) fn front_mut(&mut self) -> &mut TruncatedFront<D> {
        &mut self.front
    }

    /// Splits the borrow for the refill scan.
    pub(crate) fn buckets_and_front(
        &mut self,
    ) -> (&mut [VecDeque<LabelHandle>], &TruncatedFront<D>) {
        (&mut self.buckets, &self.front)
    }
}

/// Marks every edge dominated by an earlier (cheaper) one; when both lead to the same node the
/// dominated edge is also withheld from descendants.
fn chen_prune<const D: usize>(cut_edges: &mut [CutEdge<D>]) {
    for i in 1..cut_edges.len() {
        let (before, rest) = cut_edges.split_at_mut(i);
        let current = &mut rest[0];
        if let Some(dominating) = before.iter().find(|f| f.cost.dominates(&current.cost)) {
            current.chen_pruned = true;
            if dominating.far == current.far {
                current.cut_exit_pruned = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u32) -> NodeId {
        NodeId::from_raw(raw)
    }

    #[test]
    fn cut_is_sorted_and_chen_pruned() {
        let mut graph = Graph::<2>::new(3);
        graph.add_edge(n(0), n(1), CostVector::new([5, 5])).unwrap();
        let cheap = graph.add_edge(n(0), n(1), CostVector::new([1, 1])).unwrap();
        let other = graph.add_edge(n(0), n(2), CostVector::new([3, 9])).unwrap();
        let root = TransitionNode::root(&graph).unwrap();
        let cut = root.cut_edges();
        assert_eq!(cut[0].edge, cheap);
        assert_eq!(cut[1].edge, other);
        assert!(cut[1].chen_pruned);
        assert!(!cut[1].cut_exit_pruned);
        assert!(cut[2].chen_pruned && cut[2].cut_exit_pruned);
        assert_eq!(root.active_cut_edges(), 1);
    }

    #[test]
    fn successor_inherits_and_resets_flags() {
        let mut graph = Graph::<2>::new(3);
        graph.add_edge(n(0), n(1), CostVector::new([1, 1])).unwrap();
        let to_two = graph.add_edge(n(0), n(2), CostVector::new([3, 9])).unwrap();
        let via_one = graph.add_edge(n(1), n(2), CostVector::new([9, 3])).unwrap();
        let root = TransitionNode::root(&graph).unwrap();
        assert!(root.cut_edges()[1].chen_pruned);

        let next = root.successor(n(1), &graph).unwrap();
        assert_eq!(next.index(), 1);
        assert_eq!(next.subset().len(), 2);
        let edges: Vec<_> = next.cut_edges().iter().map(|c| c.edge).collect();
        assert_eq!(edges, vec![to_two, via_one]);
        assert!(next.cut_edges().iter().all(|c| !c.chen_pruned));
        assert!(next.cut_edges().iter().all(|c| c.far == n(2)));
    }
}
