use bit_set::BitSet;
use pmst_core::NodeId;

/// Set of tree nodes, always containing node `0`.
///
/// The canonical index drops the always-set bit 0: node `i >= 1` contributes `1 << (i - 1)`, so
/// the subsets of an `n`-node graph map onto `0..2^(n-1)` and the full subset maps to
/// `2^(n-1) - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSubset {
    nodes: BitSet,
    index: usize,
    len: usize,
}

impl NodeSubset {
    /// The subset `{0}` with canonical index 0.
    pub fn root(node_count: usize) -> Self {
        let mut nodes = BitSet::with_capacity(node_count);
        nodes.insert(0);
        Self {
            nodes,
            index: 0,
            len: 1,
        }
    }

    /// Canonical index of `self ∪ {node}` without building it. `node` must not be `0`.
    pub fn index_with(&self, node: NodeId) -> usize {
        debug_assert!(node.index() >= 1);
        self.index | (1usize << (node.index() - 1))
    }

    /// The subset extended by `node`.
    pub fn with(&self, node: NodeId) -> Self {
        debug_assert!(!self.contains(node));
        let mut nodes = self.nodes.clone();
        nodes.insert(node.index());
        Self {
            nodes,
            index: self.index_with(node),
            len: self.len + 1,
        }
    }

    /// Whether `node` belongs to the subset.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(node.index())
    }

    /// Canonical index into the state table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cardinality.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true; a subset always holds the root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|idx| NodeId::from_raw(idx as u32))
    }
}
