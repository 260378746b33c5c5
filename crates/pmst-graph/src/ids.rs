use pmst_core::{EdgeId, NodeId};

/// Creates a [`NodeId`] from an index into per-node arrays.
pub(crate) fn make_node(index: usize) -> NodeId {
    NodeId::from_raw(index as u32)
}

/// Creates an [`EdgeId`] from an index into the edge vector.
pub(crate) fn make_edge(index: usize) -> EdgeId {
    EdgeId::from_raw(index as u32)
}

/// Returns `(min, max)` so undirected endpoints compare canonically.
pub(crate) fn ordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
