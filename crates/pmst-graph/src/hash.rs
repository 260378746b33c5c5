use sha2::{Digest, Sha256};

use crate::graph::Graph;
use crate::ids::ordered;

/// Computes the canonical structural hash for the provided graph.
///
/// The hash covers the dimension, the node count and the multiset of edges (sorted endpoints plus
/// cost). Edge insertion order and preprocessing flags do not contribute.
pub fn canonical_hash<const D: usize>(graph: &Graph<D>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"pmst-graph");
    hasher.update((D as u64).to_le_bytes());
    hasher.update((graph.node_count() as u64).to_le_bytes());

    let mut signatures: Vec<(u32, u32, [u32; D])> = graph
        .edges()
        .map(|(_, edge)| {
            let (a, b) = ordered(edge.u(), edge.v());
            (a.as_raw(), b.as_raw(), *edge.cost().components())
        })
        .collect();
    signatures.sort_unstable();
    hasher.update((signatures.len() as u64).to_le_bytes());
    for (a, b, cost) in signatures {
        hasher.update(a.to_le_bytes());
        hasher.update(b.to_le_bytes());
        for component in cost {
            hasher.update(component.to_le_bytes());
        }
    }

    format!("{:x}", hasher.finalize())
}
