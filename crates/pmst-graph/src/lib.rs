#![deny(missing_docs)]

//! Undirected multi-criteria cost graphs: construction, deterministic generators, serialization,
//! canonical hashing, red/blue edge classification and blue-component contraction.

mod compact;
mod generators;
mod graph;
mod hash;
mod ids;
mod preprocess;
mod serialization;

pub use compact::CompactGraph;
pub use generators::{gen_complete, gen_random_connected, path_graph};
pub use graph::{Arc, Edge, Graph};
pub use hash::canonical_hash;
pub use preprocess::{find_blue_edges, find_red_edges, preprocess, PreprocessReport};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, json_dims, GRAPH_SCHEMA,
};
