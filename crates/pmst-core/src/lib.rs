#![deny(missing_docs)]
//! Core value types for the Pareto-optimal spanning tree engine: cost vectors, identifiers, errors
//! and deterministic randomness.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod cost;
pub mod errors;
pub mod provenance;
pub mod rng;

pub use cost::{CostType, CostVector};
pub use errors::{ErrorInfo, PmstError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle, SeedOrigin};

/// Identifier for a node of an undirected cost graph. Node `0` is the root of every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node every spanning tree is grown from.
    pub const ROOT: NodeId = NodeId(0);

    /// Node number `raw`.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Node number.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Position in per-node arrays such as the adjacency lists.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Identifier for an undirected edge, i.e. its position in the graph's edge vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Edge number `raw`.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Edge number.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Position in the graph's edge vector.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}
