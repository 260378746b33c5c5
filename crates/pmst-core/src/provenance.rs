//! Provenance and schema descriptors attached to serialized graphs and reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the graph file layout. Readers accept any payload with the same `major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when a field is removed or changes meaning.
    pub major: u32,
    /// Bumped when an optional field is added.
    pub minor: u32,
    /// Bumped for clarifications with no layout change.
    pub patch: u32,
}

impl SchemaVersion {
    /// `major.minor.patch`.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Whether a graph written under `other` can be loaded by a reader of `self`.
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Inputs and settings that reproduce a search report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Canonical hash of the graph handed to the preprocessing step.
    pub graph_hash: String,
    /// Hash of the run configuration.
    pub config_hash: String,
    /// Name of the search formulation that produced the report.
    pub algorithm: String,
    /// Number of cost dimensions.
    pub dims: usize,
    /// Master seed, when the input graph was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Crate versions that produced the report, keyed by crate name.
    pub tool_versions: BTreeMap<String, String>,
}
