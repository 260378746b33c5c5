use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::provenance::SchemaVersion;
use pmst_core::{CostType, CostVector, NodeId};
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Layout version stamped on graphs written by this crate.
pub const GRAPH_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Encodes `graph` with bincode. Edge flags are not stored.
pub fn graph_to_bytes<const D: usize>(graph: &Graph<D>) -> Result<Vec<u8>, PmstError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| PmstError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Decodes a bincode graph, checking schema and `dims` against `D`.
pub fn graph_from_bytes<const D: usize>(bytes: &[u8]) -> Result<Graph<D>, PmstError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| PmstError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Pretty-printed JSON: `{schema_version, dims, nodes, edges: [{u, v, cost}]}`.
pub fn graph_to_json<const D: usize>(graph: &Graph<D>) -> Result<String, PmstError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| PmstError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Parses a JSON graph, checking schema and `dims` against `D`.
pub fn graph_from_json<const D: usize>(json: &str) -> Result<Graph<D>, PmstError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| PmstError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

/// Reads only the `dims` field of a JSON graph so callers can pick the matching `D`.
pub fn json_dims(json: &str) -> Result<usize, PmstError> {
    #[derive(Deserialize)]
    struct Header {
        dims: usize,
    }
    let header: Header = serde_json::from_str(json)
        .map_err(|err| PmstError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    Ok(header.dims)
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    schema_version: SchemaVersion,
    dims: usize,
    nodes: usize,
    edges: Vec<SerializableEdge>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEdge {
    u: u32,
    v: u32,
    cost: Vec<CostType>,
    #[serde(default)]
    red: bool,
    #[serde(default)]
    blue: bool,
}

impl SerializableGraph {
    fn from_graph<const D: usize>(graph: &Graph<D>) -> Self {
        let edges = graph
            .edges()
            .map(|(_, edge)| SerializableEdge {
                u: edge.u().as_raw(),
                v: edge.v().as_raw(),
                cost: edge.cost().components().to_vec(),
                red: edge.is_red(),
                blue: edge.is_blue(),
            })
            .collect();
        Self {
            schema_version: GRAPH_SCHEMA,
            dims: D,
            nodes: graph.node_count(),
            edges,
        }
    }

    fn into_graph<const D: usize>(self) -> Result<Graph<D>, PmstError> {
        if !GRAPH_SCHEMA.is_compatible_with(&self.schema_version) {
            return Err(PmstError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported graph schema version")
                    .with_context("found", self.schema_version.major)
                    .with_context("expected", GRAPH_SCHEMA.major),
            ));
        }
        if self.dims != D {
            return Err(dimension_mismatch(self.dims, D));
        }
        let mut graph = Graph::new(self.nodes);
        for edge in self.edges {
            let components: [CostType; D] = edge
                .cost
                .as_slice()
                .try_into()
                .map_err(|_| dimension_mismatch(edge.cost.len(), D))?;
            let id = graph.add_edge(
                NodeId::from_raw(edge.u),
                NodeId::from_raw(edge.v),
                CostVector::new(components),
            )?;
            if edge.red {
                graph.mark_red(id)?;
            }
            if edge.blue {
                graph.mark_blue(id)?;
            }
        }
        Ok(graph)
    }
}

fn dimension_mismatch(found: usize, expected: usize) -> PmstError {
    PmstError::Graph(
        ErrorInfo::new("dimension-mismatch", "cost dimension does not match")
            .with_context("found", found)
            .with_context("expected", expected),
    )
}
