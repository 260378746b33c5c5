#![deny(missing_docs)]

//! Exact label-setting search for the complete Pareto front of spanning trees.

/// Alternative formulation with per-state open lists.
pub mod alternative;
/// Append-only archive of persisted labels.
pub mod archive;
/// YAML configuration schema and defaults.
pub mod config;
/// Per-run counters and progress logging.
pub mod context;
/// Truncated per-state dominance filter.
pub mod front;
/// Indexed binary heap with decrease-key.
pub mod heap;
/// Sorted open lists of the alternative formulation.
pub mod open_list;
/// Label arena.
pub mod pool;
/// Primary formulation with waiting buckets.
pub mod primary;
/// Result records and tree reconstruction.
pub mod solution;
/// Node subsets and their canonical index.
pub mod subset;
/// Lazily populated state table.
pub mod table;
/// Primary states and cut-edge pruning.
pub mod transition;

use pmst_core::errors::PmstError;
use pmst_graph::Graph;

pub use alternative::AlternativeSearch;
pub use config::{Algorithm, RunConfig, SearchConfig, SeedPolicy};
pub use primary::PrimarySearch;
pub use solution::{RunStats, SearchOutcome, Solution};

/// Runs the formulation selected by `config.algorithm` on `graph`.
pub fn solve<const D: usize>(
    graph: &Graph<D>,
    config: &SearchConfig<D>,
) -> Result<SearchOutcome<D>, PmstError> {
    match config.algorithm {
        Algorithm::Primary => PrimarySearch::new(graph, config)?.run(),
        Algorithm::Alternative => AlternativeSearch::new(graph, config)?.run(),
    }
}
