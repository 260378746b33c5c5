use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::{CostVector, EdgeId};
use serde::{Deserialize, Serialize};

use crate::archive::PermanentArchive;
use crate::config::Algorithm;

/// Counters of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunStats {
    /// Number of Pareto-optimal cost points found.
    pub solutions: usize,
    /// Popped labels admitted by their state's front and expanded. Pops at the target state and
    /// rejected pops are not counted.
    pub extractions: u64,
    /// Labels entering the queue, by push or decrease-key.
    pub insertions: u64,
    /// Waiting-bucket entries inspected while refilling active labels.
    pub refill_iterations: u64,
    /// States materialized in the state table.
    pub materialized_states: usize,
    /// Unpruned cut edges summed over materialized states.
    pub active_cut_edges: u64,
    /// Wall-clock time of the search loop.
    pub elapsed_secs: f64,
}

/// One Pareto-optimal cost point and where its tree is archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution<const D: usize> {
    /// Tree cost in the searched graph.
    pub cost: CostVector<D>,
    /// Archive index of the final label.
    pub archive_index: usize,
}

/// Result record of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome<const D: usize> {
    algorithm: Algorithm,
    stats: RunStats,
    solutions: Vec<Solution<D>>,
    archive: PermanentArchive,
}

impl<const D: usize> SearchOutcome<D> {
    pub(crate) fn new(
        algorithm: Algorithm,
        stats: RunStats,
        solutions: Vec<Solution<D>>,
        archive: PermanentArchive,
    ) -> Self {
        Self {
            algorithm,
            stats,
            solutions,
            archive,
        }
    }

    /// Formulation that produced the outcome.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Run counters.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Solutions in extraction order, which is lexicographic in cost.
    pub fn solutions(&self) -> &[Solution<D>] {
        &self.solutions
    }

    /// Number of solutions.
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    /// Solution costs, sorted lexicographically.
    pub fn sorted_costs(&self) -> Vec<CostVector<D>> {
        let mut costs: Vec<_> = self.solutions.iter().map(|s| s.cost).collect();
        costs.sort_unstable();
        costs
    }

    /// Archive backing tree reconstruction.
    pub fn archive(&self) -> &PermanentArchive {
        &self.archive
    }

    /// Edges of solution `index`, sorted by id.
    pub fn tree(&self, index: usize) -> Result<Vec<EdgeId>, PmstError> {
        let solution = self.solutions.get(index).ok_or_else(|| {
            PmstError::Search(
                ErrorInfo::new("unknown-solution", "solution index out of range")
                    .with_context("index", index)
                    .with_context("solutions", self.solutions.len()),
            )
        })?;
        let mut edges = self.archive.walk(solution.archive_index)?;
        edges.sort_unstable();
        Ok(edges)
    }
}
