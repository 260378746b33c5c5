use std::time::Instant;

use tracing::debug;

use crate::config::Algorithm;
use crate::solution::RunStats;

/// Mutable per-run counters threaded through a search.
#[derive(Debug)]
pub struct RunContext {
    algorithm: Algorithm,
    started: Instant,
    progress_interval: u64,
    pub(crate) extractions: u64,
    pub(crate) insertions: u64,
    pub(crate) refill_iterations: u64,
    pub(crate) active_cut_edges: u64,
}

impl RunContext {
    pub(crate) fn start(algorithm: Algorithm, progress_interval: u64) -> Self {
        Self {
            algorithm,
            started: Instant::now(),
            progress_interval,
            extractions: 0,
            insertions: 0,
            refill_iterations: 0,
            active_cut_edges: 0,
        }
    }

    /// Counts one extraction and emits a progress line every `progress_interval` of them.
    pub(crate) fn record_extraction(&mut self, queued: usize, live_labels: usize) {
        self.extractions += 1;
        if self.progress_interval > 0 && self.extractions % self.progress_interval == 0 {
            debug!(
                algorithm = %self.algorithm,
                extractions = self.extractions,
                queued,
                live_labels,
                elapsed = self.started.elapsed().as_secs_f64(),
                "search progress"
            );
        }
    }

    pub(crate) fn finish(self, solutions: usize, materialized_states: usize) -> RunStats {
        RunStats {
            solutions,
            extractions: self.extractions,
            insertions: self.insertions,
            refill_iterations: self.refill_iterations,
            materialized_states,
            active_cut_edges: self.active_cut_edges,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        }
    }
}
