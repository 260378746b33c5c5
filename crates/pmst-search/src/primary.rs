//! Best-first search keeping one queued label per state.
//!
//! Every state owns at most one heap-resident label. Later candidates for an already queued state
//! wait in a bucket keyed by the cut edge that produced them; when the queued label is extracted
//! the buckets are scanned in creation order and the lexicographically smallest non-dominated
//! front entry takes its place.

use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::CostVector;
use pmst_graph::Graph;
use tracing::info;

use crate::archive::PermanentArchive;
use crate::config::{Algorithm, SearchConfig};
use crate::context::RunContext;
use crate::heap::IndexedHeap;
use crate::pool::{Label, LabelHandle, LabelPool, Owner};
use crate::solution::{SearchOutcome, Solution};
use crate::table::StateTable;
use crate::transition::TransitionNode;

/// Per-label data of the primary formulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arrival {
    /// Waiting bucket of the owning state this label returns to when displaced.
    pub bucket: u32,
    /// Already compared against the state's front while at the head of its bucket.
    pub front_checked: bool,
}

/// The primary search over a borrowed graph. Runs exactly once.
#[derive(Debug)]
pub struct PrimarySearch<'g, const D: usize> {
    graph: &'g Graph<D>,
    config: SearchConfig<D>,
    table: StateTable<TransitionNode<D>>,
    pool: LabelPool<D, Arrival>,
    heap: IndexedHeap<LabelHandle>,
    archive: PermanentArchive,
    solutions: Vec<Solution<D>>,
}

impl<'g, const D: usize> PrimarySearch<'g, D> {
    /// Validates `config` and sizes the state table for `graph`.
    pub fn new(graph: &'g Graph<D>, config: &SearchConfig<D>) -> Result<Self, PmstError> {
        config.validate()?;
        let table = StateTable::for_nodes(graph.node_count(), config.max_nodes)?;
        Ok(Self {
            graph,
            config: config.clone(),
            table,
            pool: LabelPool::new(),
            heap: IndexedHeap::new(),
            archive: PermanentArchive::new(),
            solutions: Vec::new(),
        })
    }

    /// Runs the search to exhaustion.
    pub fn run(mut self) -> Result<SearchOutcome<D>, PmstError> {
        let mut ctx = RunContext::start(Algorithm::Primary, self.config.progress_interval);
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            states = self.table.len(),
            "primary search started"
        );

        let root = TransitionNode::root(self.graph)?;
        ctx.active_cut_edges += root.active_cut_edges() as u64;
        self.table.install(0, root)?;
        let handle = self
            .pool
            .allocate(Label::root(Arrival::default()), Owner::Extracted)?;
        self.heap.push(handle, &mut self.pool);
        ctx.insertions += 1;
        self.table.get_mut(0)?.set_active(Some(handle));

        let target = self.table.target();
        while let Some(min) = self.heap.pop(&mut self.pool) {
            self.pool.set_owner(min, Owner::Extracted)?;
            let (cost, state, pred, edge) = {
                let label = self.pool.get(min)?;
                (label.cost, label.state, label.pred, label.edge)
            };

            let admitted = self.table.get_mut(state)?.front_mut().insert(&cost);
            self.refill(state, &cost, &mut ctx)?;
            if !admitted {
                self.pool.release(min)?;
                continue;
            }

            if state == target {
                let archive_index = self.archive.push(pred, edge);
                self.solutions.push(Solution {
                    cost,
                    archive_index,
                });
                self.pool.release(min)?;
                continue;
            }

            ctx.record_extraction(self.heap.len(), self.pool.live());
            let pred_index = self.archive.next_index();
            if self.propagate(state, &cost, pred_index, &mut ctx)? {
                let stored = self.archive.push(pred, edge);
                debug_assert_eq!(stored, pred_index);
            }
            self.pool.release(min)?;
        }

        let stats = ctx.finish(self.solutions.len(), self.table.built());
        info!(
            solutions = stats.solutions,
            extractions = stats.extractions,
            insertions = stats.insertions,
            states = stats.materialized_states,
            elapsed = stats.elapsed_secs,
            "primary search finished"
        );
        Ok(SearchOutcome::new(
            Algorithm::Primary,
            stats,
            self.solutions,
            self.archive,
        ))
    }

    /// Promotes the best surviving waiting label of `state` after its active label was popped
    /// with cost `min_cost`. Waiting labels dominated by `min_cost`, by the front or by the chosen
    /// label are released on the way.
    fn refill(
        &mut self,
        state: usize,
        min_cost: &CostVector<D>,
        ctx: &mut RunContext,
    ) -> Result<(), PmstError> {
        let node = self.table.get_mut(state)?;
        node.set_active(None);
        let (buckets, front) = node.buckets_and_front();
        let mut best: Option<(LabelHandle, usize, CostVector<D>)> = None;

        for (position, bucket) in buckets.iter_mut().enumerate() {
            while let Some(&candidate) = bucket.front() {
                ctx.refill_iterations += 1;
                let (cost, checked) = {
                    let label = self.pool.get(candidate)?;
                    (label.cost, label.extra.front_checked)
                };
                if let Some((_, _, best_cost)) = best {
                    if !cost.lex_less(&best_cost) {
                        if best_cost.dominates(&cost) || min_cost.dominates(&cost) {
                            bucket.pop_front();
                            self.pool.release(candidate)?;
                        }
                        break;
                    }
                }
                if !min_cost.dominates(&cost) && (checked || !front.query(&cost)) {
                    self.pool.get_mut(candidate)?.extra.front_checked = true;
                    best = Some((candidate, position, cost));
                    break;
                }
                bucket.pop_front();
                self.pool.release(candidate)?;
            }
        }

        if let Some((handle, position, _)) = best {
            buckets[position].pop_front();
            self.heap.push(handle, &mut self.pool);
            ctx.insertions += 1;
            node.set_active(Some(handle));
        }
        Ok(())
    }

    /// Expands a popped label of `state` along every unpruned cut edge. Returns whether any
    /// successor label was kept.
    fn propagate(
        &mut self,
        state: usize,
        cost: &CostVector<D>,
        pred_index: usize,
        ctx: &mut RunContext,
    ) -> Result<bool, PmstError> {
        let mut success = false;
        let cut_len = self.table.get(state)?.cut_edges().len();
        for position in 0..cut_len {
            let cut = self.table.get(state)?.cut_edges()[position];
            if cut.chen_pruned {
                continue;
            }
            let candidate = cost.checked_add(&cut.cost).ok_or_else(|| {
                PmstError::Search(
                    ErrorInfo::new("cost-overflow", "tree cost exceeds the component range")
                        .with_context("cost", cost)
                        .with_context("edge", cut.edge),
                )
            })?;

            let next_index = self.table.get(state)?.subset().index_with(cut.far);
            if !self.table.is_built(next_index) {
                let successor = self.table.get(state)?.successor(cut.far, self.graph)?;
                ctx.active_cut_edges += successor.active_cut_edges() as u64;
                self.table.install(next_index, successor)?;
            }
            let bucket = match cut.incoming {
                Some(bucket) => bucket,
                None => {
                    let bucket = self.table.get_mut(next_index)?.add_bucket()?;
                    self.table.get_mut(state)?.set_incoming(position, bucket);
                    bucket
                }
            };
            debug_assert_eq!(
                self.table.get(next_index)?.subset().len(),
                self.table.get(state)?.subset().len() + 1
            );

            let next = self.table.get_mut(next_index)?;
            if next.front().query(&candidate) {
                continue;
            }
            if let Some(bound) = &self.config.dominance_bound {
                if bound.weakly_dominates(&candidate) {
                    continue;
                }
            }
            let label = Label::new(
                candidate,
                next_index,
                pred_index,
                Some(cut.edge),
                Arrival {
                    bucket,
                    front_checked: false,
                },
            );

            match next.active() {
                None => {
                    let handle = self.pool.allocate(label, Owner::Extracted)?;
                    self.heap.push(handle, &mut self.pool);
                    ctx.insertions += 1;
                    next.set_active(Some(handle));
                    success = true;
                }
                Some(active) => {
                    let active_cost = self.pool.cost(active)?;
                    if candidate.lex_less(&active_cost) {
                        let handle = self.pool.allocate(label, Owner::Extracted)?;
                        if !self.heap.decrease_key(active, handle, &mut self.pool) {
                            return Err(PmstError::invariant(
                                "inactive-label",
                                "active label of a state is not queued",
                            ));
                        }
                        let displaced = self.pool.get(active)?.extra.bucket;
                        self.pool
                            .set_owner(active, Owner::Waiting { bucket: displaced })?;
                        next.bucket_mut(displaced)?.push_front(active);
                        next.set_active(Some(handle));
                        ctx.insertions += 1;
                        success = true;
                    } else if !active_cost.dominates(&candidate) {
                        let handle = self.pool.allocate(label, Owner::Waiting { bucket })?;
                        next.bucket_mut(bucket)?.push_back(handle);
                        success = true;
                    }
                }
            }
        }
        Ok(success)
    }
}
