//! Label-setting search with per-state open lists and growth-order symmetry breaking.
//!
//! A partial tree remembers the order in which its nodes were added and which adjacency entry
//! produced its last edge. It may only grow along
//! 1. later entries of the same tail's adjacency (sorted by far node) whose far node exceeds
//!    the previous head, or
//! 2. any cut edge of a node added after that tail.
//!
//! Each state keeps its pending labels in an [`OpenList`](crate::open_list::OpenList); only the
//! head of that list sits in the priority queue.
//!
//! Partial trees over the same node set may differ in the extensions the growth order allows
//! them. Below the full set a label is therefore pruned only by a Pareto-dominating cost and
//! labels of equal cost all survive; equal costs collapse at the target state.

use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::{CostVector, EdgeId, NodeId};
use pmst_graph::Graph;
use tracing::info;

use crate::archive::PermanentArchive;
use crate::config::{Algorithm, SearchConfig};
use crate::context::RunContext;
use crate::front::Ties;
use crate::heap::IndexedHeap;
use crate::open_list::{Merge, OpenState};
use crate::pool::{Label, LabelHandle, LabelPool, Owner};
use crate::solution::{SearchOutcome, Solution};
use crate::subset::NodeSubset;
use crate::table::StateTable;

/// Growth-order data carried by every label of the alternative formulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Growth {
    /// Tree nodes in the order they were added; starts with the root.
    pub order: Vec<NodeId>,
    /// Position in `order` of the tail of the last edge.
    pub tail_rank: usize,
    /// Position of the last edge in the tail's sorted adjacency; `None` for the root.
    pub arc_pos: Option<usize>,
    /// Far endpoint of the last edge.
    pub last_head: NodeId,
}

impl Growth {
    fn root() -> Self {
        Self {
            order: vec![NodeId::ROOT],
            tail_rank: 0,
            arc_pos: None,
            last_head: NodeId::ROOT,
        }
    }
}

impl Default for Growth {
    fn default() -> Self {
        Self::root()
    }
}

#[derive(Debug, Clone, Copy)]
struct GrowthArc<const D: usize> {
    far: NodeId,
    edge: EdgeId,
    cost: CostVector<D>,
}

/// The alternative search over a borrowed graph. Runs exactly once.
#[derive(Debug)]
pub struct AlternativeSearch<'g, const D: usize> {
    graph: &'g Graph<D>,
    config: SearchConfig<D>,
    adjacency: Vec<Vec<GrowthArc<D>>>,
    table: StateTable<OpenState<D>>,
    pool: LabelPool<D, Growth>,
    heap: IndexedHeap<LabelHandle>,
    archive: PermanentArchive,
    solutions: Vec<Solution<D>>,
}

impl<'g, const D: usize> AlternativeSearch<'g, D> {
    /// Validates `config`, sizes the state table and sorts a private copy of the non-red
    /// adjacency by far node.
    pub fn new(graph: &'g Graph<D>, config: &SearchConfig<D>) -> Result<Self, PmstError> {
        config.validate()?;
        let table = StateTable::for_nodes(graph.node_count(), config.max_nodes)?;
        let mut adjacency = Vec::with_capacity(graph.node_count());
        for node in graph.nodes() {
            let mut arcs = Vec::new();
            for arc in graph.adjacency(node) {
                let edge = graph.edge(arc.edge)?;
                if !edge.is_red() {
                    arcs.push(GrowthArc {
                        far: arc.far,
                        edge: arc.edge,
                        cost: *edge.cost(),
                    });
                }
            }
            arcs.sort_by_key(|arc| (arc.far, arc.edge));
            adjacency.push(arcs);
        }
        Ok(Self {
            graph,
            config: config.clone(),
            adjacency,
            table,
            pool: LabelPool::new(),
            heap: IndexedHeap::new(),
            archive: PermanentArchive::new(),
            solutions: Vec::new(),
        })
    }

    /// Runs the search to exhaustion.
    pub fn run(mut self) -> Result<SearchOutcome<D>, PmstError> {
        let mut ctx = RunContext::start(Algorithm::Alternative, self.config.progress_interval);
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            states = self.table.len(),
            "alternative search started"
        );

        let target = self.table.target();
        let root_state = self
            .table
            .install(0, OpenState::new(NodeSubset::root(self.graph.node_count())))?;
        let handle = self.pool.allocate(Label::root(Growth::root()), Owner::Open)?;
        root_state
            .open
            .merge(handle, ties_at(0, target), &self.pool)?;
        self.heap.push(handle, &mut self.pool);
        ctx.insertions += 1;

        while let Some(min) = self.heap.pop(&mut self.pool) {
            self.pool.set_owner(min, Owner::Extracted)?;
            let (cost, state, pred, edge) = {
                let label = self.pool.get(min)?;
                (label.cost, label.state, label.pred, label.edge)
            };

            let ties = ties_at(state, target);
            let node = self.table.get_mut(state)?;
            if node.open.pop_head() != Some(min) {
                return Err(PmstError::invariant(
                    "open-head",
                    "extracted label is not the head of its open list",
                ));
            }
            let admitted = node.front.insert_with(&cost, ties);
            if admitted {
                for dominated in node.open.clean(&cost, ties, &self.pool)? {
                    self.pool.release(dominated)?;
                }
            }
            if let Some(head) = node.open.head() {
                self.heap.push(head, &mut self.pool);
                ctx.insertions += 1;
            }
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
            if self.expand(min, pred_index, &mut ctx)? {
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
            "alternative search finished"
        );
        Ok(SearchOutcome::new(
            Algorithm::Alternative,
            stats,
            self.solutions,
            self.archive,
        ))
    }

    /// Generates the canonical successors of the extracted label `min`.
    fn expand(
        &mut self,
        min: LabelHandle,
        pred_index: usize,
        ctx: &mut RunContext,
    ) -> Result<bool, PmstError> {
        let (cost, state, growth) = {
            let label = self.pool.get_mut(min)?;
            (label.cost, label.state, std::mem::take(&mut label.extra))
        };
        let subset = self.table.get(state)?.subset.clone();
        let mut success = false;

        let tail = growth.order.get(growth.tail_rank).copied().ok_or_else(|| {
            PmstError::invariant("growth-order", "tail rank lies outside the growth order")
        })?;
        let first = growth.arc_pos.map_or(0, |pos| pos + 1);
        for pos in first..self.adjacency[tail.index()].len() {
            let arc = self.adjacency[tail.index()][pos];
            if subset.contains(arc.far) || arc.far <= growth.last_head {
                continue;
            }
            let rank = growth.tail_rank;
            success |= self.offer(&cost, &subset, &growth, rank, pos, arc, pred_index, ctx)?;
        }

        for rank in (growth.tail_rank + 1)..growth.order.len() {
            let node = growth.order[rank];
            for pos in 0..self.adjacency[node.index()].len() {
                let arc = self.adjacency[node.index()][pos];
                if subset.contains(arc.far) {
                    continue;
                }
                success |= self.offer(&cost, &subset, &growth, rank, pos, arc, pred_index, ctx)?;
            }
        }
        Ok(success)
    }

    /// Builds the label obtained by growing along `arc` and merges it into the successor's open
    /// list. Returns whether it was kept.
    #[allow(clippy::too_many_arguments)]
    fn offer(
        &mut self,
        cost: &CostVector<D>,
        subset: &NodeSubset,
        growth: &Growth,
        tail_rank: usize,
        arc_pos: usize,
        arc: GrowthArc<D>,
        pred_index: usize,
        ctx: &mut RunContext,
    ) -> Result<bool, PmstError> {
        let candidate = cost.checked_add(&arc.cost).ok_or_else(|| {
            PmstError::Search(
                ErrorInfo::new("cost-overflow", "tree cost exceeds the component range")
                    .with_context("cost", cost)
                    .with_context("edge", arc.edge),
            )
        })?;
        let next_index = subset.index_with(arc.far);
        if !self.table.is_built(next_index) {
            self.table
                .install(next_index, OpenState::new(subset.with(arc.far)))?;
        }
        let ties = ties_at(next_index, self.table.target());
        let next = self.table.get_mut(next_index)?;
        debug_assert_eq!(next.subset.len(), subset.len() + 1);
        if next.front.query_with(&candidate, ties) {
            return Ok(false);
        }
        if let Some(bound) = &self.config.dominance_bound {
            if bound.weakly_dominates(&candidate) {
                return Ok(false);
            }
        }

        let mut order = Vec::with_capacity(growth.order.len() + 1);
        order.extend_from_slice(&growth.order);
        order.push(arc.far);
        let label = Label::new(
            candidate,
            next_index,
            pred_index,
            Some(arc.edge),
            Growth {
                order,
                tail_rank,
                arc_pos: Some(arc_pos),
                last_head: arc.far,
            },
        );
        let handle = self.pool.allocate(label, Owner::Open)?;
        let previous_head = next.open.head();
        match next.open.merge(handle, ties, &self.pool)? {
            Merge::Rejected => {
                self.pool.release(handle)?;
                Ok(false)
            }
            Merge::Inserted { at_head, displaced } => {
                if at_head {
                    match previous_head {
                        Some(old) => {
                            if !self.heap.decrease_key(old, handle, &mut self.pool) {
                                return Err(PmstError::invariant(
                                    "open-head",
                                    "head of an open list is not queued",
                                ));
                            }
                            if !displaced.contains(&old) {
                                self.pool.set_owner(old, Owner::Open)?;
                            }
                        }
                        None => self.heap.push(handle, &mut self.pool),
                    }
                    ctx.insertions += 1;
                }
                for dominated in displaced {
                    self.pool.release(dominated)?;
                }
                Ok(true)
            }
        }
    }
}

fn ties_at(state: usize, target: usize) -> Ties {
    if state == target {
        Ties::Collapse
    } else {
        Ties::Keep
    }
}
