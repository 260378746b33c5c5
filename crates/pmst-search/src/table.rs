//! Pre-sized table of lazily built search states.

use pmst_core::errors::{ErrorInfo, PmstError};
use tracing::debug;

/// One slot of the state table.
#[derive(Debug)]
pub enum StateSlot<T> {
    /// Never reached.
    Vacant,
    /// Materialized state; never dropped or moved while the search runs.
    Built(Box<T>),
}

/// Arena of `2^(n-1)` state slots addressed by canonical subset index.
#[derive(Debug)]
pub struct StateTable<T> {
    slots: Vec<StateSlot<T>>,
    built: usize,
}

impl<T> StateTable<T> {
    /// Sizes the table for a graph with `node_count` nodes.
    pub fn for_nodes(node_count: usize, max_nodes: usize) -> Result<Self, PmstError> {
        if node_count == 0 {
            return Err(PmstError::Graph(ErrorInfo::new(
                "empty-graph",
                "the search needs at least the root node",
            )));
        }
        if node_count > max_nodes {
            return Err(PmstError::Capacity(
                ErrorInfo::new("max-nodes", "graph exceeds the configured node limit")
                    .with_context("nodes", node_count)
                    .with_context("max_nodes", max_nodes)
                    .with_hint("preprocess and contract the graph or raise search.max_nodes"),
            ));
        }
        let size = u32::try_from(node_count - 1)
            .ok()
            .and_then(|shift| 1usize.checked_shl(shift))
            .ok_or_else(|| {
                PmstError::Capacity(
                    ErrorInfo::new("state-index-overflow", "2^(n-1) does not fit in usize")
                        .with_context("nodes", node_count),
                )
            })?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(size).map_err(|err| {
            PmstError::Capacity(
                ErrorInfo::new("state-table-alloc", err.to_string()).with_context("slots", size),
            )
        })?;
        slots.resize_with(size, || StateSlot::Vacant);
        debug!(nodes = node_count, slots = size, "state table sized");
        Ok(Self { slots, built: 0 })
    }

    /// Number of slots, `2^(n-1)`.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table has no slots; never true for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Canonical index of the full subset.
    pub fn target(&self) -> usize {
        self.slots.len() - 1
    }

    /// Number of materialized states.
    pub fn built(&self) -> usize {
        self.built
    }

    /// Whether the state at `index` exists.
    pub fn is_built(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(StateSlot::Built(_)))
    }

    /// Borrows a materialized state.
    pub fn get(&self, index: usize) -> Result<&T, PmstError> {
        match self.slots.get(index) {
            Some(StateSlot::Built(state)) => Ok(state),
            _ => Err(missing(index)),
        }
    }

    /// Mutably borrows a materialized state.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, PmstError> {
        match self.slots.get_mut(index) {
            Some(StateSlot::Built(state)) => Ok(state),
            _ => Err(missing(index)),
        }
    }

    /// Materializes the state at `index`. Fails if the slot is out of range or already built.
    pub fn install(&mut self, index: usize, state: T) -> Result<&mut T, PmstError> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or_else(|| missing(index))?;
        if matches!(slot, StateSlot::Built(_)) {
            return Err(PmstError::invariant(
                "state-rebuilt",
                format!("state {index} of {len} was already materialized"),
            ));
        }
        *slot = StateSlot::Built(Box::new(state));
        self.built += 1;
        match slot {
            StateSlot::Built(state) => Ok(state),
            StateSlot::Vacant => Err(missing(index)),
        }
    }
}

fn missing(index: usize) -> PmstError {
    PmstError::Search(
        ErrorInfo::new("missing-state", "state slot is vacant or out of range")
            .with_context("index", index),
    )
}
