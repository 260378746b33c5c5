//! Per-state sorted lists of pending labels for the alternative formulation.

use pmst_core::errors::PmstError;
use pmst_core::CostVector;

use crate::front::{Ties, TruncatedFront};
use crate::pool::{LabelHandle, LabelPool};
use crate::subset::NodeSubset;

/// Result of [`OpenList::merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Merge {
    /// An entry already prunes the label; the list is unchanged.
    Rejected,
    /// The label was inserted.
    Inserted {
        /// It became the new head.
        at_head: bool,
        /// Entries it prunes, removed from the list and still owned by the caller.
        displaced: Vec<LabelHandle>,
    },
}

/// Pending labels of one state in lexicographic cost order. No entry prunes another under the
/// policy they were merged with; labels of equal cost keep their arrival order.
#[derive(Debug, Clone, Default)]
pub struct OpenList {
    entries: Vec<LabelHandle>,
}

impl OpenList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest pending label.
    pub fn head(&self) -> Option<LabelHandle> {
        self.entries.first().copied()
    }

    /// Number of pending labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the head.
    pub fn pop_head(&mut self) -> Option<LabelHandle> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Inserts `handle` at its lexicographic position unless an entry prunes it under `ties`,
    /// removing the entries it prunes.
    pub fn merge<const D: usize, X>(
        &mut self,
        handle: LabelHandle,
        ties: Ties,
        pool: &LabelPool<D, X>,
    ) -> Result<Merge, PmstError> {
        let cost = pool.cost(handle)?;
        let mut position = self.entries.len();
        for (idx, entry) in self.entries.iter().enumerate() {
            let existing = pool.cost(*entry)?;
            if ties.prunes(&existing, &cost) {
                return Ok(Merge::Rejected);
            }
            if cost.lex_less(&existing) {
                position = idx;
                break;
            }
        }
        self.entries.insert(position, handle);
        let mut displaced = Vec::new();
        let mut idx = position + 1;
        while idx < self.entries.len() {
            if ties.prunes(&cost, &pool.cost(self.entries[idx])?) {
                displaced.push(self.entries.remove(idx));
            } else {
                idx += 1;
            }
        }
        Ok(Merge::Inserted {
            at_head: position == 0,
            displaced,
        })
    }

    /// Removes and returns every entry `cost` prunes under `ties`.
    pub fn clean<const D: usize, X>(
        &mut self,
        cost: &CostVector<D>,
        ties: Ties,
        pool: &LabelPool<D, X>,
    ) -> Result<Vec<LabelHandle>, PmstError> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if ties.prunes(cost, &pool.cost(entry)?) {
                removed.push(entry);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        Ok(removed)
    }
}

/// State of the alternative formulation.
#[derive(Debug)]
pub struct OpenState<const D: usize> {
    pub(crate) subset: NodeSubset,
    pub(crate) front: TruncatedFront<D>,
    pub(crate) open: OpenList,
}

impl<const D: usize> OpenState<D> {
    pub(crate) fn new(subset: NodeSubset) -> Self {
        Self {
            subset,
            front: TruncatedFront::new(),
            open: OpenList::new(),
        }
    }
}
