//! Index arena recycling search labels.
//!
//! Every slot carries exactly one [`Owner`] tag. Releasing a slot flips it to `Owner::Free` and
//! pushes it on the free list; any later access through the stale handle fails with
//! `stale-label` until the slot is handed out again.

use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::{CostVector, EdgeId};

use crate::archive::SENTINEL;
use crate::heap::HeapStore;

/// Handle to a pooled label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelHandle(u32);

impl LabelHandle {
    /// Slot index inside the pool.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The single structure currently responsible for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Slot is on the free list.
    Free,
    /// Resident in the priority queue.
    Queued,
    /// Parked in waiting bucket `bucket` of its state.
    Waiting {
        /// Bucket index within the owning state.
        bucket: u32,
    },
    /// Parked in its state's open list behind the head.
    Open,
    /// Popped from the queue and being expanded.
    Extracted,
}

/// A partial spanning tree: its accumulated cost, the state it spans and how to rebuild it.
#[derive(Debug, Clone)]
pub struct Label<const D: usize, X = ()> {
    /// Accumulated cost.
    pub cost: CostVector<D>,
    /// Canonical index of the owning state.
    pub state: usize,
    /// Archive index of the predecessor, [`SENTINEL`] for the root.
    pub pred: usize,
    /// Edge whose addition produced this label; `None` for the root.
    pub edge: Option<EdgeId>,
    /// Formulation specific data.
    pub extra: X,
    heap_slot: Option<usize>,
    owner: Owner,
}

impl<const D: usize, X> Label<D, X> {
    /// A fresh label not yet owned by any structure.
    pub fn new(
        cost: CostVector<D>,
        state: usize,
        pred: usize,
        edge: Option<EdgeId>,
        extra: X,
    ) -> Self {
        Self {
            cost,
            state,
            pred,
            edge,
            extra,
            heap_slot: None,
            owner: Owner::Extracted,
        }
    }

    /// The empty tree at the root state.
    pub fn root(extra: X) -> Self {
        Self::new(CostVector::zero(), 0, SENTINEL, None, extra)
    }

    /// Current owner tag.
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Heap slot, while queued.
    pub fn heap_slot(&self) -> Option<usize> {
        self.heap_slot
    }
}

/// Arena of labels with a free list.
#[derive(Debug)]
pub struct LabelPool<const D: usize, X = ()> {
    slots: Vec<Label<D, X>>,
    free: Vec<u32>,
}

impl<const D: usize, X> Default for LabelPool<D, X> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<const D: usize, X> LabelPool<D, X> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `label` in a recycled or new slot with the given owner. Fails with
    /// `label-capacity` once every `u32` handle is live.
    pub fn allocate(
        &mut self,
        mut label: Label<D, X>,
        owner: Owner,
    ) -> Result<LabelHandle, PmstError> {
        label.owner = owner;
        label.heap_slot = None;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = label;
                Ok(LabelHandle(slot))
            }
            None => {
                let slot = narrow_index(self.slots.len(), "label-capacity")?;
                self.slots.push(label);
                Ok(LabelHandle(slot))
            }
        }
    }

    /// Returns the slot to the free list.
    pub fn release(&mut self, handle: LabelHandle) -> Result<(), PmstError> {
        let label = self.get_mut(handle)?;
        debug_assert!(label.heap_slot.is_none(), "releasing a queued label");
        label.owner = Owner::Free;
        label.heap_slot = None;
        self.free.push(handle.0);
        Ok(())
    }

    /// Borrows a live label.
    pub fn get(&self, handle: LabelHandle) -> Result<&Label<D, X>, PmstError> {
        match self.slots.get(handle.index()) {
            Some(label) if label.owner != Owner::Free => Ok(label),
            _ => Err(stale(handle)),
        }
    }

    /// Mutably borrows a live label.
    pub fn get_mut(&mut self, handle: LabelHandle) -> Result<&mut Label<D, X>, PmstError> {
        match self.slots.get_mut(handle.index()) {
            Some(label) if label.owner != Owner::Free => Ok(label),
            _ => Err(stale(handle)),
        }
    }

    /// Cost of a live label.
    pub fn cost(&self, handle: LabelHandle) -> Result<CostVector<D>, PmstError> {
        Ok(self.get(handle)?.cost)
    }

    /// Re-tags a live label.
    pub fn set_owner(&mut self, handle: LabelHandle, owner: Owner) -> Result<(), PmstError> {
        self.get_mut(handle)?.owner = owner;
        Ok(())
    }

    /// Number of labels currently owned by a structure other than the pool.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots ever allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<const D: usize, X> HeapStore<LabelHandle> for LabelPool<D, X> {
    fn less(&self, a: LabelHandle, b: LabelHandle) -> bool {
        match (self.slots.get(a.index()), self.slots.get(b.index())) {
            (Some(a), Some(b)) => a.cost.lex_less(&b.cost),
            _ => false,
        }
    }

    fn slot(&self, item: LabelHandle) -> Option<usize> {
        self.slots.get(item.index()).and_then(|label| label.heap_slot)
    }

    fn set_slot(&mut self, item: LabelHandle, slot: Option<usize>) {
        if let Some(label) = self.slots.get_mut(item.index()) {
            label.heap_slot = slot;
            if slot.is_some() {
                label.owner = Owner::Queued;
            }
        }
    }
}

/// Converts an arena position into a compact `u32` id.
pub(crate) fn narrow_index(index: usize, code: &'static str) -> Result<u32, PmstError> {
    u32::try_from(index).map_err(|_| {
        PmstError::Capacity(
            ErrorInfo::new(code, "index does not fit in a 32-bit id")
                .with_context("index", index),
        )
    })
}

fn stale(handle: LabelHandle) -> PmstError {
    PmstError::Search(
        ErrorInfo::new("stale-label", "label handle refers to a released slot")
            .with_context("slot", handle.index()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_slots_are_recycled() {
        let mut pool: LabelPool<2> = LabelPool::new();
        let a = pool.allocate(Label::root(()), Owner::Extracted).unwrap();
        let b = pool.allocate(Label::root(()), Owner::Open).unwrap();
        assert_eq!(pool.live(), 2);
        pool.release(a).unwrap();
        assert_eq!(pool.live(), 1);
        let c = pool
            .allocate(Label::new(CostVector::new([1, 1]), 3, 0, None, ()), Owner::Open)
            .unwrap();
        assert_eq!(c, a);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.get(c).unwrap().state, 3);
        assert_eq!(pool.get(b).unwrap().owner(), Owner::Open);
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut pool: LabelPool<2> = LabelPool::new();
        let a = pool.allocate(Label::root(()), Owner::Extracted).unwrap();
        pool.release(a).unwrap();
        assert_eq!(pool.get(a).unwrap_err().code(), "stale-label");
        assert_eq!(pool.release(a).unwrap_err().code(), "stale-label");
    }

    #[test]
    fn ids_beyond_u32_are_capacity_errors() {
        assert_eq!(narrow_index(7, "label-capacity").unwrap(), 7);
        assert_eq!(narrow_index(u32::MAX as usize, "label-capacity").unwrap(), u32::MAX);
        if let Some(past) = (u32::MAX as usize).checked_add(1) {
            let err = narrow_index(past, "bucket-capacity").unwrap_err();
            assert_eq!(err.code(), "bucket-capacity");
            assert!(matches!(err, PmstError::Capacity(_)));
        }
    }
}
