//! Indexed binary min-heap with decrease-key.
//!
//! The heap only stores handles; ordering and slot bookkeeping are delegated to a [`HeapStore`],
//! so every resident item knows its own slot and `contains` is O(1).

/// Storage backing an [`IndexedHeap`].
pub trait HeapStore<H> {
    /// Strict ordering between two items.
    fn less(&self, a: H, b: H) -> bool;
    /// Slot last recorded for `item`.
    fn slot(&self, item: H) -> Option<usize>;
    /// Records the slot of `item`; `None` when it leaves the heap.
    fn set_slot(&mut self, item: H, slot: Option<usize>);
}

/// Binary min-heap over handles.
#[derive(Debug, Clone)]
pub struct IndexedHeap<H> {
    items: Vec<H>,
}

impl<H> Default for IndexedHeap<H> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<H: Copy + PartialEq> IndexedHeap<H> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resident items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Smallest item without removing it.
    pub fn peek(&self) -> Option<H> {
        self.items.first().copied()
    }

    /// Whether `item` currently occupies a slot.
    pub fn contains<S: HeapStore<H>>(&self, item: H, store: &S) -> bool {
        store
            .slot(item)
            .and_then(|slot| self.items.get(slot))
            .map_or(false, |resident| *resident == item)
    }

    /// Inserts `item`.
    pub fn push<S: HeapStore<H>>(&mut self, item: H, store: &mut S) {
        self.items.push(item);
        let slot = self.items.len() - 1;
        store.set_slot(item, Some(slot));
        self.sift_up(slot, store);
    }

    /// Removes and returns the smallest item.
    pub fn pop<S: HeapStore<H>>(&mut self, store: &mut S) -> Option<H> {
        let last = self.items.pop()?;
        let top = if self.items.is_empty() {
            last
        } else {
            let top = std::mem::replace(&mut self.items[0], last);
            store.set_slot(last, Some(0));
            self.sift_down(0, store);
            top
        };
        store.set_slot(top, None);
        Some(top)
    }

    /// Puts `new` into the slot of `old` and sifts it up. `new` must not compare greater than
    /// `old`. Returns `false` and leaves the heap untouched when `old` is not resident.
    pub fn decrease_key<S: HeapStore<H>>(&mut self, old: H, new: H, store: &mut S) -> bool {
        if !self.contains(old, store) {
            return false;
        }
        let Some(slot) = store.slot(old) else {
            return false;
        };
        debug_assert!(!store.less(old, new), "decrease_key with a larger key");
        self.items[slot] = new;
        store.set_slot(old, None);
        store.set_slot(new, Some(slot));
        self.sift_up(slot, store);
        true
    }

    fn sift_up<S: HeapStore<H>>(&mut self, mut slot: usize, store: &mut S) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !store.less(self.items[slot], self.items[parent]) {
                break;
            }
            self.swap(slot, parent, store);
            slot = parent;
        }
    }

    fn sift_down<S: HeapStore<H>>(&mut self, mut slot: usize, store: &mut S) {
        let len = self.items.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && store.less(self.items[right], self.items[left]) {
                right
            } else {
                left
            };
            if !store.less(self.items[child], self.items[slot]) {
                break;
            }
            self.swap(slot, child, store);
            slot = child;
        }
    }

    fn swap<S: HeapStore<H>>(&mut self, a: usize, b: usize, store: &mut S) {
        self.items.swap(a, b);
        store.set_slot(self.items[a], Some(a));
        store.set_slot(self.items[b], Some(b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Keys {
        keys: Vec<u32>,
        slots: Vec<Option<usize>>,
    }

    impl HeapStore<usize> for Keys {
        fn less(&self, a: usize, b: usize) -> bool {
            self.keys[a] < self.keys[b]
        }
        fn slot(&self, item: usize) -> Option<usize> {
            self.slots[item]
        }
        fn set_slot(&mut self, item: usize, slot: Option<usize>) {
            self.slots[item] = slot;
        }
    }

    #[test]
    fn decrease_key_reorders() {
        let mut store = Keys {
            keys: vec![5, 7, 9, 1],
            slots: vec![None; 4],
        };
        let mut heap = IndexedHeap::new();
        for item in 0..3 {
            heap.push(item, &mut store);
        }
        assert!(heap.decrease_key(2, 3, &mut store));
        assert!(!heap.contains(2, &store));
        assert!(heap.contains(3, &store));
        assert!(!heap.decrease_key(2, 3, &mut store));
        assert_eq!(heap.pop(&mut store), Some(3));
        assert_eq!(heap.pop(&mut store), Some(0));
        assert_eq!(heap.pop(&mut store), Some(1));
        assert_eq!(heap.pop(&mut store), None);
        assert!(heap.is_empty());
    }
}
