//! Per-state dominance filter over truncated costs.
//!
//! Candidates reach a state in non-decreasing order of dimension 0, so an entry already in the
//! front is never worse than a newcomer there. Dominance therefore only needs dimensions `1..D`.
//! Entries are kept sorted by their truncated lexicographic order, which lets both scans stop
//! early.
//!
//! [`Ties`] decides whether a cost equal to an entry counts as dominated.

use std::cmp::Ordering;

use pmst_core::CostVector;

/// Treatment of a cost equal to one already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ties {
    /// Equal costs are dominated.
    Collapse,
    /// Only Pareto dominance prunes; equal costs survive.
    Keep,
}

impl Ties {
    /// Whether `a` prunes `b` under this policy.
    pub fn prunes<const D: usize>(self, a: &CostVector<D>, b: &CostVector<D>) -> bool {
        match self {
            Ties::Collapse => a.dominates(b),
            Ties::Keep => a.pareto_dominates(b),
        }
    }
}

/// Sorted, mutually non-dominated set of truncated costs.
#[derive(Debug, Clone, Default)]
pub struct TruncatedFront<const D: usize> {
    entries: Vec<CostVector<D>>,
}

impl<const D: usize> TruncatedFront<D> {
    /// Creates an empty front.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the front is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored costs in truncated lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &CostVector<D>> + '_ {
        self.entries.iter()
    }

    /// Whether some entry dominates `cost` on dimensions `1..D`.
    pub fn query(&self, cost: &CostVector<D>) -> bool {
        self.query_with(cost, Ties::Collapse)
    }

    /// [`query`](Self::query) under the given tie policy.
    pub fn query_with(&self, cost: &CostVector<D>, ties: Ties) -> bool {
        self.entries
            .iter()
            .take_while(|entry| entry.truncated_cmp(cost) != Ordering::Greater)
            .any(|entry| entry.truncated_dominates(cost) && prunes_equal(entry, cost, ties))
    }

    /// Admits `cost` unless it is dominated, dropping the entries it dominates. Returns whether it
    /// was admitted.
    pub fn insert(&mut self, cost: &CostVector<D>) -> bool {
        self.insert_with(cost, Ties::Collapse)
    }

    /// [`insert`](Self::insert) under the given tie policy. With [`Ties::Keep`] a cost equal to an
    /// entry is admitted without being stored twice.
    pub fn insert_with(&mut self, cost: &CostVector<D>, ties: Ties) -> bool {
        let mut pos = 0;
        while pos < self.entries.len()
            && self.entries[pos].truncated_cmp(cost) != Ordering::Greater
        {
            let entry = &self.entries[pos];
            if entry.truncated_dominates(cost) {
                return !prunes_equal(entry, cost, ties);
            }
            pos += 1;
        }
        self.entries.insert(pos, *cost);
        let mut tail = pos + 1;
        while tail < self.entries.len() {
            if cost.truncated_dominates(&self.entries[tail]) {
                self.entries.remove(tail);
            } else {
                tail += 1;
            }
        }
        true
    }
}

/// Entries never exceed a newcomer in dimension 0, so truncated dominance is full dominance and
/// only equality remains to be decided.
fn prunes_equal<const D: usize>(entry: &CostVector<D>, cost: &CostVector<D>, ties: Ties) -> bool {
    ties == Ties::Collapse || entry != cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_dominated_and_evicts_dominated() {
        let mut front = TruncatedFront::new();
        assert!(front.insert(&CostVector::new([1, 5, 5])));
        assert!(front.insert(&CostVector::new([2, 6, 1])));
        assert!(!front.insert(&CostVector::new([3, 7, 7])));
        assert!(front.query(&CostVector::new([3, 5, 5])));
        assert!(!front.query(&CostVector::new([3, 4, 9])));
        assert!(front.insert(&CostVector::new([4, 6, 0])));
        assert_eq!(front.len(), 2);
        let kept: Vec<_> = front.iter().map(|c| c.truncated().to_vec()).collect();
        assert_eq!(kept, vec![vec![5, 5], vec![6, 0]]);
    }

    #[test]
    fn kept_ties_pass_without_duplicating_entries() {
        let mut front = TruncatedFront::new();
        assert!(front.insert_with(&CostVector::new([2, 4]), Ties::Keep));
        assert!(front.query(&CostVector::new([2, 4])));
        assert!(!front.query_with(&CostVector::new([2, 4]), Ties::Keep));
        assert!(front.query_with(&CostVector::new([3, 4]), Ties::Keep));
        assert!(front.insert_with(&CostVector::new([2, 4]), Ties::Keep));
        assert!(!front.insert_with(&CostVector::new([3, 4]), Ties::Keep));
        assert!(!front.insert(&CostVector::new([2, 4])));
        assert_eq!(front.len(), 1);
    }
}
