//! Fixed-width multi-criteria cost vectors.
//!
//! The dimension `D` is a compile-time constant. All comparisons used by the search engines live
//! here: lexicographic order (dimension 0 first), dominance (`<=` in every component), Pareto
//! dominance (dominance between distinct vectors), weak dominance (`<` in every component) and
//! truncated dominance that ignores dimension 0.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Scalar type of a single cost component.
pub type CostType = u32;

/// A `D`-dimensional vector of non-negative integer costs.
///
/// `Ord` is the lexicographic order, so sorting a slice of vectors or keying a heap on them
/// processes dimension 0 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CostVector<const D: usize>([CostType; D]);

impl<const D: usize> CostVector<D> {
    /// Number of cost dimensions.
    pub const DIMS: usize = D;

    /// Wraps the provided components.
    pub const fn new(components: [CostType; D]) -> Self {
        Self(components)
    }

    /// The all-zero vector, cost of the empty tree.
    pub const fn zero() -> Self {
        Self([0; D])
    }

    /// A vector with every component set to `value`.
    pub const fn splat(value: CostType) -> Self {
        Self([value; D])
    }

    /// Returns the components as an array reference.
    pub fn components(&self) -> &[CostType; D] {
        &self.0
    }

    /// Componentwise addition, `None` if any component overflows.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let mut out = [0; D];
        for (dim, slot) in out.iter_mut().enumerate() {
            *slot = self.0[dim].checked_add(other.0[dim])?;
        }
        Some(Self(out))
    }

    /// Componentwise addition clamped at `CostType::MAX`.
    pub fn saturating_add(&self, other: &Self) -> Self {
        let mut out = self.0;
        for (dim, slot) in out.iter_mut().enumerate() {
            *slot = slot.saturating_add(other.0[dim]);
        }
        Self(out)
    }

    /// Componentwise subtraction, `None` if any component would become negative.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let mut out = [0; D];
        for (dim, slot) in out.iter_mut().enumerate() {
            *slot = self.0[dim].checked_sub(other.0[dim])?;
        }
        Some(Self(out))
    }

    /// Componentwise subtraction clamped at zero.
    pub fn saturating_sub(&self, other: &Self) -> Self {
        let mut out = self.0;
        for (dim, slot) in out.iter_mut().enumerate() {
            *slot = slot.saturating_sub(other.0[dim]);
        }
        Self(out)
    }

    /// Componentwise maximum.
    pub fn componentwise_max(&self, other: &Self) -> Self {
        let mut out = self.0;
        for (dim, slot) in out.iter_mut().enumerate() {
            *slot = (*slot).max(other.0[dim]);
        }
        Self(out)
    }

    /// Lexicographic strict order; equal vectors are not less than each other.
    pub fn lex_less(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// `true` if `self[i] <= other[i]` for every dimension. Holds for equal vectors.
    pub fn dominates(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// Pareto dominance: [`dominates`](Self::dominates) and differs in some dimension.
    pub fn pareto_dominates(&self, other: &Self) -> bool {
        self != other && self.dominates(other)
    }

    /// `true` if `self[i] < other[i]` for every dimension. Never holds for equal vectors.
    pub fn weakly_dominates(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a < b)
    }

    /// The projection that drops dimension 0.
    pub fn truncated(&self) -> &[CostType] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// Dominance restricted to dimensions `1..D`.
    pub fn truncated_dominates(&self, other: &Self) -> bool {
        self.truncated()
            .iter()
            .zip(other.truncated().iter())
            .all(|(a, b)| a <= b)
    }

    /// Lexicographic order restricted to dimensions `1..D`.
    pub fn truncated_cmp(&self, other: &Self) -> Ordering {
        self.truncated().cmp(other.truncated())
    }

    /// Sum of all components, widened so it cannot overflow.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|c| u64::from(*c)).sum()
    }
}

impl<const D: usize> Default for CostVector<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const D: usize> From<[CostType; D]> for CostVector<D> {
    fn from(value: [CostType; D]) -> Self {
        Self(value)
    }
}

impl<const D: usize> Index<usize> for CostVector<D> {
    type Output = CostType;

    fn index(&self, dim: usize) -> &CostType {
        &self.0[dim]
    }
}

impl<const D: usize> PartialOrd for CostVector<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const D: usize> Ord for CostVector<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<const D: usize> fmt::Display for CostVector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (dim, value) in self.0.iter().enumerate() {
            if dim > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

impl<const D: usize> Serialize for CostVector<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de, const D: usize> Deserialize<'de> for CostVector<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        deserializer.deserialize_seq(CostVisitor::<D>)
    }
}

struct CostVisitor<const D: usize>;

impl<'de, const D: usize> Visitor<'de> for CostVisitor<D> {
    type Value = CostVector<D>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an array of {} non-negative integer costs", D)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut out = [0; D];
        for (dim, slot) in out.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(dim, &self))?;
        }
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(D + 1, &self));
        }
        Ok(CostVector(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_order_breaks_ties_on_later_dimensions() {
        let a = CostVector::new([1, 5, 9]);
        let b = CostVector::new([1, 6, 0]);
        assert!(a.lex_less(&b));
        assert!(!b.lex_less(&a));
        assert!(!a.lex_less(&a));
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn dominance_is_reflexive_weak_dominance_is_not() {
        let a = CostVector::new([3, 4]);
        assert!(a.dominates(&a));
        assert!(!a.weakly_dominates(&a));
        assert!(CostVector::new([2, 3]).weakly_dominates(&a));
        assert!(!CostVector::new([3, 3]).weakly_dominates(&a));
        assert!(!a.pareto_dominates(&a));
        assert!(CostVector::new([3, 3]).pareto_dominates(&a));
    }

    #[test]
    fn subtraction_is_checked() {
        let a = CostVector::new([5, 2]);
        let b = CostVector::new([3, 3]);
        assert_eq!(a.checked_sub(&b), None);
        assert_eq!(a.saturating_sub(&b), CostVector::new([2, 0]));
        assert_eq!(a.checked_sub(&CostVector::new([5, 1])), Some(CostVector::new([0, 1])));
    }

    #[test]
    fn addition_reports_overflow() {
        let a = CostVector::new([CostType::MAX, 0]);
        assert_eq!(a.checked_add(&CostVector::new([1, 0])), None);
        assert_eq!(
            a.saturating_add(&CostVector::new([1, 1])),
            CostVector::new([CostType::MAX, 1])
        );
    }

    #[test]
    fn truncation_drops_first_dimension() {
        let a = CostVector::new([100, 2, 3]);
        let b = CostVector::new([0, 2, 4]);
        assert_eq!(a.truncated(), &[2, 3]);
        assert!(a.truncated_dominates(&b));
        assert!(!b.truncated_dominates(&a));
        assert_eq!(a.truncated_cmp(&b), Ordering::Less);
    }

    #[test]
    fn display_lists_components() {
        assert_eq!(CostVector::new([1, 2, 3]).to_string(), "(1, 2, 3)");
    }
}
