//! Ordering strategies for the tree collections.
//!
//! A [`Comparator`] is injected at construction and owned by the container, so the active order is
//! always explicit state rather than something ambient. [`NaturalOrder`] is the default strategy
//! and simply defers to [`Ord`].

use std::cmp::Ordering;

/// A total order over values of type `T`, used by [`TreeMap`](super::TreeMap) and
/// [`TreeSet`](super::TreeSet) to arrange their entries.
///
/// Implemented for any closure of the right shape, so one-off orders don't need a named type:
/// ```
/// # use ordered_collections::collections::tree::TreeSet;
/// let mut set = TreeSet::with_comparator(|a: &u32, b: &u32| b.cmp(a));
/// set.insert(1);
/// set.insert(3);
/// set.insert(2);
/// assert_eq!(set.first(), Some(&3));
/// ```
pub trait Comparator<T: ?Sized> {
    /// Returns the ordering of `lhs` relative to `rhs`.
    ///
    /// Must be a total order: transitive, antisymmetric, and consistent across calls for as long
    /// as the values live in the container.
    fn cmp(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// The default ordering strategy: whatever the type's [`Ord`] impl says.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn cmp(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Comparator<T> for F {
    fn cmp(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}
