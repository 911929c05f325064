use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::mem;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

use super::{Difference, Intersection, Iter, Range, SymmetricDifference, Union};
use crate::collections::tree::cmp::{Comparator, NaturalOrder};
use crate::collections::tree::map::{InvalidRange, TreeMap};

/// A set sorted by a [`Comparator`], implemented over [`TreeMap`] with unit values.
///
/// Because iteration is always in ascending order, the set-algebra operations (union,
/// intersection, difference, symmetric difference) are lazy merge walks over two sorted sequences
/// rather than per-item membership probes: `O(n + m)` total, visiting each element once.
pub struct TreeSet<T, C: Comparator<T> = NaturalOrder> {
    // Unit values make every map entry a bare key, and the engine is shared unchanged.
    pub(crate) inner: TreeMap<T, (), C>,
}

impl<T: Ord> TreeSet<T> {
    /// Creates an empty set ordered naturally; see [`with_comparator`](TreeSet::with_comparator)
    /// for injecting a different order.
    pub const fn new() -> TreeSet<T> {
        TreeSet {
            inner: TreeMap::new(),
        }
    }
}

impl<T, C: Comparator<T>> TreeSet<T, C> {
    /// Creates an empty set ordered by the provided comparator.
    pub const fn with_comparator(cmp: C) -> TreeSet<T, C> {
        TreeSet {
            inner: TreeMap::with_comparator(cmp),
        }
    }

    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Adds an item to the set. Returns false and leaves the set untouched if an equal item is
    /// already present.
    ///
    /// # Examples
    /// ```
    /// # use ordered_collections::collections::tree::TreeSet;
    /// let mut set = TreeSet::new();
    /// assert!(set.insert(3));
    /// assert!(!set.insert(3));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> bool {
        self.inner.insert(item, ())
    }

    /// Removes an item, returning the stored value if it was present.
    pub fn remove<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.inner.remove_entry(item).map(|e| e.0)
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.inner.contains_key(item)
    }

    /// Returns a reference to the stored item equal to `item`, which can differ from the query in
    /// the parts the comparator ignores.
    pub fn get<Q>(&self, item: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.inner.get_entry(item).map(|e| e.0)
    }

    /// The smallest item, or [`None`] when empty.
    pub fn first(&self) -> Option<&T> {
        self.inner.first_entry().map(|e| e.0)
    }

    /// The largest item, or [`None`] when empty.
    pub fn last(&self) -> Option<&T> {
        self.inner.last_entry().map(|e| e.0)
    }

    /// Removes and returns the smallest item.
    pub fn take_first(&mut self) -> Option<T> {
        self.inner.take_first_entry().map(|e| e.0)
    }

    /// Removes and returns the largest item.
    pub fn take_last(&mut self) -> Option<T> {
        self.inner.take_last_entry().map(|e| e.0)
    }

    /// Drops every item and resets the length to zero. The comparator is kept.
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Returns an iterator over all items in ascending order, as references.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Returns a lazy view over the items in `[lower, upper]`, in ascending order. Fails if
    /// `lower` exceeds `upper` under the set's comparator.
    ///
    /// # Examples
    /// ```
    /// # use ordered_collections::collections::tree::TreeSet;
    /// let set = TreeSet::from([1, 3, 4, 5, 8]);
    /// let view: Vec<i32> = set.range(&2, &5).unwrap().copied().collect();
    /// assert_eq!(view, [3, 4, 5]);
    /// ```
    pub fn range<'a, Q>(&'a self, lower: &'a Q, upper: &'a Q) -> Result<Range<'a, T, Q, C>, InvalidRange>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        Ok(Range(self.inner.range(lower, upper)?))
    }

    /// Creates a borrowed iterator over all items that are in `self` but not `rhs`. (`self \ rhs`)
    pub fn difference<'a>(&'a self, other: &'a TreeSet<T, C>) -> Difference<'a, T, C> {
        Difference {
            a: self.iter().peekable(),
            b: other.iter().peekable(),
            cmp: self.inner.comparator(),
        }
    }

    /// Creates a borrowed iterator over all items that are in `self` or `rhs` but not both. (`self
    /// △ rhs`)
    pub fn symmetric_difference<'a>(&'a self, other: &'a TreeSet<T, C>) -> SymmetricDifference<'a, T, C> {
        SymmetricDifference {
            a: self.iter().peekable(),
            b: other.iter().peekable(),
            cmp: self.inner.comparator(),
        }
    }

    /// Creates a borrowed iterator over all items that are in both `self` and `rhs`. (`self ∩ rhs`)
    pub fn intersection<'a>(&'a self, other: &'a TreeSet<T, C>) -> Intersection<'a, T, C> {
        Intersection {
            a: self.iter().peekable(),
            b: other.iter().peekable(),
            cmp: self.inner.comparator(),
        }
    }

    /// Creates a borrowed iterator over all items that are in either `self` or `rhs`, without
    /// duplicates. (`self ∪ rhs`)
    ///
    /// # Examples
    /// ```
    /// # use ordered_collections::collections::tree::TreeSet;
    /// let a = TreeSet::from([1, 2, 3]);
    /// let b = TreeSet::from([3, 4]);
    /// let both: Vec<i32> = a.union(&b).copied().collect();
    /// assert_eq!(both, [1, 2, 3, 4]);
    /// ```
    pub fn union<'a>(&'a self, other: &'a TreeSet<T, C>) -> Union<'a, T, C> {
        Union {
            a: self.iter().peekable(),
            b: other.iter().peekable(),
            cmp: self.inner.comparator(),
        }
    }

    /// Returns true if `other` contains all elements of `self`. (`self ⊆ other`)
    pub fn is_subset(&self, other: &TreeSet<T, C>) -> bool {
        self.iter().all(|item| other.contains(item))
    }

    /// Returns true if `self` contains all elements of `other`. (`self ⊇ other`)
    pub fn is_superset(&self, other: &TreeSet<T, C>) -> bool {
        other.is_subset(self)
    }
}

impl<T, C: Comparator<T> + Default> Default for TreeSet<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T>> Extend<T> for TreeSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }

    fn extend_one(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for TreeSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::with_comparator(C::default());
        set.extend(iter);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for TreeSet<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T: Clone, C: Comparator<T> + Default> BitOr for &TreeSet<T, C> {
    type Output = TreeSet<T, C>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs).cloned().collect()
    }
}

impl<T, C: Comparator<T>> BitOrAssign for TreeSet<T, C> {
    fn bitor_assign(&mut self, rhs: Self) {
        for item in rhs {
            self.insert(item);
        }
    }
}

impl<T: Clone, C: Comparator<T> + Default> BitAnd for &TreeSet<T, C> {
    type Output = TreeSet<T, C>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs).cloned().collect()
    }
}

impl<T, C: Comparator<T> + Default> BitAndAssign for TreeSet<T, C> {
    fn bitand_assign(&mut self, rhs: Self) {
        let lhs = mem::take(self);
        for item in lhs {
            if rhs.contains(&item) {
                self.insert(item);
            }
        }
    }
}

impl<T: Clone, C: Comparator<T> + Default> BitXor for &TreeSet<T, C> {
    type Output = TreeSet<T, C>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(rhs).cloned().collect()
    }
}

impl<T, C: Comparator<T>> BitXorAssign for TreeSet<T, C> {
    fn bitxor_assign(&mut self, rhs: Self) {
        for item in rhs {
            if self.remove(&item).is_none() {
                self.insert(item);
            }
        }
    }
}

impl<T: Clone, C: Comparator<T> + Default> Sub for &TreeSet<T, C> {
    type Output = TreeSet<T, C>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs).cloned().collect()
    }
}

impl<T, C: Comparator<T>> SubAssign for TreeSet<T, C> {
    fn sub_assign(&mut self, rhs: Self) {
        for item in rhs {
            self.remove(&item);
        }
    }
}

impl<T: Debug, C: Comparator<T>> Debug for TreeSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeSet")
            .field_with("contents", |f| f.debug_set().entries(self.iter()).finish())
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Display, C: Comparator<T>> Display for TreeSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for item in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
            first = false;
        }
        write!(f, "}}")
    }
}
