use std::borrow::Borrow;
use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{Link, TreeMap};
use crate::collections::tree::cmp::Comparator;
use crate::util::option::OptionExtension;

// All borrowed iteration walks the parent links: the successor of a node is either the leftmost
// node of its right subtree or the first ancestor reached from the left. No stack, no allocation,
// and every call to iter() starts a fresh walk.

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            front: self.root.map(|root| root.min_descendant()),
            back: self.root.map(|root| root.max_descendant()),
            len: self.len(),
            _phantom: PhantomData,
        }
    }
}

pub struct Iter<'a, K, V> {
    pub(crate) front: Link<K, V>,
    pub(crate) back: Link<K, V>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<(&'a K, &'a V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: len is only non-zero while both ends point at real nodes.
        let node = unsafe { self.front.unreachable() };
        self.front = node.successor();
        self.len -= 1;
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: As for next.
        let node = unsafe { self.back.unreachable() };
        self.back = node.predecessor();
        self.len -= 1;
        Some(node.entry())
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a mut TreeMap<K, V, C> {
    type Item = (&'a K, &'a mut V);

    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            front: self.root.map(|root| root.min_descendant()),
            back: self.root.map(|root| root.max_descendant()),
            len: self.len(),
            _phantom: PhantomData,
        }
    }
}

/// Yields mutable values but shared keys; mutating a key in place would break the ordering
/// invariant, so no iterator offers it.
pub struct IterMut<'a, K, V> {
    pub(crate) front: Link<K, V>,
    pub(crate) back: Link<K, V>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<(&'a K, &'a mut V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: As for Iter; each node is visited exactly once, so the mutable borrows never
        // overlap.
        let mut node = unsafe { self.front.unreachable() };
        self.front = node.successor();
        self.len -= 1;
        Some((node.key(), node.value_mut()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: As for next.
        let mut node = unsafe { self.back.unreachable() };
        self.back = node.predecessor();
        self.len -= 1;
        Some((node.key(), node.value_mut()))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

impl<K, V, C: Comparator<K>> IntoIterator for TreeMap<K, V, C> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

pub struct IntoIter<K, V, C: Comparator<K>>(pub(crate) TreeMap<K, V, C>);

impl<K, V, C: Comparator<K>> Iterator for IntoIter<K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        // Each step pays the removal cost, but draining front-to-back keeps the tree balanced the
        // whole way down, so the total stays O(n log n) with no extra space.
        self.0.take_first_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<K, V, C: Comparator<K>> DoubleEndedIterator for IntoIter<K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.take_last_entry()
    }
}

impl<K, V, C: Comparator<K>> ExactSizeIterator for IntoIter<K, V, C> {}

impl<K, V, C: Comparator<K>> FusedIterator for IntoIter<K, V, C> {}

/// A lazy in-order view over the entries with keys in an inclusive range. Construction seeks the
/// first qualifying node; iteration stops at the first key past the upper bound, so subtrees
/// outside the range are never visited.
pub struct Range<'a, K, V, Q: ?Sized, C: Comparator<Q>> {
    pub(crate) next: Link<K, V>,
    pub(crate) upper: &'a Q,
    pub(crate) cmp: &'a C,
    pub(crate) _phantom: PhantomData<(&'a K, &'a V)>,
}

impl<'a, K, V, Q, C> Iterator for Range<'a, K, V, Q, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        if self.cmp.cmp(node.key().borrow(), self.upper) == Ordering::Greater {
            self.next = None;
            return None;
        }
        self.next = node.successor();
        Some(node.entry())
    }
}

impl<'a, K, V, Q, C> FusedIterator for Range<'a, K, V, Q, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
}

pub struct Keys<'a, K, V>(
    pub(crate) Iter<'a, K, V>
);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| e.0)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

pub struct Values<'a, K, V>(
    pub(crate) Iter<'a, K, V>
);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

pub struct ValuesMut<'a, K, V>(
    pub(crate) IterMut<'a, K, V>
);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for ValuesMut<'a, K, V> {}

pub struct IntoKeys<K, V, C: Comparator<K>>(
    pub(crate) IntoIter<K, V, C>
);

impl<K, V, C: Comparator<K>> Iterator for IntoKeys<K, V, C> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, C: Comparator<K>> ExactSizeIterator for IntoKeys<K, V, C> {}

impl<K, V, C: Comparator<K>> FusedIterator for IntoKeys<K, V, C> {}

pub struct IntoValues<K, V, C: Comparator<K>>(
    pub(crate) IntoIter<K, V, C>
);

impl<K, V, C: Comparator<K>> Iterator for IntoValues<K, V, C> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, C: Comparator<K>> ExactSizeIterator for IntoValues<K, V, C> {}

impl<K, V, C: Comparator<K>> FusedIterator for IntoValues<K, V, C> {}
