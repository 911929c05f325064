use std::borrow::Borrow;
use std::cmp::Ordering;
use std::iter::{FusedIterator, Peekable};

use super::TreeSet;
use crate::collections::tree::cmp::Comparator;
use crate::collections::tree::map;

impl<'a, T, C: Comparator<T>> IntoIterator for &'a TreeSet<T, C> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter((&self.inner).into_iter())
    }
}

pub struct Iter<'a, T>(
    pub(crate) map::Iter<'a, T, ()>
);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| e.0)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<T, C: Comparator<T>> IntoIterator for TreeSet<T, C> {
    type Item = T;

    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.inner.into_iter())
    }
}

pub struct IntoIter<T, C: Comparator<T>>(
    pub(crate) map::IntoIter<T, (), C>
);

impl<T, C: Comparator<T>> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T, C: Comparator<T>> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| e.0)
    }
}

impl<T, C: Comparator<T>> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C: Comparator<T>> FusedIterator for IntoIter<T, C> {}

/// The set flavour of [`map::Range`]: items in an inclusive range, ascending.
pub struct Range<'a, T, Q: ?Sized, C: Comparator<Q>>(
    pub(crate) map::Range<'a, T, (), Q, C>
);

impl<'a, T, Q, C> Iterator for Range<'a, T, Q, C>
where
    T: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }
}

impl<'a, T, Q, C> FusedIterator for Range<'a, T, Q, C>
where
    T: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
}

// The set-algebra iterators below all run the same shape of merge walk: both inputs are sorted
// under the same comparator, so peeking one item from each side is enough to decide which side
// advances. Every element of both sets is visited at most once.

pub struct Union<'a, T, C: Comparator<T>> {
    pub(crate) a: Peekable<Iter<'a, T>>,
    pub(crate) b: Peekable<Iter<'a, T>>,
    pub(crate) cmp: &'a C,
}

impl<'a, T, C: Comparator<T>> Iterator for Union<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match (self.a.peek(), self.b.peek()) {
            (Some(x), Some(y)) => match self.cmp.cmp(x, y) {
                Ordering::Less => self.a.next(),
                Ordering::Greater => self.b.next(),
                Ordering::Equal => {
                    self.b.next();
                    self.a.next()
                },
            },
            (Some(_), None) => self.a.next(),
            (None, _) => self.b.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a, _) = self.a.size_hint();
        let (b, _) = self.b.size_hint();
        // Everything overlapping at one extreme, nothing at the other.
        (a.max(b), Some(a + b))
    }
}

impl<'a, T, C: Comparator<T>> FusedIterator for Union<'a, T, C> {}

pub struct Intersection<'a, T, C: Comparator<T>> {
    pub(crate) a: Peekable<Iter<'a, T>>,
    pub(crate) b: Peekable<Iter<'a, T>>,
    pub(crate) cmp: &'a C,
}

impl<'a, T, C: Comparator<T>> Iterator for Intersection<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ord = match (self.a.peek(), self.b.peek()) {
                (Some(x), Some(y)) => self.cmp.cmp(x, y),
                _ => return None,
            };
            match ord {
                Ordering::Less => {
                    self.a.next();
                },
                Ordering::Greater => {
                    self.b.next();
                },
                Ordering::Equal => {
                    self.b.next();
                    return self.a.next();
                },
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a, _) = self.a.size_hint();
        let (b, _) = self.b.size_hint();
        (0, Some(a.min(b)))
    }
}

impl<'a, T, C: Comparator<T>> FusedIterator for Intersection<'a, T, C> {}

pub struct Difference<'a, T, C: Comparator<T>> {
    pub(crate) a: Peekable<Iter<'a, T>>,
    pub(crate) b: Peekable<Iter<'a, T>>,
    pub(crate) cmp: &'a C,
}

impl<'a, T, C: Comparator<T>> Iterator for Difference<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match (self.a.peek(), self.b.peek()) {
                (Some(x), Some(y)) => match self.cmp.cmp(x, y) {
                    Ordering::Less => return self.a.next(),
                    Ordering::Greater => {
                        self.b.next();
                    },
                    Ordering::Equal => {
                        self.a.next();
                        self.b.next();
                    },
                },
                (Some(_), None) => return self.a.next(),
                (None, _) => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a, _) = self.a.size_hint();
        let (b, _) = self.b.size_hint();
        (a.saturating_sub(b), Some(a))
    }
}

impl<'a, T, C: Comparator<T>> FusedIterator for Difference<'a, T, C> {}

pub struct SymmetricDifference<'a, T, C: Comparator<T>> {
    pub(crate) a: Peekable<Iter<'a, T>>,
    pub(crate) b: Peekable<Iter<'a, T>>,
    pub(crate) cmp: &'a C,
}

impl<'a, T, C: Comparator<T>> Iterator for SymmetricDifference<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match (self.a.peek(), self.b.peek()) {
                (Some(x), Some(y)) => match self.cmp.cmp(x, y) {
                    Ordering::Less => return self.a.next(),
                    Ordering::Greater => return self.b.next(),
                    Ordering::Equal => {
                        self.a.next();
                        self.b.next();
                    },
                },
                (Some(_), None) => return self.a.next(),
                (None, _) => return self.b.next(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a, _) = self.a.size_hint();
        let (b, _) = self.b.size_hint();
        (0, Some(a + b))
    }
}

impl<'a, T, C: Comparator<T>> FusedIterator for SymmetricDifference<'a, T, C> {}
