//! A module containing [`TreeSet`] and associated types.
//!
//! The other included types are for iteration, including the sorted-merge set-algebra iterators
//! ([`Union`], [`Intersection`], [`Difference`], [`SymmetricDifference`]) and the lazy [`Range`]
//! view.
//!
//! [`TreeSet`] is also re-exported under the parent module.

mod iter;
mod tree_set;

mod tests;

pub use iter::*;
pub use tree_set::*;
