//! A module containing [`TreeMap`] and associated types.
//!
//! The other included types are for iteration - owned and borrowed iteration over entries, keys or
//! values, plus the lazy [`Range`] view - and the strongly typed errors.
//!
//! As a note, there is no mutable iterator over keys because mutating the keys of a sorted map in
//! place would cause a logic error.
//!
//! [`TreeMap`] is also re-exported under the parent module.

mod error;
mod iter;
mod node;
mod tree_map;

mod tests;

pub use error::*;
pub use iter::*;
pub(crate) use node::*;
pub use tree_map::*;
