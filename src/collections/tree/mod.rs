//! Red-black tree collections. Revolves around [`TreeMap`], with [`TreeSet`] as a thin key-only
//! wrapper over the same balancing engine.
//!
//! Both containers keep their entries sorted under a [`Comparator`] injected at construction,
//! which defaults to [`NaturalOrder`] (the key's [`Ord`] impl). Point operations are `O(log n)`
//! thanks to the colouring invariants, and in-order iteration is `O(n)` with no auxiliary
//! allocation.

pub mod cmp;
pub mod map;
pub mod set;

#[doc(inline)]
pub use cmp::{Comparator, NaturalOrder};
#[doc(inline)]
pub use map::TreeMap;
#[doc(inline)]
pub use set::TreeSet;
