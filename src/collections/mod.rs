//! Ordered general-purpose collection types.
//!
//! # Purpose
//! I wrote these types to learn about self-balancing search trees properly, but also to pin down
//! the ownership story for a structure whose nodes need back-references: owning links downward,
//! raw non-owning links upward, and the discipline to keep them consistent through rotations.

#[cfg(feature = "tree")]
#[doc(cfg(feature = "tree"))]
pub mod tree;
