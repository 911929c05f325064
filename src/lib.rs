//! This crate is my attempt at writing the ordered half of a standard collections library from
//! scratch: a sorted map and sorted set backed by a red-black tree.
//!
//! # Purpose
//! This repo / crate is a project that I'm working on as a learning experience, with no expectation
//! for it to be used in production. I'd written the linear structures (vectors, linked lists, hash
//! tables) before, and they're mostly plumbing; the self-balancing tree is the first one with real
//! algorithmic depth, so it gets a crate of its own. Writing the rebalancing logic myself is the
//! only way I actually understand it, rather than just nodding along to the textbook diagrams.
//!
//! # Method
//! The structures here are written based on my existing understanding and problem solving. I'm not
//! restricting myself from looking up the red-black cases (nobody derives those from first
//! principles for fun), but the ownership design, API surface and iteration strategy are my own.
//! This crate isn't intended to copy Rust's [`std`] but takes a lot of inspiration from its
//! `BTreeMap`/`BTreeSet` APIs.
//!
//! The tree uses raw [`NonNull`](std::ptr::NonNull) links in both directions: owning child links
//! and non-owning parent back-references. Parent pointers make the rebalancing walks and in-order
//! iteration pleasant (no auxiliary stack), at the cost of some unsafe code that has to keep both
//! directions in lock-step through every rotation.
//!
//! # Error Handling
//! Lookups that can reasonably "miss" return [`Option`] rather than erroring, because a missing
//! key is not exceptional for a map. The few genuinely contract-violating calls (indexing a
//! missing key, constructing an inverted range view) surface strongly typed errors - structs
//! implementing [`Error`](std::error::Error) - either as a [`Result`] or as a panic message for
//! the indexing operator, where `std` precedent says panicking is the ergonomic choice.
//!
//! # Dependencies
//! This crate depends on some derive macros because they're helpful and remove the need for some
//! very repetitive programming. Everything else is `std`; notably there is no `Vec` anywhere, not
//! even inside the iterators - the parent links mean traversal never needs one.

#![feature(box_vec_non_null)]
#![feature(extend_one)]
#![feature(debug_closure_helpers)]
#![feature(doc_cfg)]

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
#[doc(cfg(feature = "collections"))]
pub mod collections;

pub(crate) mod util;
