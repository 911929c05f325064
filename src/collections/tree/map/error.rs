use derive_more::{Display, Error};

/// The requested key is not present in the container.
///
/// Only the indexing operator surfaces this; plain lookups return [`Option`] because a missing
/// key is an ordinary outcome for a map.
#[derive(Debug, Display, Error)]
#[display("Key not found in ordered collection!")]
pub struct KeyNotFound;

/// A range view was requested with a lower bound greater than its upper bound under the active
/// comparator.
#[derive(Debug, Display, Error)]
#[display("Lower bound must not be greater than upper bound!")]
pub struct InvalidRange;
