#![warn(missing_docs)]

#[cfg(test)]
pub mod alloc;
pub mod option;
pub mod panic;
pub mod result;
