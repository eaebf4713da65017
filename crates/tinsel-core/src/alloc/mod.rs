//! Allocation types shared across Tinsel crates.
//!
//! [`SparseSet`] is the generational arena used for widget storage.

pub mod sparse_set;

pub use sparse_set::{IndexSlot, SparseSet};
