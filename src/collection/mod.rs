//! General-purpose ordered containers.

pub mod skiplist;

pub use skiplist::{Duplicates, Insert, SkipList, Visit};
