//! Record parsing and pattern matching for the Blocks database formats.
//!
//! A "block" is an ungapped multiple-sequence-alignment record; a "matrix"
//! is the position-specific scoring matrix (PSSM) derived from one. This
//! crate decodes and re-encodes both line-oriented record formats, keeps an
//! ordered-multiset container used as scratch storage while compiling motif
//! patterns, and evaluates compiled patterns against residue buffers.

pub mod alphabet;
pub mod collection;
pub mod error;
pub mod pattern;
pub mod record;
