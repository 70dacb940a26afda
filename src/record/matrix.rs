//! In-memory representation of a position-specific scoring matrix.
//!
//! One weight per (residue code, column) pair. All 26 rows are allocated
//! in a single arena even though the record format never populates some of
//! them; the waste buys index-stable rows. The arena is addressed as
//! `code * width + column`, so rebuilding it on column growth cannot leave
//! a stale row view behind.

use crate::alphabet::ALPHABET_SIZE;
use crate::pattern::Pattern;

/// A position-weight scoring matrix keyed by residue code.
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    pub id: String,
    /// Raw `AC` line remainder, re-rendered verbatim on encode.
    pub accession: String,
    pub description: String,
    /// Raw `MA` line remainder; its sub-fields are rewritten on encode.
    pub ma_line: String,
    /// Leading token of the `AC` line.
    pub number: String,
    pub motif: String,
    pub num_sequences: usize,
    pub percentile: i64,
    pub strength: i64,
    /// Identity of the block this matrix was derived from, when known.
    /// Provenance only; the block itself is not owned.
    pub block_id: Option<String>,
    /// Compiled motif patterns, lazily filled by the pattern compiler and
    /// owned by the matrix once computed.
    pub patterns: Option<Vec<Pattern>>,
    width: usize,
    /// Weight arena, `ALPHABET_SIZE * width`, row-major by residue code.
    weights: Vec<f64>,
}

impl Matrix {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            weights: vec![0.0; ALPHABET_SIZE * width],
            ..Self::default()
        }
    }

    /// Alignment column count.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Weight row for one residue code.
    pub fn row(&self, code: u8) -> &[f64] {
        let code = code as usize;
        &self.weights[code * self.width..(code + 1) * self.width]
    }

    pub fn get(&self, code: u8, column: usize) -> f64 {
        self.weights[code as usize * self.width + column]
    }

    pub fn set(&mut self, code: u8, column: usize, weight: f64) {
        self.weights[code as usize * self.width + column] = weight;
    }

    /// Widen the matrix, preserving existing weights. The whole arena is
    /// rebuilt so every row moves at once; new columns are zero.
    pub fn grow_columns(&mut self, new_width: usize) {
        if new_width <= self.width {
            return;
        }
        let mut weights = vec![0.0; ALPHABET_SIZE * new_width];
        for code in 0..ALPHABET_SIZE {
            let old = &self.weights[code * self.width..(code + 1) * self.width];
            weights[code * new_width..code * new_width + self.width].copy_from_slice(old);
        }
        self.weights = weights;
        self.width = new_width;
    }
}
