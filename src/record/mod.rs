//! Decoders and encoders for the two Blocks database record formats.
//!
//! Both formats are line-oriented: a handful of tagged header lines
//! (`ID`/`AC`/`DE` plus `BL` for blocks or `MA` for matrices), a body, and
//! a `//` terminator. The decoders scan forward from wherever the stream
//! is positioned, consume at most one record per call, and leave the
//! stream just past it.

pub mod block;
pub mod block_read;
pub mod block_write;
mod header;
pub mod matrix;
pub mod matrix_read;
pub mod matrix_write;
pub mod reader;

pub use block::{Block, Cluster, Sequence};
pub use block_read::read_block;
pub use block_write::write_block;
pub use matrix::Matrix;
pub use matrix_read::read_matrix;
pub use matrix_write::{write_matrix, MatrixColumns};
pub use reader::LineCursor;

use crate::error::{Diagnostic, Severity};

/// Record a defect: forward it to the log facade and keep it with the
/// record being decoded.
pub(crate) fn note(diagnostics: &mut Vec<Diagnostic>, severity: Severity, message: String) {
    let diagnostic = Diagnostic::new(severity, message);
    diagnostic.emit();
    diagnostics.push(diagnostic);
}

/// How numeric fields are rendered on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericStyle {
    /// Weights rounded to integers.
    Integer,
    /// Weights with a fixed-precision fraction.
    Float,
}

/// A decoded record together with every defect found while reading it.
#[derive(Debug)]
pub struct Decoded<T> {
    pub record: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Decoded<T> {
    pub fn new(record: T) -> Self {
        Self {
            record,
            diagnostics: Vec::new(),
        }
    }

    /// Worst severity among the accumulated diagnostics.
    pub fn max_severity(&self) -> Option<crate::error::Severity> {
        self.diagnostics.iter().map(|d| d.severity).max()
    }
}
