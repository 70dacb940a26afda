//! Compiled motif patterns and their matcher.
//!
//! A pattern is a terse motif string (`AB[CD]xE`: literal residues,
//! bracketed alternative sets, `x` wildcards) compiled into an anchor
//! offset plus a chain of acceptable-residue-set constraints. The chain is
//! ordered most-selective-first, so matching fails as early as possible.

pub mod compile;
pub mod source;

pub use compile::{compile_for, new_draft_list, CompileOptions, ConstraintDraft, DraftList};
pub use source::{FileGroup, MemorySource, PatternSource};

/// One compiled constraint: a set of acceptable residue codes at a fixed
/// displacement from the pattern's anchor constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternResidue {
    /// Displacement from the anchor constraint. The first constraint in
    /// the chain is the anchor itself, at displacement 0; later entries
    /// may sit before the anchor in the motif string, so this is signed.
    pub offset: i32,
    /// Acceptable residue codes, sorted.
    pub residues: Vec<u8>,
}

/// A compiled motif pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Displacement from the match anchor to the anchor constraint: the
    /// anchor constraint's character position in the motif string.
    pub offset: i32,
    /// Constraint chain in compilation order (most selective first).
    pub residues: Vec<PatternResidue>,
}

impl Pattern {
    /// Evaluate the pattern against a residue buffer, aligning the motif
    /// string's origin with `compare_start`.
    ///
    /// Constraints whose position falls outside the buffer are skipped
    /// rather than failed, so a pattern with no constraint in bounds
    /// always matches.
    pub fn matches(&self, residues: &[u8], compare_start: i32) -> bool {
        self.residues.iter().all(|constraint| {
            let pos = compare_start + self.offset + constraint.offset;
            if pos < 0 || pos as usize >= residues.len() {
                return true;
            }
            constraint.residues.contains(&residues[pos as usize])
        })
    }
}
