//! Motif pattern compiler.
//!
//! Compilation turns each pattern string of a matrix's pattern-file record
//! into a [`Pattern`]. Constraints are first sorted through an ordered
//! multiset keyed by (set size, residue set), which both makes the chain
//! deterministic and puts the most selective constraint first; the multiset
//! is caller-supplied scratch, filled and fully drained on every call so a
//! single long-lived instance can serve every compilation.

use std::cmp::Ordering;

use crate::collection::{Duplicates, SkipList};
use crate::error::ReadError;
use crate::record::Matrix;

use super::source::PatternSource;
use super::{Pattern, PatternResidue};

use crate::alphabet::aa_code;

/// Wildcard letter in a motif string.
const WILDCARD: u8 = b'x';

/// Accession prefixes (`BL`, `MA`, `PS`...) are this long; records are
/// matched on the accession text after the prefix.
const ACCESSION_PREFIX_LEN: usize = 2;

const HEADER_TAGS: [&str; 6] = ["ID", "AC", "DE", "CC", "MA", "BL"];

/// Pattern compilation switches.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// When false, `compile_for` is a no-op.
    pub enabled: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A constraint awaiting chain assembly: its character offset in the
/// motif string and its acceptable residue codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDraft {
    pub offset: i32,
    pub residues: Vec<u8>,
}

/// Smaller sets first, ties broken lexicographically by residue set.
/// Offsets deliberately do not participate: the order exists to make chain
/// assembly deterministic and selective-first, not to sort positions.
fn draft_order(a: &ConstraintDraft, b: &ConstraintDraft) -> Ordering {
    a.residues
        .len()
        .cmp(&b.residues.len())
        .then_with(|| a.residues.cmp(&b.residues))
}

/// Scratch container for pattern compilation.
pub type DraftList = SkipList<ConstraintDraft, fn(&ConstraintDraft, &ConstraintDraft) -> Ordering>;

pub fn new_draft_list() -> DraftList {
    SkipList::new(draft_order, Duplicates::Allow)
}

/// Compile the patterns for `matrix` from its pattern-file record.
///
/// A no-op when compilation is disabled or the matrix already holds
/// compiled patterns. When no record matches the matrix's accession the
/// matrix is left untouched.
pub fn compile_for<S: PatternSource>(
    matrix: &mut Matrix,
    source: &mut S,
    scratch: &mut DraftList,
    options: &CompileOptions,
) -> Result<(), ReadError> {
    if !options.enabled || matrix.patterns.is_some() {
        return Ok(());
    }
    let target = match accession_suffix(&matrix.number) {
        Some(suffix) if !suffix.is_empty() => suffix.to_string(),
        _ => {
            log::warn!(
                "matrix {:?} has no usable accession; skipping pattern compilation",
                matrix.number
            );
            return Ok(());
        }
    };

    source.rewind()?;
    loop {
        while let Some(line) = source.next_line()? {
            if !is_tag_line(&line, "AC") {
                continue;
            }
            let accession = line[ACCESSION_PREFIX_LEN..]
                .split_whitespace()
                .next()
                .unwrap_or("")
                .trim_end_matches(';');
            if accession_suffix(accession) == Some(target.as_str()) {
                matrix.patterns = Some(compile_record(source, scratch)?);
                return Ok(());
            }
        }
        if !source.advance()? {
            break;
        }
    }
    log::warn!("no pattern record found for accession {}", matrix.number);
    Ok(())
}

fn accession_suffix(accession: &str) -> Option<&str> {
    accession.get(ACCESSION_PREFIX_LEN..)
}

/// A header tag is two letters followed by whitespace (or nothing); a
/// motif string may also begin with those letters, so the distinction
/// matters.
fn is_tag_line(line: &str, tag: &str) -> bool {
    line.starts_with(tag)
        && line[tag.len()..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace)
}

fn is_any_tag_line(line: &str) -> bool {
    HEADER_TAGS.iter().any(|tag| is_tag_line(line, tag))
}

/// Compile every body line of the record the source is positioned in,
/// stopping at the `//` terminator, the next record, or end of input.
fn compile_record<S: PatternSource>(
    source: &mut S,
    scratch: &mut DraftList,
) -> Result<Vec<Pattern>, ReadError> {
    let mut patterns = Vec::new();
    let mut in_body = false;
    while let Some(line) = source.next_line()? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("//") {
            break;
        }
        if is_any_tag_line(trimmed) {
            if in_body {
                break;
            }
            continue;
        }
        in_body = true;
        if let Some(text) = trimmed.split_whitespace().next() {
            if let Some(pattern) = compile_pattern(text, scratch) {
                patterns.push(pattern);
            }
        }
    }
    Ok(patterns)
}

/// Compile one motif string. Returns `None` when the string has no
/// constrained position at all.
pub fn compile_pattern(text: &str, scratch: &mut DraftList) -> Option<Pattern> {
    debug_assert!(scratch.is_empty(), "scratch list must start empty");

    let bytes = text.as_bytes();
    let mut offset = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'[' => {
                // Splice the bracketed set out: it occupies one position.
                let end = bytes[i + 1..]
                    .iter()
                    .position(|&b| b == b']')
                    .map(|n| i + 1 + n)
                    .unwrap_or(bytes.len());
                let mut residues: Vec<u8> = bytes[i + 1..end]
                    .iter()
                    .filter(|b| b.is_ascii_alphabetic())
                    .map(|&b| aa_code(b))
                    .collect();
                residues.sort_unstable();
                residues.dedup();
                if !residues.is_empty() {
                    let _ = scratch.insert(ConstraintDraft { offset, residues });
                }
                offset += 1;
                i = end + 1;
            }
            WILDCARD | b'X' => {
                offset += 1;
                i += 1;
            }
            b']' => {
                // Stray close bracket; it occupies no position.
                i += 1;
            }
            other => {
                let _ = scratch.insert(ConstraintDraft {
                    offset,
                    residues: vec![aa_code(other)],
                });
                offset += 1;
                i += 1;
            }
        }
    }

    let first = scratch.pop_front()?;
    let anchor = first.offset;
    let mut residues = vec![PatternResidue {
        offset: 0,
        residues: first.residues,
    }];
    while let Some(draft) = scratch.pop_front() {
        residues.push(PatternResidue {
            offset: draft.offset - anchor,
            residues: draft.residues,
        });
    }
    Some(Pattern {
        offset: anchor,
        residues,
    })
}
