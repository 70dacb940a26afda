//! Block record decoder.
//!
//! Header lines carry a case-sensitive two-letter tag in a 5-character
//! field (`ID   `, `AC   `, `DE   `, `BL   `). The body is one line per
//! sequence, grouped into clusters separated by blank lines, ending at
//! `//`. Every defect short of an I/O failure or a wrong-kind record is
//! repaired: fields default, over-long rows are trimmed, short rows are
//! padded, and each repair is reported as a diagnostic.

use std::io::BufRead;

use crate::alphabet::{aa_code, GAP_CODE};
use crate::error::{Diagnostic, ReadError, Severity};

use super::block::{Block, Cluster, Sequence, DEFAULT_SEQ_INCREMENT, DEFAULT_WEIGHT};
use super::header::{parse_accession, parse_annotation};
use super::note;
use super::reader::LineCursor;
use super::Decoded;

const TAG_ID: &str = "ID   ";
const TAG_AC: &str = "AC   ";
const TAG_DE: &str = "DE   ";
const TAG_BL: &str = "BL   ";
const TAG_COMMENT: &str = "CC";
const END_MARKER: &str = "//";
const MATRIX_MARKER: &str = "MATRIX";

fn block_tag(line: &str) -> bool {
    line.starts_with(TAG_ID)
        || line.starts_with(TAG_AC)
        || line.starts_with(TAG_DE)
        || line.starts_with(TAG_BL)
}

/// Text after the 5-character tag field.
fn rest(line: &str) -> &str {
    line[TAG_ID.len()..].trim()
}

/// Decode the next block record from the stream.
///
/// Skips forward over unrelated lines until a recognized tag appears.
/// Returns `Ok(None)` when the input ends before any record starts; the
/// stream is left just past the consumed record otherwise.
pub fn read_block<R: BufRead>(
    cursor: &mut LineCursor<R>,
) -> Result<Option<Decoded<Block>>, ReadError> {
    // Scan to the first recognized tag line.
    let first = loop {
        match cursor.next_line()? {
            None => return Ok(None),
            Some(line) if block_tag(&line) => break line,
            Some(_) => continue,
        }
    };

    let mut diags: Vec<Diagnostic> = Vec::new();
    let mut cur = Some(first);

    let mut id = String::new();
    let mut accession = String::new();
    let mut description = String::new();
    let mut number = String::new();
    let mut family = String::new();
    let mut prev_block = None;
    let mut saw_id = false;
    let mut saw_ac = false;

    // ID
    if cur.as_deref().is_some_and(|l| l.starts_with(TAG_ID)) {
        let line = cur.take().unwrap_or_default();
        if line.contains(MATRIX_MARKER) {
            return Err(ReadError::NotABlock { line });
        }
        id = rest(&line).to_string();
        saw_id = true;
        // Comment lines may follow the ID line.
        cur = loop {
            match cursor.next_line()? {
                Some(l) if l.starts_with(TAG_COMMENT) => continue,
                other => break other,
            }
        };
    }

    // AC
    if cur.as_deref().is_some_and(|l| l.starts_with(TAG_AC)) {
        let line = cur.take().unwrap_or_default();
        accession = rest(&line).to_string();
        let parsed = parse_accession(&accession);
        number = parsed.number;
        family = parsed.family;
        prev_block = parsed.prev_block;
        saw_ac = true;
        cur = cursor.next_line()?;
    }

    // DE
    if cur.as_deref().is_some_and(|l| l.starts_with(TAG_DE)) {
        let line = cur.take().unwrap_or_default();
        description = rest(&line).to_string();
        cur = cursor.next_line()?;
    } else if !saw_id && !saw_ac {
        note(
            &mut diags,
            Severity::Warning,
            "block record has no ID, AC or DE line".to_string(),
        );
    }

    while cur.as_deref().is_some_and(|l| l.trim().is_empty()) {
        cur = cursor.next_line()?;
    }

    // BL
    let mut bl_line = String::new();
    let annotation = if cur.as_deref().is_some_and(|l| l.starts_with(TAG_BL)) {
        let line = cur.take().unwrap_or_default();
        bl_line = rest(&line).to_string();
        cur = cursor.next_line()?;
        parse_annotation(&bl_line)
    } else {
        note(
            &mut diags,
            Severity::Serious,
            "BL line missing from block record; all fields defaulted".to_string(),
        );
        Default::default()
    };

    let width = match annotation.width {
        Some(w) => w,
        None => {
            note(
                &mut diags,
                Severity::Serious,
                "width= missing from BL line; width set to 0".to_string(),
            );
            0
        }
    };
    let expected_rows = match annotation.seqs {
        Some(n) if n > 0 => n,
        _ => {
            note(
                &mut diags,
                Severity::Info,
                format!("seqs= missing from BL line; provisioning {DEFAULT_SEQ_INCREMENT} rows"),
            );
            DEFAULT_SEQ_INCREMENT
        }
    };

    for (field, value) in [("99.5%=", &annotation.percentile), ("strength=", &annotation.strength)]
    {
        if value.is_none() {
            note(
                &mut diags,
                Severity::Info,
                format!("{field} missing from BL line; using 0"),
            );
        }
    }

    let mut block = Block::with_width(width, expected_rows);
    block.id = id;
    block.accession = accession;
    block.description = description;
    block.bl_line = bl_line;
    block.number = number;
    block.family = family;
    block.prev_block = prev_block;
    block.motif = annotation.motif;
    block.percentile = annotation.percentile.unwrap_or(0);
    block.strength = annotation.strength.unwrap_or(0);

    // Body: sequence lines in cluster groups.
    let mut cluster_start = 0;
    let mut in_cluster = false;
    loop {
        let line = match cur.take() {
            Some(line) => line,
            None => match cursor.next_line()? {
                Some(line) => line,
                None => {
                    note(
                        &mut diags,
                        Severity::Warning,
                        "block record not terminated by //".to_string(),
                    );
                    break;
                }
            },
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if in_cluster {
                block.clusters.push(Cluster {
                    start: cluster_start,
                    count: block.num_sequences() - cluster_start,
                });
                in_cluster = false;
            }
            continue;
        }
        if trimmed.starts_with(END_MARKER) {
            break;
        }
        if block_tag(&line) {
            note(
                &mut diags,
                Severity::Warning,
                "next record begins before // terminator".to_string(),
            );
            cursor.unread(line);
            break;
        }
        let (sequence, row) = parse_sequence_line(&line, width, &mut diags);
        if !in_cluster {
            in_cluster = true;
            cluster_start = block.num_sequences();
        }
        block.push_sequence(sequence, &row);
    }
    if in_cluster {
        block.clusters.push(Cluster {
            start: cluster_start,
            count: block.num_sequences() - cluster_start,
        });
    }

    Ok(Some(Decoded {
        record: block,
        diagnostics: diags,
    }))
}

/// Parse one `name (start) RESIDUES [weight]` body line, normalizing the
/// residue row to exactly `width` codes.
fn parse_sequence_line(
    line: &str,
    width: usize,
    diags: &mut Vec<Diagnostic>,
) -> (Sequence, Vec<u8>) {
    let (name, start, tail) = match (line.find('('), line.find(')')) {
        (Some(open), Some(close)) if close > open => {
            let name = line[..open].trim().to_string();
            let start = match line[open + 1..close].trim().parse() {
                Ok(start) => start,
                Err(_) => {
                    note(
                        &mut *diags,
                        Severity::Warning,
                        format!("unreadable start position for sequence {name}; using 1"),
                    );
                    1
                }
            };
            (name, start, &line[close + 1..])
        }
        _ => {
            let name = line.split_whitespace().next().unwrap_or("").to_string();
            note(
                &mut *diags,
                Severity::Warning,
                format!("sequence line for {name} has no (start) field; using 1"),
            );
            let after = line.trim_start().strip_prefix(&name).unwrap_or("");
            (name, 1, after)
        }
    };

    let mut tokens = tail.split_whitespace();
    let residue_text = tokens.next().unwrap_or("");
    let weight = match tokens.next() {
        Some(token) => token.parse().unwrap_or_else(|_| {
            note(
                &mut *diags,
                Severity::Warning,
                format!("unreadable weight for sequence {name}; using {DEFAULT_WEIGHT}"),
            );
            DEFAULT_WEIGHT
        }),
        None => DEFAULT_WEIGHT,
    };

    let mut row: Vec<u8> = residue_text.bytes().map(aa_code).collect();
    if row.len() > width {
        note(
            &mut *diags,
            Severity::Warning,
            format!(
                "sequence {name} has {} residues but the block is {width} wide; extras dropped",
                row.len()
            ),
        );
        row.truncate(width);
    } else if row.len() < width {
        note(
            &mut *diags,
            Severity::Warning,
            format!(
                "sequence {name} has {} residues but the block is {width} wide; padded with gaps",
                row.len()
            ),
        );
        row.resize(width, GAP_CODE);
    }

    (
        Sequence {
            name,
            start,
            length: width,
            weight,
        },
        row,
    )
}
