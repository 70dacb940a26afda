//! Matrix record decoder.
//!
//! Mirrors the block decoder's state machine but recognizes bare 2-letter
//! tags (`ID`/`AC`/`DE`/`MA`) and is less forgiving: every absent header
//! line gets its own diagnostic, and a missing `MA` line is serious. The
//! body is one line per alignment column after a label line, each line
//! one numeric token per matrix symbol. Tokens parse as floats whichever
//! numeric style the record nominally uses.

use std::io::BufRead;

use crate::error::{Diagnostic, ReadError, Severity};

use super::header::{parse_accession, parse_annotation};
use super::matrix::Matrix;
use super::note;
use super::reader::LineCursor;
use super::Decoded;
use crate::alphabet::MATRIX_AA_ORDER;

const TAG_ID: &str = "ID";
const TAG_AC: &str = "AC";
const TAG_DE: &str = "DE";
const TAG_MA: &str = "MA";
const END_MARKER: &str = "//";
const BLOCK_MARKER: &str = "BLOCK";

/// A bare tag is the two letters followed by whitespace or end of line;
/// an ordinary word starting with the same letters is not a tag.
fn tag_line(line: &str, tag: &str) -> bool {
    line.starts_with(tag)
        && line[tag.len()..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace)
}

fn matrix_tag(line: &str) -> bool {
    [TAG_ID, TAG_AC, TAG_DE, TAG_MA]
        .iter()
        .any(|tag| tag_line(line, tag))
}

/// Text after the 2-character tag.
fn rest(line: &str) -> &str {
    line[TAG_ID.len()..].trim()
}

/// Decode the next matrix record from the stream.
///
/// Returns `Ok(None)` when the input ends before any record starts.
pub fn read_matrix<R: BufRead>(
    cursor: &mut LineCursor<R>,
) -> Result<Option<Decoded<Matrix>>, ReadError> {
    let first = loop {
        match cursor.next_line()? {
            None => return Ok(None),
            Some(line) if matrix_tag(&line) => break line,
            Some(_) => continue,
        }
    };

    let mut diags: Vec<Diagnostic> = Vec::new();
    let mut cur = Some(first);

    let mut id = String::new();
    let mut accession = String::new();
    let mut description = String::new();
    let mut number = String::new();

    if cur.as_deref().is_some_and(|l| tag_line(l, TAG_ID)) {
        let line = cur.take().unwrap_or_default();
        if line.contains(BLOCK_MARKER) {
            return Err(ReadError::NotAMatrix { line });
        }
        id = rest(&line).to_string();
        cur = cursor.next_line()?;
    } else {
        note(
            &mut diags,
            Severity::Info,
            "ID line missing from matrix record".to_string(),
        );
    }

    if cur.as_deref().is_some_and(|l| tag_line(l, TAG_AC)) {
        let line = cur.take().unwrap_or_default();
        accession = rest(&line).to_string();
        number = parse_accession(&accession).number;
        cur = cursor.next_line()?;
    } else {
        note(
            &mut diags,
            Severity::Info,
            "AC line missing from matrix record".to_string(),
        );
    }

    if cur.as_deref().is_some_and(|l| tag_line(l, TAG_DE)) {
        let line = cur.take().unwrap_or_default();
        description = rest(&line).to_string();
        cur = cursor.next_line()?;
    } else {
        note(
            &mut diags,
            Severity::Info,
            "DE line missing from matrix record".to_string(),
        );
    }

    while cur.as_deref().is_some_and(|l| l.trim().is_empty()) {
        cur = cursor.next_line()?;
    }

    let mut ma_line = String::new();
    let annotation = if cur.as_deref().is_some_and(|l| tag_line(l, TAG_MA)) {
        let line = cur.take().unwrap_or_default();
        ma_line = rest(&line).to_string();
        cur = cursor.next_line()?;
        parse_annotation(&ma_line)
    } else {
        note(
            &mut diags,
            Severity::Serious,
            "MA line missing from matrix record; all fields defaulted".to_string(),
        );
        Default::default()
    };

    let width = match annotation.width {
        Some(w) => w,
        None => {
            note(
                &mut diags,
                Severity::Serious,
                "width= missing from MA line; width set to 0".to_string(),
            );
            0
        }
    };

    for (field, value) in [("99.5%=", &annotation.percentile), ("strength=", &annotation.strength)]
    {
        if value.is_none() {
            note(
                &mut diags,
                Severity::Info,
                format!("{field} missing from MA line; using 0"),
            );
        }
    }

    let mut matrix = Matrix::new(width);
    matrix.id = id;
    matrix.accession = accession;
    matrix.description = description;
    matrix.ma_line = ma_line;
    matrix.number = number;
    matrix.motif = annotation.motif;
    matrix.num_sequences = annotation.seqs.unwrap_or(0);
    matrix.percentile = annotation.percentile.unwrap_or(0);
    matrix.strength = annotation.strength.unwrap_or(0);

    // Body: a label line naming the columns, then one line per position.
    let mut saw_label = false;
    let mut column = 0;
    let mut grew = false;
    loop {
        let line = match cur.take() {
            Some(line) => line,
            None => match cursor.next_line()? {
                Some(line) => line,
                None => {
                    note(
                        &mut diags,
                        Severity::Warning,
                        "matrix record not terminated by //".to_string(),
                    );
                    break;
                }
            },
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with(END_MARKER) {
            break;
        }
        if matrix_tag(&line) {
            note(
                &mut diags,
                Severity::Warning,
                "next record begins before // terminator".to_string(),
            );
            cursor.unread(line);
            break;
        }
        if !saw_label {
            saw_label = true;
            continue;
        }
        if column >= matrix.width() {
            if !grew {
                // Body columns against a declared width of zero mean the
                // header was unusable, not merely short.
                let severity = if matrix.width() == 0 {
                    Severity::Serious
                } else {
                    Severity::Warning
                };
                note(
                    &mut diags,
                    severity,
                    format!(
                        "matrix has more columns than the declared width {}; growing",
                        matrix.width()
                    ),
                );
                grew = true;
            }
            matrix.grow_columns(column + 1);
        }
        parse_column_line(trimmed, &mut matrix, column, &mut diags);
        column += 1;
    }

    if column < matrix.width() {
        note(
            &mut diags,
            Severity::Serious,
            format!(
                "matrix body has {column} columns but the declared width is {}",
                matrix.width()
            ),
        );
    }

    Ok(Some(Decoded {
        record: matrix,
        diagnostics: diags,
    }))
}

/// One numeric token per symbol in [`MATRIX_AA_ORDER`]; short lines
/// default the missing trailing weights to 0.
fn parse_column_line(line: &str, matrix: &mut Matrix, column: usize, diags: &mut Vec<Diagnostic>) {
    let mut tokens = line.split_whitespace();
    let mut missing = 0;
    for &code in MATRIX_AA_ORDER.iter() {
        match tokens.next() {
            Some(token) => match token.parse() {
                Ok(weight) => matrix.set(code, column, weight),
                Err(_) => {
                    note(
                        diags,
                        Severity::Warning,
                        format!("unreadable weight {token:?} in matrix column {column}; using 0"),
                    );
                    matrix.set(code, column, 0.0);
                }
            },
            None => missing += 1,
        }
    }
    if missing > 0 {
        note(
            diags,
            Severity::Warning,
            format!("matrix column {column} is missing {missing} weights; using 0"),
        );
    }
}
