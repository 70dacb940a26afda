//! Header-line helpers shared by the block and matrix decoders.
//!
//! The `AC` line and the `BL`/`MA` annotation line use the same loose
//! grammar in both formats: free text with `key=value` sub-fields scanned
//! independently, so one missing field never hides another.

use std::str::FromStr;

/// Family codes are never trimmed shorter than this.
const MIN_FAMILY_LEN: usize = 7;

/// Recognized annotation sub-field keys, in rewrite order.
const ANNOTATION_KEYS: [&str; 4] = ["width=", "seqs=", "99.5%=", "strength="];

/// Parsed `AC` line contents.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Accession {
    /// Leading token, trailing separator stripped.
    pub number: String,
    /// Number with trailing non-alphabetic characters trimmed, floored at
    /// [`MIN_FAMILY_LEN`] characters.
    pub family: String,
    /// Distance bounds from the previous block, from `block=(min,max)`.
    pub prev_block: Option<(usize, usize)>,
}

pub(crate) fn parse_accession(rest: &str) -> Accession {
    let number = rest
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(';')
        .to_string();
    let family = family_of(&number);
    let prev_block = parse_prev_block(rest);
    Accession {
        number,
        family,
        prev_block,
    }
}

fn family_of(number: &str) -> String {
    let mut end = number.len();
    while end > MIN_FAMILY_LEN
        && !number[..end]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphabetic())
    {
        end -= 1;
    }
    number[..end].to_string()
}

fn parse_prev_block(rest: &str) -> Option<(usize, usize)> {
    let start = rest.find("block=(")? + "block=(".len();
    let close = rest[start..].find(')')? + start;
    let mut parts = rest[start..close].splitn(2, ',');
    let min = parts.next()?.trim().parse().ok()?;
    let max = parts.next()?.trim().parse().ok()?;
    Some((min, max))
}

/// Parsed `BL`/`MA` annotation sub-fields. Each is scanned for on its own;
/// `None` means the key was absent or unparseable.
#[derive(Debug, Default)]
pub(crate) struct Annotation {
    pub motif: String,
    pub width: Option<usize>,
    pub seqs: Option<usize>,
    pub percentile: Option<i64>,
    pub strength: Option<i64>,
}

pub(crate) fn parse_annotation(rest: &str) -> Annotation {
    Annotation {
        motif: parse_motif(rest),
        width: scan_number(rest, "width="),
        seqs: scan_number(rest, "seqs="),
        percentile: scan_number(rest, "99.5%="),
        strength: scan_number(rest, "strength="),
    }
}

/// First token of the annotation, unless it is already a `key=value`
/// sub-field.
fn parse_motif(rest: &str) -> String {
    let first = rest.split_whitespace().next().unwrap_or("");
    if first.contains('=') {
        return String::new();
    }
    first.trim_end_matches(';').to_string()
}

/// Scan for `key` and parse the run of number characters after it.
pub(crate) fn scan_number<T: FromStr>(text: &str, key: &str) -> Option<T> {
    let start = text.find(key)? + key.len();
    let tail = &text[start..];
    let end = tail
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+')
        .unwrap_or(tail.len());
    tail[..end].parse().ok()
}

/// Rewrite an annotation line's sub-fields in place: keep whatever text
/// precedes the first recognized key, then render the current field values.
/// When no key was present the fields are appended to the original text.
pub(crate) fn render_annotation(
    raw: &str,
    width: usize,
    seqs: usize,
    percentile: i64,
    strength: i64,
) -> String {
    let cut = ANNOTATION_KEYS
        .iter()
        .filter_map(|key| raw.find(key))
        .min()
        .unwrap_or(raw.len());
    let mut prefix = raw[..cut].trim_end().to_string();
    if !prefix.is_empty() {
        prefix.push(' ');
    }
    format!("{prefix}width={width}; seqs={seqs}; 99.5%={percentile}; strength={strength}")
}
