//! Block record encoder.

use std::io::{self, Write};

use crate::alphabet::aa_char;

use super::block::Block;
use super::header::render_annotation;
use super::NumericStyle;

/// Column width for sequence names; longer names are truncated, cutting at
/// a delimiter near the limit when one exists.
const NAME_WIDTH: usize = 18;

/// How far back from the limit to look for a delimiter to cut at.
const NAME_CUT_SLACK: usize = 6;

const NAME_DELIMITERS: [char; 5] = ['|', '/', '_', '-', '.'];

/// Serialize a block. `ID`/`AC`/`DE` render verbatim; the `BL` line's
/// recognized sub-fields are rewritten from the block's current state.
pub fn write_block<W: Write>(out: &mut W, block: &Block, style: NumericStyle) -> io::Result<()> {
    if !block.id.is_empty() {
        writeln!(out, "ID   {}", block.id)?;
    }
    if !block.accession.is_empty() {
        writeln!(out, "AC   {}", block.accession)?;
    }
    if !block.description.is_empty() {
        writeln!(out, "DE   {}", block.description)?;
    }
    writeln!(
        out,
        "BL   {}",
        render_annotation(
            &block.bl_line,
            block.width(),
            block.num_sequences(),
            block.percentile,
            block.strength,
        )
    )?;

    for cluster in &block.clusters {
        for row in cluster.start..cluster.start + cluster.count {
            let sequence = &block.sequences[row];
            let residues: String = block
                .residues(row)
                .iter()
                .map(|&code| aa_char(code) as char)
                .collect();
            write!(
                out,
                "{:<name_width$} ({:>4}) {} ",
                truncate_name(&sequence.name),
                sequence.start,
                residues,
                name_width = NAME_WIDTH,
            )?;
            match style {
                NumericStyle::Integer => writeln!(out, "{}", sequence.weight.round() as i64)?,
                NumericStyle::Float => writeln!(out, "{:.4}", sequence.weight)?,
            }
        }
        writeln!(out)?;
    }
    writeln!(out, "//")?;
    Ok(())
}

fn truncate_name(name: &str) -> &str {
    if name.len() <= NAME_WIDTH {
        return name;
    }
    let mut limit = NAME_WIDTH;
    while !name.is_char_boundary(limit) {
        limit -= 1;
    }
    // Prefer a delimiter within the slack window over a mid-token cut.
    let mut window_start = limit.saturating_sub(NAME_CUT_SLACK);
    while !name.is_char_boundary(window_start) {
        window_start -= 1;
    }
    let cut = name[window_start..limit]
        .rfind(NAME_DELIMITERS)
        .map(|i| window_start + i)
        .unwrap_or(limit);
    &name[..cut]
}
