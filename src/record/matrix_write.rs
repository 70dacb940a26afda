//! Matrix record encoder.

use std::io::{self, Write};

use crate::alphabet::{aa_char, MATRIX_AA_ORDER, NUCLEOTIDE_CODES};

use super::header::render_annotation;
use super::matrix::Matrix;
use super::NumericStyle;

/// Which symbol columns to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixColumns {
    /// The full amino-acid column set.
    Full,
    /// Only the A/C/G/T columns.
    Nucleotide,
}

impl MatrixColumns {
    fn codes(self) -> &'static [u8] {
        match self {
            MatrixColumns::Full => &MATRIX_AA_ORDER,
            MatrixColumns::Nucleotide => &NUCLEOTIDE_CODES,
        }
    }
}

/// Serialize a matrix: verbatim header lines, rewritten `MA` sub-fields, a
/// column label line, one line per position, and the `//` terminator.
pub fn write_matrix<W: Write>(
    out: &mut W,
    matrix: &Matrix,
    style: NumericStyle,
    columns: MatrixColumns,
) -> io::Result<()> {
    if !matrix.id.is_empty() {
        writeln!(out, "ID   {}", matrix.id)?;
    }
    if !matrix.accession.is_empty() {
        writeln!(out, "AC   {}", matrix.accession)?;
    }
    if !matrix.description.is_empty() {
        writeln!(out, "DE   {}", matrix.description)?;
    }
    writeln!(
        out,
        "MA   {}",
        render_annotation(
            &matrix.ma_line,
            matrix.width(),
            matrix.num_sequences,
            matrix.percentile,
            matrix.strength,
        )
    )?;

    let codes = columns.codes();
    let field = match style {
        NumericStyle::Integer => 5,
        NumericStyle::Float => 10,
    };
    for &code in codes {
        write!(out, "{:>field$}", aa_char(code) as char, field = field)?;
    }
    writeln!(out)?;

    for column in 0..matrix.width() {
        for &code in codes {
            let weight = matrix.get(code, column);
            match style {
                NumericStyle::Integer => {
                    write!(out, "{:>field$}", weight.round() as i64, field = field)?
                }
                NumericStyle::Float => write!(out, "{:>field$.4}", weight, field = field)?,
            }
        }
        writeln!(out)?;
    }
    writeln!(out, "//")?;
    Ok(())
}
