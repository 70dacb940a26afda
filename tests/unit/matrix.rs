//! Matrix record decode/encode tests.

use blockmat::alphabet::{aa, GAP_CODE, STOP_CODE};
use blockmat::error::{ReadError, Severity};
use blockmat::record::{write_matrix, MatrixColumns, NumericStyle};

use super::helpers::{decode_matrix, matrix_of, SMALL_MATRIX};

#[test]
fn test_decode_worked_example() {
    let decoded = matrix_of(SMALL_MATRIX);
    let matrix = &decoded.record;

    assert_eq!(matrix.id, "SMALL; MATRIX");
    assert_eq!(matrix.number, "BL00001");
    assert_eq!(matrix.motif, "ECA");
    assert_eq!(matrix.width(), 2);
    assert_eq!(matrix.num_sequences, 2);

    // Column 0 counts 1..=25 down the standard symbol order.
    assert_eq!(matrix.get(aa::A, 0), 1.0);
    assert_eq!(matrix.get(aa::B, 0), 2.0);
    assert_eq!(matrix.get(aa::Z, 0), 23.0);
    assert_eq!(matrix.get(STOP_CODE, 0), 24.0);
    assert_eq!(matrix.get(GAP_CODE, 0), 25.0);
    // Column 1 continues at 26.
    assert_eq!(matrix.get(aa::A, 1), 26.0);
    assert_eq!(matrix.get(GAP_CODE, 1), 50.0);
    assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);
}

#[test]
fn test_round_trip_preserves_weights() {
    let first = matrix_of(SMALL_MATRIX);
    let mut out = Vec::new();
    write_matrix(
        &mut out,
        &first.record,
        NumericStyle::Integer,
        MatrixColumns::Full,
    )
    .unwrap();
    let second = matrix_of(&String::from_utf8(out).unwrap());

    assert_eq!(second.record.width(), first.record.width());
    for code in 0..blockmat::alphabet::ALPHABET_SIZE as u8 {
        if code == blockmat::alphabet::UNKNOWN_CODE {
            continue;
        }
        assert_eq!(second.record.row(code), first.record.row(code), "row {code}");
    }
}

#[test]
fn test_nucleotide_columns_subset() {
    let decoded = matrix_of(SMALL_MATRIX);
    let mut out = Vec::new();
    write_matrix(
        &mut out,
        &decoded.record,
        NumericStyle::Integer,
        MatrixColumns::Nucleotide,
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();

    let mut lines = text.lines();
    let label = lines
        .find(|l| l.split_whitespace().collect::<Vec<_>>() == ["A", "C", "G", "T"])
        .expect("label line");
    assert_eq!(label.split_whitespace().count(), 4);
    // Column 0 weights for A, C, G, T are 1, 3, 7, 18.
    let first = lines.next().expect("first column line");
    assert_eq!(
        first.split_whitespace().collect::<Vec<_>>(),
        ["1", "3", "7", "18"]
    );
}

#[test]
fn test_missing_ma_line_is_serious() {
    let text = "\
ID   BARE; MATRIX
AC   BL00042;
//
";
    let decoded = matrix_of(text);
    assert_eq!(decoded.record.width(), 0);
    assert!(decoded
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Serious && d.message.contains("MA line missing")));
}

#[test]
fn test_extra_columns_grow_the_matrix() {
    let text = "\
MA   motif; width=1; seqs=1;
A B C D E F G H I K L M N P Q R S T V W X Y Z * -
1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1
2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2
3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3
//
";
    let decoded = matrix_of(text);
    assert_eq!(decoded.record.width(), 3);
    assert_eq!(decoded.record.get(aa::A, 0), 1.0);
    assert_eq!(decoded.record.get(aa::A, 2), 3.0);
    assert!(decoded
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("more columns")));
}

#[test]
fn test_short_column_line_defaults_missing_weights() {
    let text = "\
MA   motif; width=1; seqs=1;
A B C D E F G H I K L M N P Q R S T V W X Y Z * -
4 4 4
//
";
    let decoded = matrix_of(text);
    assert_eq!(decoded.record.get(aa::A, 0), 4.0);
    assert_eq!(decoded.record.get(aa::C, 0), 4.0);
    assert_eq!(decoded.record.get(aa::D, 0), 0.0);
    assert!(decoded
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("missing")));
}

#[test]
fn test_float_tokens_accepted_in_integer_bodies() {
    let text = "\
MA   motif; width=1; seqs=1;
A B C D E F G H I K L M N P Q R S T V W X Y Z * -
0.5 1.5 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2
//
";
    let decoded = matrix_of(text);
    assert_eq!(decoded.record.get(aa::A, 0), 0.5);
    assert_eq!(decoded.record.get(aa::B, 0), 1.5);
}

#[test]
fn test_words_starting_with_tag_letters_are_not_tags() {
    // "MACHINE" starts with the MA letters but is not a tag line; the
    // decoder must scan past it to the real record.
    let text = "\
MACHINE GENERATED FILE
MA   motif; width=1; seqs=1;
A B C D E F G H I K L M N P Q R S T V W X Y Z * -
5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5 5
//
";
    let decoded = matrix_of(text);
    assert_eq!(decoded.record.width(), 1);
    assert_eq!(decoded.record.motif, "motif");
    assert_eq!(decoded.record.get(aa::A, 0), 5.0);
    assert!(!decoded
        .diagnostics
        .iter()
        .any(|d| d.message.contains("MA line missing")));
}

#[test]
fn test_block_header_aborts_the_record() {
    let text = "ID   SMALL; BLOCK\nBL   motif; width=2;\n//\n";
    match decode_matrix(text) {
        Err(ReadError::NotAMatrix { line }) => assert!(line.contains("BLOCK")),
        other => panic!("expected NotAMatrix, got {other:?}"),
    }
}

#[test]
fn test_no_record_at_eof() {
    assert!(decode_matrix("").unwrap().is_none());
}
