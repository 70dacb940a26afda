//! Block record decode/encode tests.

use blockmat::alphabet::{aa, aa_code, GAP_CODE};
use blockmat::error::{ReadError, Severity};
use blockmat::record::{write_block, NumericStyle};

use super::helpers::{block_of, decode_block, SMALL_BLOCK};

#[test]
fn test_decode_worked_example() {
    let decoded = block_of(SMALL_BLOCK);
    let block = &decoded.record;

    assert_eq!(block.id, "SMALL; BLOCK");
    assert_eq!(block.number, "BL00001");
    assert_eq!(block.prev_block, Some((2, 17)));
    assert_eq!(block.motif, "ECA");
    assert_eq!(block.percentile, 1833);
    assert_eq!(block.strength, 1412);
    assert_eq!(block.width(), 4);
    assert_eq!(block.num_sequences(), 2);

    assert_eq!(block.sequences[0].name, "SEQ1_HUMAN");
    assert_eq!(block.sequences[0].start, 5);
    assert_eq!(block.sequences[0].weight, 50.0);
    assert_eq!(block.sequences[1].start, 9);
    assert_eq!(block.sequences[1].weight, 31.5);

    assert_eq!(block.residues(0), &[aa::A, aa::C, aa::D, aa::E]);
    assert_eq!(block.residues(1), &[aa::A, aa::G, aa::D, aa::E]);
    assert!(block.clusters_cover_sequences());
    assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);
}

#[test]
fn test_reencode_rewrites_bl_fields() {
    let decoded = block_of(SMALL_BLOCK);
    let mut out = Vec::new();
    write_block(&mut out, &decoded.record, NumericStyle::Integer).unwrap();
    let text = String::from_utf8(out).unwrap();

    let bl = text
        .lines()
        .find(|l| l.starts_with("BL   "))
        .expect("BL line present");
    assert!(bl.contains("width=4;"), "{bl}");
    assert!(bl.contains("seqs=2;"), "{bl}");
    assert!(bl.contains("99.5%=1833;"), "{bl}");
    assert!(bl.contains("strength=1412"), "{bl}");
    assert!(text.trim_end().ends_with("//"));
}

#[test]
fn test_round_trip_preserves_content() {
    let first = block_of(SMALL_BLOCK);
    let mut out = Vec::new();
    write_block(&mut out, &first.record, NumericStyle::Float).unwrap();
    let second = block_of(&String::from_utf8(out).unwrap());

    assert_eq!(second.record.width(), first.record.width());
    assert_eq!(second.record.num_sequences(), first.record.num_sequences());
    for row in 0..first.record.num_sequences() {
        assert_eq!(second.record.residues(row), first.record.residues(row));
        assert_eq!(
            second.record.sequences[row].weight,
            first.record.sequences[row].weight
        );
    }
    assert!(second.diagnostics.is_empty(), "{:?}", second.diagnostics);
}

#[test]
fn test_overlong_row_is_trimmed_with_warning() {
    let text = "\
BL   motif; width=4; seqs=2;
SEQ1_HUMAN (   5) ACDEFG 50.0
SEQ2_MOUSE (   9) AGDE 31.5
//
";
    let decoded = block_of(text);
    assert_eq!(decoded.record.width(), 4);
    assert_eq!(decoded.record.residues(0), &[aa::A, aa::C, aa::D, aa::E]);
    assert!(decoded
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("extras dropped")));
}

#[test]
fn test_short_row_is_padded_with_gaps() {
    let text = "\
BL   motif; width=4; seqs=1;
SEQ1_HUMAN (   5) AC 50.0
//
";
    let decoded = block_of(text);
    assert_eq!(decoded.record.residues(0), &[aa::A, aa::C, GAP_CODE, GAP_CODE]);
    assert!(decoded
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("padded")));
}

#[test]
fn test_missing_weight_defaults() {
    let text = "\
BL   motif; width=4; seqs=1;
SEQ1_HUMAN (   5) ACDE
//
";
    let decoded = block_of(text);
    assert_eq!(decoded.record.sequences[0].weight, 100.0);
}

#[test]
fn test_missing_bl_line_is_serious_not_fatal() {
    let text = "\
ID   ORPHAN; BLOCK
AC   BL00009;
DE   No annotation line at all
//
";
    let decoded = block_of(text);
    assert_eq!(decoded.record.width(), 0);
    assert_eq!(decoded.record.num_sequences(), 0);
    assert!(decoded
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Serious && d.message.contains("BL line missing")));
}

#[test]
fn test_matrix_header_aborts_the_record() {
    let text = "ID   SMALL; MATRIX\nMA   motif; width=2;\n//\n";
    match decode_block(text) {
        Err(ReadError::NotABlock { line }) => assert!(line.contains("MATRIX")),
        other => panic!("expected NotABlock, got {other:?}"),
    }
}

#[test]
fn test_no_record_at_eof() {
    assert!(decode_block("").unwrap().is_none());
    assert!(decode_block("random text\nwith no tags\n").unwrap().is_none());
}

#[test]
fn test_clusters_from_blank_line_groups() {
    let text = "\
BL   motif; width=3; seqs=5;
A_ONE (  1) ACD 10.0
A_TWO (  2) ACD 10.0

B_ONE (  3) CDE 20.0
B_TWO (  4) CDE 20.0
B_SIX (  5) CDE 20.0
//
";
    let decoded = block_of(text);
    let block = &decoded.record;
    assert_eq!(block.num_sequences(), 5);
    assert_eq!(block.clusters.len(), 2);
    assert_eq!((block.clusters[0].start, block.clusters[0].count), (0, 2));
    assert_eq!((block.clusters[1].start, block.clusters[1].count), (2, 3));
    assert!(block.clusters_cover_sequences());
}

#[test]
fn test_cluster_coverage_after_capacity_growth() {
    // Header promises one sequence; the body delivers many more, forcing
    // the sequence storage to grow past its initial allocation.
    let mut text = String::from("BL   motif; width=2; seqs=1;\n");
    for i in 0..120 {
        text.push_str(&format!("SEQ{i:03}_X (  1) AC 1.0\n"));
        if i % 40 == 39 {
            text.push('\n');
        }
    }
    text.push_str("//\n");

    let decoded = block_of(&text);
    let block = &decoded.record;
    assert_eq!(block.num_sequences(), 120);
    assert_eq!(block.clusters.len(), 3);
    assert!(block.clusters_cover_sequences());
    for row in 0..block.num_sequences() {
        assert_eq!(block.residues(row).len(), block.width());
        assert_eq!(block.residues(row), &[aa_code(b'A'), aa_code(b'C')]);
    }
}

#[test]
fn test_premature_next_record_is_pushed_back() {
    let text = "\
BL   motif; width=2; seqs=1;
SEQ_A (  1) AC 1.0
ID   NEXT; BLOCK
BL   motif; width=2; seqs=1;
SEQ_B (  1) CA 1.0
//
";
    let mut cursor = blockmat::record::LineCursor::new(std::io::Cursor::new(text.to_string()));
    let first = blockmat::record::read_block(&mut cursor)
        .unwrap()
        .expect("first record");
    assert_eq!(first.record.sequences[0].name, "SEQ_A");
    assert!(first
        .diagnostics
        .iter()
        .any(|d| d.message.contains("before // terminator")));

    let second = blockmat::record::read_block(&mut cursor)
        .unwrap()
        .expect("second record");
    assert_eq!(second.record.id, "NEXT; BLOCK");
    assert_eq!(second.record.sequences[0].name, "SEQ_B");
    assert!(blockmat::record::read_block(&mut cursor).unwrap().is_none());
}
