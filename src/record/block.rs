//! In-memory representation of a multiple-sequence-alignment block.
//!
//! Residues for all sequences live in one arena owned by the block; a
//! sequence's row is addressed as `row * width`, so growing the block never
//! invalidates anything. Clusters partition the sequence list into
//! contiguous runs.

use crate::alphabet::GAP_CODE;

/// How many sequence slots to provision when the header does not say.
pub const DEFAULT_SEQ_INCREMENT: usize = 50;

/// Weight assigned when a sequence line carries none.
pub const DEFAULT_WEIGHT: f64 = 100.0;

/// One member sequence of a block. Residue data lives in the block's arena.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    pub name: String,
    /// 1-based start position within the source sequence.
    pub start: usize,
    /// Number of aligned residues (equals the block width).
    pub length: usize,
    pub weight: f64,
}

/// A contiguous run of sequences sharing alignment provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    /// Index of the cluster's first sequence.
    pub start: usize,
    /// Number of sequences in the cluster.
    pub count: usize,
}

/// An ungapped multiple-sequence-alignment record.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub id: String,
    /// Raw `AC` line remainder, re-rendered verbatim on encode.
    pub accession: String,
    pub description: String,
    /// Raw `BL` line remainder; its sub-fields are rewritten on encode.
    pub bl_line: String,
    /// Leading token of the `AC` line.
    pub number: String,
    /// Family code derived from `number`.
    pub family: String,
    pub motif: String,
    pub percentile: i64,
    pub strength: i64,
    /// `(min, max)` distance from the previous block, when annotated.
    pub prev_block: Option<(usize, usize)>,
    pub sequences: Vec<Sequence>,
    pub clusters: Vec<Cluster>,
    width: usize,
    /// Residue arena, `width * sequences.len()` codes, row-major.
    residues: Vec<u8>,
}

impl Block {
    /// An empty fixed-size block: `rows` unnamed sequences of `cols` gap
    /// residues, grouped into one cluster.
    pub fn new(rows: usize, cols: usize) -> Self {
        let sequences = vec![
            Sequence {
                name: String::new(),
                start: 1,
                length: cols,
                weight: 0.0,
            };
            rows
        ];
        let clusters = if rows > 0 {
            vec![Cluster {
                start: 0,
                count: rows,
            }]
        } else {
            Vec::new()
        };
        Self {
            sequences,
            clusters,
            width: cols,
            residues: vec![GAP_CODE; rows * cols],
            ..Self::default()
        }
    }

    /// A block with no sequence slots yet; the decoder grows it row by row.
    pub(crate) fn with_width(width: usize, expected_rows: usize) -> Self {
        let mut block = Self {
            width,
            ..Self::default()
        };
        block.sequences.reserve(expected_rows);
        block.residues.reserve(width * expected_rows);
        block
    }

    /// Alignment column count.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    /// Residue row for one sequence.
    pub fn residues(&self, row: usize) -> &[u8] {
        &self.residues[row * self.width..(row + 1) * self.width]
    }

    pub fn residues_mut(&mut self, row: usize) -> &mut [u8] {
        &mut self.residues[row * self.width..(row + 1) * self.width]
    }

    /// Append a sequence and its residue row. `row` must already be
    /// exactly `width` long.
    pub fn push_sequence(&mut self, sequence: Sequence, row: &[u8]) {
        debug_assert_eq!(row.len(), self.width);
        self.sequences.push(sequence);
        self.residues.extend_from_slice(row);
    }

    /// Append `extra_rows` gap-filled unnamed sequences to the last
    /// cluster (creating one if the block has none).
    pub fn grow(&mut self, extra_rows: usize) {
        let first_new = self.sequences.len();
        for _ in 0..extra_rows {
            self.sequences.push(Sequence {
                name: String::new(),
                start: 1,
                length: self.width,
                weight: 0.0,
            });
        }
        self.residues
            .resize(self.sequences.len() * self.width, GAP_CODE);
        match self.clusters.last_mut() {
            Some(cluster) => cluster.count += extra_rows,
            None => self.clusters.push(Cluster {
                start: first_new,
                count: extra_rows,
            }),
        }
    }

    /// Check that cluster ranges concatenate to exactly
    /// `0..num_sequences`, in order, with no gaps or overlaps.
    pub fn clusters_cover_sequences(&self) -> bool {
        let mut next = 0;
        for cluster in &self.clusters {
            if cluster.start != next {
                return false;
            }
            next += cluster.count;
        }
        next == self.sequences.len()
    }
}
