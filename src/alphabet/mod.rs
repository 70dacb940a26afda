//! Residue alphabet for the Blocks database formats.
//!
//! Residues are stored as small integer codes, one per amino-acid letter.
//! The alphabet has 26 codes: the gap symbol, the 23 amino-acid letters
//! (A-Z minus J, O and U, which the format never uses), the stop symbol,
//! and an unknown/other code. Matrix rows are indexed by these codes, so
//! every code gets a row even when the record never mentions it.

/// Number of residue codes, and the row count of every scoring matrix.
pub const ALPHABET_SIZE: usize = 26;

/// Code for the gap symbol `-` (also accepted as `.` on input).
pub const GAP_CODE: u8 = 0;

/// Code for the stop symbol `*`.
pub const STOP_CODE: u8 = 24;

/// Code for characters outside the alphabet.
pub const UNKNOWN_CODE: u8 = 25;

/// Residue codes for the amino-acid letters.
///
/// The letters run A-Z with J, O and U absent; codes are contiguous so a
/// matrix row index is just the code.
pub mod aa {
    pub const A: u8 = 1;
    pub const B: u8 = 2; // Asn or Asp
    pub const C: u8 = 3;
    pub const D: u8 = 4;
    pub const E: u8 = 5;
    pub const F: u8 = 6;
    pub const G: u8 = 7;
    pub const H: u8 = 8;
    pub const I: u8 = 9;
    pub const K: u8 = 10;
    pub const L: u8 = 11;
    pub const M: u8 = 12;
    pub const N: u8 = 13;
    pub const P: u8 = 14;
    pub const Q: u8 = 15;
    pub const R: u8 = 16;
    pub const S: u8 = 17;
    pub const T: u8 = 18;
    pub const V: u8 = 19;
    pub const W: u8 = 20;
    pub const X: u8 = 21; // unknown residue (distinct from out-of-alphabet)
    pub const Y: u8 = 22;
    pub const Z: u8 = 23; // Glu or Gln
}

/// Column order of a matrix body line: the 23 amino-acid letters in
/// alphabetical order, then the stop symbol, then the gap symbol.
pub const MATRIX_AA_ORDER: [u8; 25] = [
    aa::A,
    aa::B,
    aa::C,
    aa::D,
    aa::E,
    aa::F,
    aa::G,
    aa::H,
    aa::I,
    aa::K,
    aa::L,
    aa::M,
    aa::N,
    aa::P,
    aa::Q,
    aa::R,
    aa::S,
    aa::T,
    aa::V,
    aa::W,
    aa::X,
    aa::Y,
    aa::Z,
    STOP_CODE,
    GAP_CODE,
];

/// The 4-symbol subset used when a matrix is encoded for nucleotides.
pub const NUCLEOTIDE_CODES: [u8; 4] = [aa::A, aa::C, aa::G, aa::T];

/// Convert an ASCII residue character to its code.
///
/// Case-insensitive; `-` and `.` map to the gap code, `*` to the stop code,
/// and anything else outside the alphabet to [`UNKNOWN_CODE`].
#[inline(always)]
pub fn aa_code(ch: u8) -> u8 {
    const UNK: u8 = UNKNOWN_CODE;
    const TABLE: [u8; 128] = [
        UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK,
        UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK,
        UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, 24, UNK, UNK, 0, 0, UNK,
        //                                          '*'            '-' '.'
        UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK, UNK,
        UNK, 1, 2, 3, 4, 5, 6, 7, 8, 9, UNK, 10, 11, 12, 13, UNK,
        //   A  B  C  D  E  F  G  H  I   J   K   L   M   N   O
        14, 15, 16, 17, 18, UNK, 19, 20, 21, 22, 23, UNK, UNK, UNK, UNK, UNK,
        // P  Q   R   S   T   U   V   W   X   Y   Z
        UNK, 1, 2, 3, 4, 5, 6, 7, 8, 9, UNK, 10, 11, 12, 13, UNK,
        //   a  b  c  d  e  f  g  h  i   j   k   l   m   n   o
        14, 15, 16, 17, 18, UNK, 19, 20, 21, 22, 23, UNK, UNK, UNK, UNK, UNK,
        // p  q   r   s   t   u   v   w   x   y   z
    ];
    if ch < 128 {
        TABLE[ch as usize]
    } else {
        UNKNOWN_CODE
    }
}

/// Convert a residue code back to its printable ASCII character.
///
/// Out-of-alphabet codes render as `?`, which [`aa_code`] maps back to
/// [`UNKNOWN_CODE`] on re-read.
#[inline(always)]
pub fn aa_char(code: u8) -> u8 {
    const TABLE: &[u8; 26] = b"-ABCDEFGHIKLMNPQRSTVWXYZ*?";
    if (code as usize) < ALPHABET_SIZE {
        TABLE[code as usize]
    } else {
        b'?'
    }
}
