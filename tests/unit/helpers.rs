//! Shared fixtures for the record tests.

use std::io::Cursor;

use blockmat::error::ReadError;
use blockmat::record::{read_block, read_matrix, Block, Decoded, LineCursor, Matrix};

/// A well-formed two-sequence block in the worked-example shape.
pub const SMALL_BLOCK: &str = "\
ID   SMALL; BLOCK
AC   BL00001; distance from previous block=(2,17)
DE   Small example block
BL   ECA motif; width=4; seqs=2; 99.5%=1833; strength=1412
SEQ1_HUMAN (   5) ACDE 50.0
SEQ2_MOUSE (   9) AGDE 31.5
//
";

/// A well-formed two-column matrix with every weight distinct.
pub const SMALL_MATRIX: &str = "\
ID   SMALL; MATRIX
AC   BL00001;
DE   Small example matrix
MA   ECA motif; width=2; seqs=2; 99.5%=1833; strength=1412
    A    B    C    D    E    F    G    H    I    K    L    M    N    P    Q    R    S    T    V    W    X    Y    Z    *    -
    1    2    3    4    5    6    7    8    9   10   11   12   13   14   15   16   17   18   19   20   21   22   23   24   25
   26   27   28   29   30   31   32   33   34   35   36   37   38   39   40   41   42   43   44   45   46   47   48   49   50
//
";

pub fn decode_block(text: &str) -> Result<Option<Decoded<Block>>, ReadError> {
    let mut cursor = LineCursor::new(Cursor::new(text.to_string()));
    read_block(&mut cursor)
}

pub fn decode_matrix(text: &str) -> Result<Option<Decoded<Matrix>>, ReadError> {
    let mut cursor = LineCursor::new(Cursor::new(text.to_string()));
    read_matrix(&mut cursor)
}

/// Decode, expecting a record to be present.
pub fn block_of(text: &str) -> Decoded<Block> {
    decode_block(text)
        .expect("decode succeeds")
        .expect("a record is present")
}

pub fn matrix_of(text: &str) -> Decoded<Matrix> {
    decode_matrix(text)
        .expect("decode succeeds")
        .expect("a record is present")
}
