// Board geometry: membership tables, offset tables and algebraic notation.
//
// Square indices run row-major from the 8th rank down to the 1st:
// a8 = 0, h8 = 7, a1 = 56, h1 = 63.

pub const NUM_SQUARES: usize = 64;
pub const SQUARES_PER_ROW: usize = 8;

const fn column_table(column: usize) -> [bool; NUM_SQUARES] {
    let mut table = [false; NUM_SQUARES];
    let mut row = 0;
    while row < SQUARES_PER_ROW {
        table[row * SQUARES_PER_ROW + column] = true;
        row += 1;
    }
    table
}

// `first` is the index of the leftmost square of the row
const fn row_table(first: usize) -> [bool; NUM_SQUARES] {
    let mut table = [false; NUM_SQUARES];
    let mut sq = first;
    while sq < first + SQUARES_PER_ROW {
        table[sq] = true;
        sq += 1;
    }
    table
}

// Column masks (a is column 0, h column 7)
pub const FIRST_COLUMN: [bool; NUM_SQUARES] = column_table(0);
pub const SECOND_COLUMN: [bool; NUM_SQUARES] = column_table(1);
pub const SEVENTH_COLUMN: [bool; NUM_SQUARES] = column_table(6);
pub const EIGHTH_COLUMN: [bool; NUM_SQUARES] = column_table(7);

// Rank masks, named by chess rank
pub const EIGHTH_RANK: [bool; NUM_SQUARES] = row_table(0);
pub const SEVENTH_RANK: [bool; NUM_SQUARES] = row_table(8);
pub const SECOND_RANK: [bool; NUM_SQUARES] = row_table(48);
pub const FIRST_RANK: [bool; NUM_SQUARES] = row_table(56);

// Offset tables for move generation
pub const KNIGHT_OFFSETS: [i32; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
pub const KING_OFFSETS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
pub const BISHOP_VECTORS: [i32; 4] = [-9, -7, 7, 9];
pub const ROOK_VECTORS: [i32; 4] = [-8, -1, 1, 8];
pub const QUEEN_VECTORS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

pub const ALGEBRAIC_NOTATION: [&str; NUM_SQUARES] = [
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8", //
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", //
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6", //
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", //
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4", //
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", //
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", //
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
];

#[inline]
pub fn is_valid_square(coordinate: i32) -> bool {
    (0..NUM_SQUARES as i32).contains(&coordinate)
}

/// Apply an offset to a square, `None` if the result falls off the board.
/// Does not check for wrapping around the left/right edge.
#[inline]
pub fn offset_square(sq: usize, offset: i32) -> Option<usize> {
    let target = sq as i32 + offset;
    if is_valid_square(target) {
        Some(target as usize)
    } else {
        None
    }
}

/// Convert a square index to algebraic notation (e.g. 0 -> "a8", 63 -> "h1")
pub fn square_to_algebraic(sq: usize) -> &'static str {
    ALGEBRAIC_NOTATION[sq]
}

/// Convert algebraic notation to a square index (e.g. "e1" -> 60)
pub fn algebraic_to_square(notation: &str) -> Option<usize> {
    let bytes = notation.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    let column = (file - b'a') as usize;
    let row = (b'8' - rank) as usize;
    Some(row * SQUARES_PER_ROW + column)
}

#[inline]
pub fn row_of(sq: usize) -> usize {
    sq / SQUARES_PER_ROW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_bijection_is_exact() {
        for sq in 0..NUM_SQUARES {
            let name = square_to_algebraic(sq);
            assert_eq!(algebraic_to_square(name), Some(sq), "round trip for {}", name);
        }
        assert_eq!(algebraic_to_square("e1"), Some(60));
        assert_eq!(algebraic_to_square("e8"), Some(4));
        assert_eq!(algebraic_to_square("i1"), None);
        assert_eq!(algebraic_to_square("a9"), None);
        assert_eq!(algebraic_to_square("a10"), None);
    }

    #[test]
    fn membership_tables() {
        assert_eq!(FIRST_COLUMN.iter().filter(|&&b| b).count(), 8);
        assert!(FIRST_COLUMN[0] && FIRST_COLUMN[56]);
        assert!(EIGHTH_COLUMN[7] && EIGHTH_COLUMN[63]);
        assert!(SECOND_COLUMN[57] && SEVENTH_COLUMN[62]);
        assert!(EIGHTH_RANK[4] && !EIGHTH_RANK[8]);
        assert!(FIRST_RANK[60] && SECOND_RANK[52] && SEVENTH_RANK[12]);
    }

    #[test]
    fn offsets_stay_on_board() {
        assert_eq!(offset_square(0, -1), None);
        assert_eq!(offset_square(63, 1), None);
        assert_eq!(offset_square(60, -8), Some(52));
    }
}
