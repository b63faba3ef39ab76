//! FEN import and export.
//!
//! Only the first four fields carry information for this engine. The move
//! counters are accepted on input and written back as `0 1`.

use std::str::FromStr;

use crate::board::{Builder, Position};
use crate::error::BoardError;
use crate::pieces::{Alliance, Piece, PieceKind};
use crate::utils::{algebraic_to_square, row_of, square_to_algebraic, SQUARES_PER_ROW};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, Default)]
struct CastlingLetters {
    white_king_side: bool,
    white_queen_side: bool,
    black_king_side: bool,
    black_queen_side: bool,
}

impl CastlingLetters {
    fn parse(field: &str) -> Result<Self, BoardError> {
        let mut rights = Self::default();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            match c {
                'K' => rights.white_king_side = true,
                'Q' => rights.white_queen_side = true,
                'k' => rights.black_king_side = true,
                'q' => rights.black_queen_side = true,
                _ => return Err(BoardError::InvalidFen(format!("bad castling field '{}'", field))),
            }
        }
        Ok(rights)
    }

    fn for_side(&self, alliance: Alliance) -> (bool, bool) {
        alliance.choose(
            (self.white_king_side, self.white_queen_side),
            (self.black_king_side, self.black_queen_side),
        )
    }

    // Corners whose rook still has castling value
    fn rook_is_unmoved(&self, alliance: Alliance, sq: usize) -> bool {
        match (alliance, sq) {
            (Alliance::White, 63) => self.white_king_side,
            (Alliance::White, 56) => self.white_queen_side,
            (Alliance::Black, 7) => self.black_king_side,
            (Alliance::Black, 0) => self.black_queen_side,
            _ => false,
        }
    }
}

// Home squares of knights, bishops and queens
fn is_minor_or_queen_home(kind: PieceKind, alliance: Alliance, sq: usize) -> bool {
    let white_home: &[usize] = match kind {
        PieceKind::Knight => &[57, 62],
        PieceKind::Bishop => &[58, 61],
        PieceKind::Queen => &[59],
        _ => &[],
    };
    match alliance {
        Alliance::White => white_home.contains(&sq),
        Alliance::Black => white_home.iter().any(|&home| home - 7 * SQUARES_PER_ROW == sq),
    }
}

fn make_piece(kind: PieceKind, alliance: Alliance, sq: usize, rights: &CastlingLetters) -> Piece {
    match kind {
        PieceKind::King => {
            let home = alliance.choose(60, 4);
            let (king_side, queen_side) = if sq == home {
                rights.for_side(alliance)
            } else {
                (false, false)
            };
            Piece::king(alliance, sq, king_side, queen_side).with_first_move(king_side || queen_side)
        }
        PieceKind::Pawn => Piece::new(kind, alliance, sq).with_first_move(alliance.is_pawn_start_square(sq)),
        PieceKind::Rook => Piece::new(kind, alliance, sq).with_first_move(rights.rook_is_unmoved(alliance, sq)),
        _ => Piece::new(kind, alliance, sq).with_first_move(is_minor_or_queen_home(kind, alliance, sq)),
    }
}

/// Parse a FEN string into a validated position.
pub fn from_fen(fen: &str) -> Result<Position, BoardError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 || fields.len() > 6 {
        return Err(BoardError::InvalidFen(format!(
            "expected 4 to 6 fields, found {}",
            fields.len()
        )));
    }

    let side = match fields[1] {
        "w" => Alliance::White,
        "b" => Alliance::Black,
        other => return Err(BoardError::InvalidFen(format!("bad side to move '{}'", other))),
    };
    let rights = CastlingLetters::parse(fields[2])?;

    let mut builder = Builder::new();
    builder.set_move_maker(side);

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(BoardError::InvalidFen(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }
    for (row, rank) in ranks.iter().enumerate() {
        let mut column = 0;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                if skip == 0 {
                    return Err(BoardError::InvalidFen(format!("zero skip in rank '{}'", rank)));
                }
                column += skip as usize;
                continue;
            }
            let kind = PieceKind::from_letter(c)
                .ok_or_else(|| BoardError::InvalidFen(format!("bad piece letter '{}'", c)))?;
            if column >= SQUARES_PER_ROW {
                return Err(BoardError::InvalidFen(format!("rank '{}' is too long", rank)));
            }
            let alliance = if c.is_ascii_uppercase() {
                Alliance::White
            } else {
                Alliance::Black
            };
            let sq = row * SQUARES_PER_ROW + column;
            builder.set_piece(make_piece(kind, alliance, sq, &rights));
            column += 1;
        }
        if column != SQUARES_PER_ROW {
            return Err(BoardError::InvalidFen(format!("rank '{}' does not cover 8 squares", rank)));
        }
    }

    if fields[3] != "-" {
        let target = algebraic_to_square(fields[3]).ok_or_else(|| BoardError::InvalidSquare(fields[3].to_string()))?;
        // The pawn that just jumped stands in front of the target square
        let (pawn_sq, alliance) = match row_of(target) {
            5 => (target - SQUARES_PER_ROW, Alliance::White),
            2 => (target + SQUARES_PER_ROW, Alliance::Black),
            _ => {
                return Err(BoardError::InvalidFen(format!(
                    "en-passant square {} is not on the 3rd or 6th rank",
                    fields[3]
                )))
            }
        };
        let pawn = Piece::new(PieceKind::Pawn, alliance, pawn_sq).with_first_move(false);
        builder.set_en_passant_pawn(pawn);
        // Validate against the placement that was just read
        let placed = builder.build()?;
        if placed.piece_at(pawn_sq) != Some(&pawn) {
            return Err(BoardError::InvalidFen(format!(
                "no pawn can be taken en passant on {}",
                fields[3]
            )));
        }
        return Ok(placed);
    }

    builder.build()
}

/// Render a position as FEN; the move counters are always `0 1`.
pub fn to_fen(position: &Position) -> String {
    let mut placement = String::new();
    for row in 0..8 {
        let mut empty = 0;
        for column in 0..SQUARES_PER_ROW {
            match position.piece_at(row * SQUARES_PER_ROW + column) {
                Some(piece) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push_str(&piece.to_string());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if row < 7 {
            placement.push('/');
        }
    }

    let side = if position.side_to_move().is_white() { "w" } else { "b" };

    let mut castling = String::new();
    let white = position.white_player();
    let black = position.black_player();
    if white.is_king_side_castle_capable() {
        castling.push('K');
    }
    if white.is_queen_side_castle_capable() {
        castling.push('Q');
    }
    if black.is_king_side_castle_capable() {
        castling.push('k');
    }
    if black.is_queen_side_castle_capable() {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = match position.en_passant_pawn() {
        Some(pawn) => {
            let behind = pawn.square() as i32 - pawn.alliance().direction() * SQUARES_PER_ROW as i32;
            square_to_algebraic(behind as usize)
        }
        None => "-",
    };

    format!("{} {} {} {} 0 1", placement, side, castling, en_passant)
}

impl FromStr for Position {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_fen(s)
    }
}
