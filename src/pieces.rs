//! Sides, piece kinds and per-piece pseudo-legal move generation.
//!
//! Pieces are plain values. Moving one never mutates it: the engine asks
//! for its post-move self with [`Piece::after_move`] and places that in the
//! successor position.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::board::Layout;
use crate::moves::Move;
use crate::utils::{
    offset_square, BISHOP_VECTORS, EIGHTH_COLUMN, EIGHTH_RANK, FIRST_COLUMN, FIRST_RANK,
    KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_VECTORS, ROOK_VECTORS, SECOND_COLUMN, SECOND_RANK,
    SEVENTH_COLUMN, SEVENTH_RANK,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alliance {
    White,
    Black,
}

impl Alliance {
    /// Row step of a pawn advance: White walks toward index 0 (rank 8).
    pub fn direction(self) -> i32 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    pub fn opponent(self) -> Alliance {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    pub fn is_white(self) -> bool {
        self == Alliance::White
    }

    pub fn is_pawn_promotion_square(self, sq: usize) -> bool {
        match self {
            Alliance::White => EIGHTH_RANK[sq],
            Alliance::Black => FIRST_RANK[sq],
        }
    }

    pub fn is_pawn_start_square(self, sq: usize) -> bool {
        match self {
            Alliance::White => SECOND_RANK[sq],
            Alliance::Black => SEVENTH_RANK[sq],
        }
    }

    /// Pick the value belonging to this side.
    pub fn choose<T>(self, white: T, black: T) -> T {
        match self {
            Alliance::White => white,
            Alliance::Black => black,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alliance::White => write!(f, "White"),
            Alliance::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material weight used by the evaluator.
    pub fn weight(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 10000,
        }
    }

    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Castling bookkeeping carried by a king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KingState {
    pub castled: bool,
    pub king_side_rights: bool,
    pub queen_side_rights: bool,
}

/// A piece standing on a square.
///
/// Equality is structural over kind, square, side and the first-move flag;
/// a king's castling bookkeeping does not take part in it.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    kind: PieceKind,
    alliance: Alliance,
    square: usize,
    first_move: bool,
    king_state: KingState,
}

impl Piece {
    /// A piece that has not moved yet. Kings built this way carry no
    /// castling rights, see [`Piece::king`].
    pub fn new(kind: PieceKind, alliance: Alliance, square: usize) -> Self {
        Self {
            kind,
            alliance,
            square,
            first_move: true,
            king_state: KingState::default(),
        }
    }

    pub fn king(alliance: Alliance, square: usize, king_side_rights: bool, queen_side_rights: bool) -> Self {
        Self {
            kind: PieceKind::King,
            alliance,
            square,
            first_move: true,
            king_state: KingState {
                castled: false,
                king_side_rights,
                queen_side_rights,
            },
        }
    }

    pub fn with_first_move(mut self, first_move: bool) -> Self {
        self.first_move = first_move;
        self
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn is(&self, kind: PieceKind) -> bool {
        self.kind == kind
    }

    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    pub fn square(&self) -> usize {
        self.square
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    pub fn king_state(&self) -> KingState {
        self.king_state
    }

    pub fn is_castled(&self) -> bool {
        self.king_state.castled
    }

    pub fn is_king_side_castle_capable(&self) -> bool {
        self.king_state.king_side_rights
    }

    pub fn is_queen_side_castle_capable(&self) -> bool {
        self.king_state.queen_side_rights
    }

    pub fn weight(&self) -> i32 {
        self.kind.weight()
    }

    /// The piece as it stands after `mv` has been played with it.
    ///
    /// Promotions yield the new queen; kings lose their castling rights and
    /// remember whether they got there by castling.
    pub fn after_move(&self, mv: &Move) -> Piece {
        let destination = mv.destination().unwrap_or(self.square);
        match (self.kind, mv) {
            (PieceKind::Pawn, Move::Promotion { promoted_to, .. }) => {
                Piece::new(*promoted_to, self.alliance, destination).with_first_move(false)
            }
            (PieceKind::King, _) => Piece {
                square: destination,
                first_move: false,
                king_state: KingState {
                    castled: mv.is_castling_move(),
                    king_side_rights: false,
                    queen_side_rights: false,
                },
                ..*self
            },
            _ => Piece {
                square: destination,
                first_move: false,
                ..*self
            },
        }
    }

    /// Pseudo-legal moves of this piece against `layout`, ignoring whether
    /// they expose the own king.
    pub fn calculate_moves(&self, layout: &Layout) -> Vec<Move> {
        let mut out = Vec::with_capacity(28);
        self.generate_pseudo_moves(layout, &mut out);
        out
    }

    pub fn generate_pseudo_moves(&self, layout: &Layout, out: &mut Vec<Move>) {
        match self.kind {
            PieceKind::Pawn => self.generate_pawn_pseudos(layout, out),
            PieceKind::Knight => {
                self.generate_leaper_pseudos(layout, &KNIGHT_OFFSETS, knight_excluded, out)
            }
            PieceKind::King => {
                self.generate_leaper_pseudos(layout, &KING_OFFSETS, crosses_side_edge, out)
            }
            PieceKind::Bishop => self.generate_slider_pseudos(layout, &BISHOP_VECTORS, out),
            PieceKind::Rook => self.generate_slider_pseudos(layout, &ROOK_VECTORS, out),
            PieceKind::Queen => self.generate_slider_pseudos(layout, &QUEEN_VECTORS, out),
        }
    }

    fn generate_leaper_pseudos(
        &self,
        layout: &Layout,
        offsets: &[i32],
        excluded: fn(usize, i32) -> bool,
        out: &mut Vec<Move>,
    ) {
        for &offset in offsets {
            let Some(to) = offset_square(self.square, offset) else {
                continue;
            };
            if excluded(self.square, offset) {
                continue;
            }
            match layout.piece_at(to) {
                None => out.push(Move::Quiet {
                    piece: *self,
                    destination: to,
                }),
                Some(occupant) if occupant.alliance != self.alliance => out.push(Move::Capture {
                    piece: *self,
                    destination: to,
                    captured: *occupant,
                }),
                Some(_) => {}
            }
        }
    }

    fn generate_slider_pseudos(&self, layout: &Layout, vectors: &[i32], out: &mut Vec<Move>) {
        for &vector in vectors {
            let mut current = self.square;
            loop {
                // Stop before wrapping from one side edge to the other
                if crosses_side_edge(current, vector) {
                    break;
                }
                let Some(to) = offset_square(current, vector) else {
                    break;
                };
                match layout.piece_at(to) {
                    None => out.push(Move::Quiet {
                        piece: *self,
                        destination: to,
                    }),
                    Some(occupant) => {
                        if occupant.alliance != self.alliance {
                            out.push(Move::Capture {
                                piece: *self,
                                destination: to,
                                captured: *occupant,
                            });
                        }
                        break; // the ray ends on the first occupied square
                    }
                }
                current = to;
            }
        }
    }

    fn generate_pawn_pseudos(&self, layout: &Layout, out: &mut Vec<Move>) {
        let direction = self.alliance.direction();

        // Single push, then the double push from the start rank
        if let Some(to) = offset_square(self.square, direction * 8) {
            if !layout.is_occupied(to) {
                if self.alliance.is_pawn_promotion_square(to) {
                    out.push(Move::Promotion {
                        piece: *self,
                        destination: to,
                        captured: None,
                        promoted_to: PieceKind::Queen,
                    });
                } else {
                    out.push(Move::PawnQuiet {
                        piece: *self,
                        destination: to,
                    });
                }

                if self.first_move && self.alliance.is_pawn_start_square(self.square) {
                    if let Some(jump) = offset_square(self.square, direction * 16) {
                        if !layout.is_occupied(jump) {
                            out.push(Move::PawnJump {
                                piece: *self,
                                destination: jump,
                            });
                        }
                    }
                }
            }
        }

        // Diagonal captures, including en passant
        for offset in [7, 9] {
            if self.pawn_capture_wraps(offset) {
                continue;
            }
            let Some(to) = offset_square(self.square, direction * offset) else {
                continue;
            };
            match layout.piece_at(to) {
                Some(occupant) if occupant.alliance != self.alliance => {
                    if self.alliance.is_pawn_promotion_square(to) {
                        out.push(Move::Promotion {
                            piece: *self,
                            destination: to,
                            captured: Some(*occupant),
                            promoted_to: PieceKind::Queen,
                        });
                    } else {
                        out.push(Move::PawnCapture {
                            piece: *self,
                            destination: to,
                            captured: *occupant,
                        });
                    }
                }
                Some(_) => {}
                None => {
                    // The en-passant pawn stands right behind the empty destination
                    if let Some(ep) = layout.en_passant_pawn() {
                        let behind = to as i32 - direction * 8;
                        if ep.alliance != self.alliance && ep.square as i32 == behind {
                            out.push(Move::EnPassant {
                                piece: *self,
                                destination: to,
                                captured: *ep,
                            });
                        }
                    }
                }
            }
        }
    }

    // Offset 7 moves one column toward h for White and toward a for Black,
    // offset 9 the other way round.
    fn pawn_capture_wraps(&self, offset: i32) -> bool {
        let sq = self.square;
        match (offset, self.alliance) {
            (7, Alliance::White) | (9, Alliance::Black) => EIGHTH_COLUMN[sq],
            (9, Alliance::White) | (7, Alliance::Black) => FIRST_COLUMN[sq],
            _ => false,
        }
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.square == other.square
            && self.alliance == other.alliance
            && self.first_move == other.first_move
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.square.hash(state);
        self.alliance.hash(state);
        self.first_move.hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind.letter();
        match self.alliance {
            Alliance::White => write!(f, "{}", letter),
            Alliance::Black => write!(f, "{}", letter.to_ascii_lowercase()),
        }
    }
}

/// Leaving the a-file to the left or the h-file to the right.
fn crosses_side_edge(sq: usize, offset: i32) -> bool {
    (FIRST_COLUMN[sq] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[sq] && matches!(offset, -7 | 1 | 9))
}

fn knight_excluded(sq: usize, offset: i32) -> bool {
    (FIRST_COLUMN[sq] && matches!(offset, -17 | -10 | 6 | 15))
        || (SECOND_COLUMN[sq] && matches!(offset, -10 | 6))
        || (SEVENTH_COLUMN[sq] && matches!(offset, -6 | 10))
        || (EIGHTH_COLUMN[sq] && matches!(offset, -15 | -6 | 10 | 17))
}
