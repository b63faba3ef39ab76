//! Moves as a closed sum type.
//!
//! Every variant carries the pieces it touches, so a move is enough to build
//! both the successor of a position ([`Move::perform`]) and, from that
//! successor, the position it came from ([`Move::previous_board`]).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::board::{Builder, Position};
use crate::error::BoardError;
use crate::pieces::{Piece, PieceKind};
use crate::utils::square_to_algebraic;

#[derive(Debug, Clone, Copy)]
pub enum Move {
    /// A non-pawn piece moving to an empty square.
    Quiet { piece: Piece, destination: usize },
    /// A non-pawn piece taking an enemy piece.
    Capture {
        piece: Piece,
        destination: usize,
        captured: Piece,
    },
    PawnQuiet { piece: Piece, destination: usize },
    /// Two-square advance from the start rank; sets the en-passant pawn.
    PawnJump { piece: Piece, destination: usize },
    PawnCapture {
        piece: Piece,
        destination: usize,
        captured: Piece,
    },
    /// `captured` stands beside the capturing pawn, not on `destination`.
    EnPassant {
        piece: Piece,
        destination: usize,
        captured: Piece,
    },
    /// A pawn push or capture reaching the far rank.
    Promotion {
        piece: Piece,
        destination: usize,
        captured: Option<Piece>,
        promoted_to: PieceKind,
    },
    KingSideCastle {
        king: Piece,
        destination: usize,
        rook: Piece,
        rook_destination: usize,
    },
    QueenSideCastle {
        king: Piece,
        destination: usize,
        rook: Piece,
        rook_destination: usize,
    },
    /// Sentinel for "no move matches"; it can never be applied.
    Null,
}

impl Move {
    pub fn moved_piece(&self) -> Option<&Piece> {
        match self {
            Move::Quiet { piece, .. }
            | Move::Capture { piece, .. }
            | Move::PawnQuiet { piece, .. }
            | Move::PawnJump { piece, .. }
            | Move::PawnCapture { piece, .. }
            | Move::EnPassant { piece, .. }
            | Move::Promotion { piece, .. } => Some(piece),
            Move::KingSideCastle { king, .. } | Move::QueenSideCastle { king, .. } => Some(king),
            Move::Null => None,
        }
    }

    pub fn origin_square(&self) -> Option<usize> {
        self.moved_piece().map(Piece::square)
    }

    pub fn destination(&self) -> Option<usize> {
        match *self {
            Move::Quiet { destination, .. }
            | Move::Capture { destination, .. }
            | Move::PawnQuiet { destination, .. }
            | Move::PawnJump { destination, .. }
            | Move::PawnCapture { destination, .. }
            | Move::EnPassant { destination, .. }
            | Move::Promotion { destination, .. }
            | Move::KingSideCastle { destination, .. }
            | Move::QueenSideCastle { destination, .. } => Some(destination),
            Move::Null => None,
        }
    }

    /// The piece removed from the board by this move, if any.
    pub fn attacked_piece(&self) -> Option<&Piece> {
        match self {
            Move::Capture { captured, .. }
            | Move::PawnCapture { captured, .. }
            | Move::EnPassant { captured, .. } => Some(captured),
            Move::Promotion { captured, .. } => captured.as_ref(),
            _ => None,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.attacked_piece().is_some()
    }

    pub fn is_castling_move(&self) -> bool {
        matches!(self, Move::KingSideCastle { .. } | Move::QueenSideCastle { .. })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Move::Null)
    }

    fn castle_rook(&self) -> Option<(&Piece, usize)> {
        match self {
            Move::KingSideCastle {
                rook,
                rook_destination,
                ..
            }
            | Move::QueenSideCastle {
                rook,
                rook_destination,
                ..
            } => Some((rook, *rook_destination)),
            _ => None,
        }
    }

    /// Build the position reached by playing this move in `position`.
    ///
    /// The mover is the side owning the moved piece; the successor has the
    /// other side to move.
    pub fn perform(&self, position: &Position) -> Result<Position, BoardError> {
        let piece = self.moved_piece().ok_or(BoardError::NullMove)?;
        let mover = piece.alliance();
        let rook = self.castle_rook();

        let mut builder = Builder::new();
        for p in position.pieces(mover) {
            let is_castle_rook = rook.is_some_and(|(r, _)| r == p);
            if p != piece && !is_castle_rook {
                builder.set_piece(*p);
            }
        }
        let captured = self.attacked_piece();
        for p in position.pieces(mover.opponent()) {
            if Some(p) != captured {
                builder.set_piece(*p);
            }
        }

        let moved = piece.after_move(self);
        builder.set_piece(moved);
        if let Some((rook, rook_destination)) = rook {
            builder.set_piece(
                Piece::new(PieceKind::Rook, rook.alliance(), rook_destination).with_first_move(false),
            );
        }
        if let Move::PawnJump { .. } = self {
            builder.set_en_passant_pawn(moved);
        }
        builder.set_move_maker(mover.opponent());
        builder.build()
    }

    /// Rebuild, from `position` reached by this move, the position the move
    /// was played in.
    ///
    /// The en-passant pawn is only known for en-passant captures.
    pub fn previous_board(&self, position: &Position) -> Result<Position, BoardError> {
        let piece = self.moved_piece().ok_or(BoardError::NullMove)?;
        let mover = piece.alliance();
        let rook = self.castle_rook();
        let destination = self.destination().ok_or(BoardError::NullMove)?;

        let mut builder = Builder::new();
        for p in position.pieces(mover) {
            let is_castled_rook = rook.is_some_and(|(_, to)| p.square() == to);
            if p.square() != destination && !is_castled_rook {
                builder.set_piece(*p);
            }
        }
        for p in position.pieces(mover.opponent()) {
            builder.set_piece(*p);
        }

        builder.set_piece(*piece);
        if let Some((rook, _)) = rook {
            builder.set_piece(*rook);
        }
        if let Some(captured) = self.attacked_piece() {
            builder.set_piece(*captured);
        }
        if let Move::EnPassant { captured, .. } = self {
            builder.set_en_passant_pawn(*captured);
        }
        builder.set_move_maker(mover);
        builder.build()
    }

    /// Long algebraic notation as used by UCI, e.g. `e2e4`, `e7e8q`.
    /// The null move renders as `0000`.
    pub fn to_uci(&self) -> String {
        match (self.origin_square(), self.destination()) {
            (Some(from), Some(to)) => {
                let mut s = format!("{}{}", square_to_algebraic(from), square_to_algebraic(to));
                if let Move::Promotion { promoted_to, .. } = self {
                    s.push(promoted_to.letter().to_ascii_lowercase());
                }
                s
            }
            _ => "0000".to_string(),
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
            && self.origin_square() == other.origin_square()
            && self.destination() == other.destination()
            && self.moved_piece() == other.moved_piece()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        self.destination().hash(state);
        self.moved_piece().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Quiet { piece, destination } | Move::Capture { piece, destination, .. } => {
                write!(f, "{}{}", piece.kind().letter(), square_to_algebraic(*destination))
            }
            Move::PawnQuiet { destination, .. } | Move::PawnJump { destination, .. } => {
                write!(f, "{}", square_to_algebraic(*destination))
            }
            Move::PawnCapture { piece, destination, .. } | Move::EnPassant { piece, destination, .. } => {
                write_pawn_capture(f, piece, *destination)
            }
            Move::Promotion {
                piece,
                destination,
                captured,
                promoted_to,
            } => {
                if captured.is_some() {
                    write_pawn_capture(f, piece, *destination)?;
                } else {
                    write!(f, "{}", square_to_algebraic(*destination))?;
                }
                write!(f, "={}", promoted_to.letter())
            }
            Move::KingSideCastle { .. } => write!(f, "0-0"),
            Move::QueenSideCastle { .. } => write!(f, "0-0-0"),
            Move::Null => write!(f, "--"),
        }
    }
}

fn write_pawn_capture(f: &mut fmt::Formatter<'_>, pawn: &Piece, destination: usize) -> fmt::Result {
    let file = &square_to_algebraic(pawn.square())[..1];
    write!(f, "{}x{}", file, square_to_algebraic(destination))
}

/// Outcome of an attempted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    Done,
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    pub fn is_done(self) -> bool {
        self == MoveStatus::Done
    }
}

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveStatus::Done => "done",
            MoveStatus::IllegalMove => "illegal move",
            MoveStatus::LeavesPlayerInCheck => "leaves player in check",
        };
        f.write_str(text)
    }
}

/// A move attempt: the board it started from, the board it produced and
/// how it went. When the attempt is rejected both boards are the same.
#[derive(Debug, Clone)]
pub struct MoveTransition {
    from_board: Position,
    to_board: Position,
    transition_move: Move,
    status: MoveStatus,
}

impl MoveTransition {
    pub fn new(from_board: Position, to_board: Position, transition_move: Move, status: MoveStatus) -> Self {
        Self {
            from_board,
            to_board,
            transition_move,
            status,
        }
    }

    pub(crate) fn rejected(from_board: &Position, transition_move: Move, status: MoveStatus) -> Self {
        Self::new(from_board.clone(), from_board.clone(), transition_move, status)
    }

    pub fn from_board(&self) -> &Position {
        &self.from_board
    }

    pub fn to_board(&self) -> &Position {
        &self.to_board
    }

    pub fn transition_move(&self) -> &Move {
        &self.transition_move
    }

    pub fn status(&self) -> MoveStatus {
        self.status
    }

    pub fn into_board(self) -> Position {
        self.to_board
    }
}

/// Find the legal move from `from` to `to`, looking at White's moves and
/// then Black's. Returns [`Move::Null`] when nothing matches.
pub fn create_move(position: &Position, from: usize, to: usize) -> Move {
    position
        .all_legal_moves()
        .find(|m| m.origin_square() == Some(from) && m.destination() == Some(to))
        .copied()
        .unwrap_or(Move::Null)
}
