//! Per-side view of a position: legal moves, check status, castles and the
//! move attempt protocol.

use tracing::warn;

use crate::board::{attacks_square, Layout, Position};
use crate::moves::{Move, MoveStatus, MoveTransition};
use crate::pieces::{Alliance, Piece, PieceKind};

/// One side of a [`Position`].
///
/// A player is only a borrowed view: everything it reports was derived when
/// the position was built, apart from the checkmate/stalemate answer which
/// is computed on first request and then kept with the position.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    position: &'a Position,
    alliance: Alliance,
}

impl<'a> Player<'a> {
    pub(crate) fn new(position: &'a Position, alliance: Alliance) -> Self {
        Self { position, alliance }
    }

    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    pub fn position(&self) -> &'a Position {
        self.position
    }

    /// Pseudo-legal moves plus available castles.
    pub fn legal_moves(&self) -> &'a [Move] {
        &self.position.side(self.alliance).legal_moves
    }

    pub fn king(&self) -> &'a Piece {
        &self.position.side(self.alliance).king
    }

    pub fn active_pieces(&self) -> &'a [Piece] {
        self.position.pieces(self.alliance)
    }

    pub fn opponent(&self) -> Player<'a> {
        Player::new(self.position, self.alliance.opponent())
    }

    pub fn is_in_check(&self) -> bool {
        self.position.side(self.alliance).in_check
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_escape_moves()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_escape_moves()
    }

    pub fn is_castled(&self) -> bool {
        self.king().is_castled()
    }

    pub fn is_king_side_castle_capable(&self) -> bool {
        self.king().is_king_side_castle_capable()
    }

    pub fn is_queen_side_castle_capable(&self) -> bool {
        self.king().is_queen_side_castle_capable()
    }

    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    /// Legal moves that do not leave the own king attacked, paired with the
    /// positions they lead to, in generation order.
    pub fn admissible_moves(&self) -> impl Iterator<Item = (&'a Move, Position)> + 'a {
        let player = *self;
        self.legal_moves().iter().filter_map(move |mv| {
            let transition = player.attempt(mv);
            transition.status().is_done().then(|| (mv, transition.into_board()))
        })
    }

    /// Attempt `mv` for this player.
    ///
    /// Moves outside the legal set, or made out of turn, are rejected with
    /// [`MoveStatus::IllegalMove`]; moves exposing the own king with
    /// [`MoveStatus::LeavesPlayerInCheck`]. A rejected transition keeps the
    /// board it started from.
    pub fn make_move(&self, mv: &Move) -> MoveTransition {
        if self.alliance != self.position.side_to_move() {
            return MoveTransition::rejected(self.position, *mv, MoveStatus::IllegalMove);
        }
        self.attempt(mv)
    }

    /// Take back `mv`, which must have produced this player's position.
    pub fn unmake_move(&self, mv: &Move) -> MoveTransition {
        match mv.previous_board(self.position) {
            Ok(previous) => MoveTransition::new(self.position.clone(), previous, *mv, MoveStatus::Done),
            Err(err) => {
                warn!(%mv, %err, "cannot take back move");
                MoveTransition::rejected(self.position, *mv, MoveStatus::IllegalMove)
            }
        }
    }

    // Legality and king safety, without the turn check
    fn attempt(&self, mv: &Move) -> MoveTransition {
        if !self.is_move_legal(mv) {
            return MoveTransition::rejected(self.position, *mv, MoveStatus::IllegalMove);
        }
        let next = match mv.perform(self.position) {
            Ok(next) => next,
            Err(err) => {
                warn!(%mv, %err, "move cannot be applied");
                return MoveTransition::rejected(self.position, *mv, MoveStatus::IllegalMove);
            }
        };
        // Any enemy pseudo-legal move reaching our king makes the move inadmissible
        if next.player(self.alliance).is_in_check() {
            return MoveTransition::rejected(self.position, *mv, MoveStatus::LeavesPlayerInCheck);
        }
        MoveTransition::new(self.position.clone(), next, *mv, MoveStatus::Done)
    }

    fn has_escape_moves(&self) -> bool {
        let side = self.position.side(self.alliance);
        *side
            .escape
            .get_or_init(|| side.legal_moves.iter().any(|mv| self.attempt(mv).status().is_done()))
    }
}

impl std::fmt::Display for Player<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.alliance)
    }
}

struct CastleSide {
    king_home: usize,
    rook_home: usize,
    /// Squares between king and rook; all must be empty and unattacked.
    path: &'static [usize],
    king_destination: usize,
    rook_destination: usize,
}

const WHITE_KING_SIDE: CastleSide = CastleSide {
    king_home: 60,
    rook_home: 63,
    path: &[61, 62],
    king_destination: 62,
    rook_destination: 61,
};

const WHITE_QUEEN_SIDE: CastleSide = CastleSide {
    king_home: 60,
    rook_home: 56,
    path: &[59, 58, 57],
    king_destination: 58,
    rook_destination: 59,
};

const BLACK_KING_SIDE: CastleSide = CastleSide {
    king_home: 4,
    rook_home: 7,
    path: &[5, 6],
    king_destination: 6,
    rook_destination: 5,
};

const BLACK_QUEEN_SIDE: CastleSide = CastleSide {
    king_home: 4,
    rook_home: 0,
    path: &[3, 2, 1],
    king_destination: 2,
    rook_destination: 3,
};

/// Castles available to `king`, judged against the opponent's pseudo-legal
/// moves in the same position.
pub(crate) fn calculate_king_castles(
    layout: &Layout,
    king: &Piece,
    in_check: bool,
    opponent_moves: &[Move],
) -> Vec<Move> {
    let mut castles = Vec::new();
    if in_check || king.is_castled() || !king.is_first_move() {
        return castles;
    }

    let (king_side, queen_side) = match king.alliance() {
        Alliance::White => (&WHITE_KING_SIDE, &WHITE_QUEEN_SIDE),
        Alliance::Black => (&BLACK_KING_SIDE, &BLACK_QUEEN_SIDE),
    };

    if king.is_king_side_castle_capable() {
        if let Some(rook) = castle_rook(layout, king, king_side, opponent_moves) {
            castles.push(Move::KingSideCastle {
                king: *king,
                destination: king_side.king_destination,
                rook,
                rook_destination: king_side.rook_destination,
            });
        }
    }
    if king.is_queen_side_castle_capable() {
        if let Some(rook) = castle_rook(layout, king, queen_side, opponent_moves) {
            castles.push(Move::QueenSideCastle {
                king: *king,
                destination: queen_side.king_destination,
                rook,
                rook_destination: queen_side.rook_destination,
            });
        }
    }
    castles
}

fn castle_rook(layout: &Layout, king: &Piece, side: &CastleSide, opponent_moves: &[Move]) -> Option<Piece> {
    if king.square() != side.king_home {
        return None;
    }
    if side
        .path
        .iter()
        .any(|&sq| layout.is_occupied(sq) || attacks_square(opponent_moves, sq))
    {
        return None;
    }
    layout
        .piece_at(side.rook_home)
        .filter(|rook| {
            rook.is(PieceKind::Rook) && rook.alliance() == king.alliance() && rook.is_first_move()
        })
        .copied()
}
