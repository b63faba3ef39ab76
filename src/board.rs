// Mapping dei quadrati: a8=0, h8=7, ..., a1=56, h1=63
// Ogni posizione è immutabile: una mossa produce sempre una posizione nuova

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::BoardError;
use crate::moves::Move;
use crate::pieces::{Alliance, Piece, PieceKind};
use crate::player::{calculate_king_castles, Player};
use crate::utils::{NUM_SQUARES, SQUARES_PER_ROW};

/// Square occupancy plus the pawn that may be taken en passant.
///
/// This is what pieces look at while generating their moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    squares: [Option<Piece>; NUM_SQUARES],
    en_passant_pawn: Option<Piece>,
}

impl Layout {
    pub fn empty() -> Self {
        Self {
            squares: [None; NUM_SQUARES],
            en_passant_pawn: None,
        }
    }

    /// Place every piece on its own square; a later piece on the same
    /// square replaces an earlier one. Pieces off the board are skipped.
    pub(crate) fn from_pieces<I>(pieces: I, en_passant_pawn: Option<Piece>) -> Self
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut layout = Self::empty();
        for piece in pieces {
            if let Some(slot) = layout.squares.get_mut(piece.square()) {
                *slot = Some(piece);
            }
        }
        layout.en_passant_pawn = en_passant_pawn;
        layout
    }

    #[inline]
    pub fn piece_at(&self, sq: usize) -> Option<&Piece> {
        self.squares.get(sq).and_then(Option::as_ref)
    }

    // Verifica se un quadrato è occupato
    #[inline]
    pub fn is_occupied(&self, sq: usize) -> bool {
        self.piece_at(sq).is_some()
    }

    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.en_passant_pawn.as_ref()
    }

    pub fn squares(&self) -> &[Option<Piece>; NUM_SQUARES] {
        &self.squares
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }
}

/// Collects pieces, the side to move and the en-passant pawn, then
/// validates them into a [`Position`].
#[derive(Debug, Clone)]
pub struct Builder {
    config: BTreeMap<usize, Piece>,
    move_maker: Alliance,
    en_passant_pawn: Option<Piece>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            config: BTreeMap::new(),
            move_maker: Alliance::White,
            en_passant_pawn: None,
        }
    }

    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.config.insert(piece.square(), piece);
        self
    }

    pub fn set_move_maker(&mut self, alliance: Alliance) -> &mut Self {
        self.move_maker = alliance;
        self
    }

    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    /// Validate the configuration and derive both sides' move sets.
    ///
    /// Fails if a piece sits outside the board or a side does not have
    /// exactly one king.
    pub fn build(&self) -> Result<Position, BoardError> {
        if let Some(&sq) = self.config.keys().find(|&&sq| sq >= NUM_SQUARES) {
            return Err(BoardError::SquareOutOfRange(sq));
        }
        let white_king = find_single_king(self.config.values(), Alliance::White)?;
        let black_king = find_single_king(self.config.values(), Alliance::Black)?;

        let layout = Layout::from_pieces(self.config.values().copied(), self.en_passant_pawn);
        Ok(Position::assemble(layout, self.move_maker, white_king, black_king))
    }
}

fn find_single_king<'a, I>(pieces: I, alliance: Alliance) -> Result<Piece, BoardError>
where
    I: Iterator<Item = &'a Piece>,
{
    let mut kings = pieces.filter(|p| p.is(PieceKind::King) && p.alliance() == alliance);
    match (kings.next(), kings.next()) {
        (Some(king), None) => Ok(*king),
        (None, _) => Err(BoardError::MissingKing(alliance)),
        (Some(_), Some(_)) => Err(BoardError::DuplicateKing(alliance)),
    }
}

/// Everything derived for one side of a position.
#[derive(Debug)]
pub(crate) struct SideState {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) king: Piece,
    /// Pseudo-legal moves without castles; these are the attacks used by
    /// the opponent's check and castling tests.
    pub(crate) standard_moves: Vec<Move>,
    /// Standard moves followed by the available castles.
    pub(crate) legal_moves: Vec<Move>,
    pub(crate) in_check: bool,
    /// Whether at least one legal move is admissible, filled on first use.
    pub(crate) escape: OnceLock<bool>,
}

#[derive(Debug)]
struct Inner {
    layout: Layout,
    side_to_move: Alliance,
    white: SideState,
    black: SideState,
}

/// An immutable chess position.
///
/// Cloning is cheap: the snapshot is shared behind an `Arc`, so positions
/// can be handed to search threads freely.
#[derive(Debug, Clone)]
pub struct Position(Arc<Inner>);

impl Position {
    /// The standard initial setup, White to move.
    pub fn standard() -> Self {
        use PieceKind::*;

        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut pieces = Vec::with_capacity(32);
        for (column, &kind) in BACK_RANK.iter().enumerate() {
            let black_sq = column;
            let white_sq = 7 * SQUARES_PER_ROW + column;
            if kind == King {
                pieces.push(Piece::king(Alliance::Black, black_sq, true, true));
                pieces.push(Piece::king(Alliance::White, white_sq, true, true));
            } else {
                pieces.push(Piece::new(kind, Alliance::Black, black_sq));
                pieces.push(Piece::new(kind, Alliance::White, white_sq));
            }
            pieces.push(Piece::new(Pawn, Alliance::Black, SQUARES_PER_ROW + column));
            pieces.push(Piece::new(Pawn, Alliance::White, 6 * SQUARES_PER_ROW + column));
        }

        let white_king = Piece::king(Alliance::White, 60, true, true);
        let black_king = Piece::king(Alliance::Black, 4, true, true);
        let layout = Layout::from_pieces(pieces, None);
        Self::assemble(layout, Alliance::White, white_king, black_king)
    }

    // Kings are already validated by the caller
    fn assemble(layout: Layout, side_to_move: Alliance, white_king: Piece, black_king: Piece) -> Self {
        let white_pieces = side_pieces(&layout, Alliance::White);
        let black_pieces = side_pieces(&layout, Alliance::Black);
        let white_standard = standard_moves(&layout, &white_pieces);
        let black_standard = standard_moves(&layout, &black_pieces);

        let white_in_check = attacks_square(&black_standard, white_king.square());
        let black_in_check = attacks_square(&white_standard, black_king.square());

        let white = side_state(
            &layout,
            white_pieces,
            white_king,
            white_standard,
            white_in_check,
            &black_standard,
        );
        let black = side_state(
            &layout,
            black_pieces,
            black_king,
            black_standard,
            black_in_check,
            &white.standard_moves,
        );

        Position(Arc::new(Inner {
            layout,
            side_to_move,
            white,
            black,
        }))
    }

    pub fn layout(&self) -> &Layout {
        &self.0.layout
    }

    #[inline]
    pub fn piece_at(&self, sq: usize) -> Option<&Piece> {
        self.0.layout.piece_at(sq)
    }

    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.0.layout.en_passant_pawn()
    }

    pub fn side_to_move(&self) -> Alliance {
        self.0.side_to_move
    }

    pub(crate) fn side(&self, alliance: Alliance) -> &SideState {
        alliance.choose(&self.0.white, &self.0.black)
    }

    /// Active pieces of one side, ordered by square.
    pub fn pieces(&self, alliance: Alliance) -> &[Piece] {
        &self.side(alliance).pieces
    }

    pub fn white_pieces(&self) -> &[Piece] {
        self.pieces(Alliance::White)
    }

    pub fn black_pieces(&self) -> &[Piece] {
        self.pieces(Alliance::Black)
    }

    /// White's pieces followed by Black's.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.white_pieces().iter().chain(self.black_pieces())
    }

    pub fn player(&self, alliance: Alliance) -> Player<'_> {
        Player::new(self, alliance)
    }

    pub fn white_player(&self) -> Player<'_> {
        self.player(Alliance::White)
    }

    pub fn black_player(&self) -> Player<'_> {
        self.player(Alliance::Black)
    }

    pub fn current_player(&self) -> Player<'_> {
        self.player(self.0.side_to_move)
    }

    /// Legal moves of White followed by those of Black.
    pub fn all_legal_moves(&self) -> impl Iterator<Item = &Move> {
        self.0.white.legal_moves.iter().chain(&self.0.black.legal_moves)
    }

    /// Either side is checkmated.
    pub fn is_end_game(&self) -> bool {
        self.white_player().is_in_checkmate() || self.black_player().is_in_checkmate()
    }

    /// Either side is in check.
    pub fn is_check_situation(&self) -> bool {
        self.0.white.in_check || self.0.black.in_check
    }
}

fn side_pieces(layout: &Layout, alliance: Alliance) -> Vec<Piece> {
    layout.pieces().filter(|p| p.alliance() == alliance).copied().collect()
}

fn standard_moves(layout: &Layout, pieces: &[Piece]) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for piece in pieces {
        piece.generate_pseudo_moves(layout, &mut out);
    }
    out
}

pub(crate) fn attacks_square(moves: &[Move], sq: usize) -> bool {
    moves.iter().any(|m| m.destination() == Some(sq))
}

fn side_state(
    layout: &Layout,
    pieces: Vec<Piece>,
    king: Piece,
    standard_moves: Vec<Move>,
    in_check: bool,
    opponent_moves: &[Move],
) -> SideState {
    let castles = calculate_king_castles(layout, &king, in_check, opponent_moves);
    let mut legal_moves = Vec::with_capacity(standard_moves.len() + castles.len());
    legal_moves.extend_from_slice(&standard_moves);
    legal_moves.extend(castles);
    SideState {
        pieces,
        king,
        standard_moves,
        legal_moves,
        in_check,
        escape: OnceLock::new(),
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.side_to_move == other.0.side_to_move && self.0.layout == other.0.layout)
    }
}

impl Eq for Position {}

// Tabellone testuale, bianco maiuscolo e nero minuscolo
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, square) in self.0.layout.squares().iter().enumerate() {
            match square {
                Some(piece) => write!(f, "{:^3}", piece.to_string())?,
                None => write!(f, "{:^3}", "-")?,
            }
            if (i + 1) % SQUARES_PER_ROW == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_position_counts() {
        let pos = Position::standard();
        assert_eq!(pos.white_pieces().len(), 16);
        assert_eq!(pos.black_pieces().len(), 16);
        assert_eq!(pos.layout().pieces().count(), 32);
        assert_eq!(pos.side_to_move(), Alliance::White);
        assert!(pos.en_passant_pawn().is_none());
        assert!(!pos.is_check_situation());
        assert!(!pos.is_end_game());
    }

    #[test]
    fn standard_position_kings() {
        let pos = Position::standard();
        let white_king = pos.piece_at(60).copied();
        let black_king = pos.piece_at(4).copied();
        assert!(matches!(white_king, Some(k) if k.is(PieceKind::King) && k.alliance() == Alliance::White));
        assert!(matches!(black_king, Some(k) if k.is(PieceKind::King) && k.alliance() == Alliance::Black));
        assert!(pos.white_player().king().is_king_side_castle_capable());
        assert!(pos.black_player().king().is_queen_side_castle_capable());
    }

    #[test]
    fn layout_skips_pieces_off_the_board() {
        let layout = Layout::from_pieces(
            [
                Piece::new(PieceKind::Rook, Alliance::White, 63),
                Piece::new(PieceKind::Rook, Alliance::White, NUM_SQUARES),
            ],
            None,
        );
        assert_eq!(layout.pieces().count(), 1);
        assert!(layout.is_occupied(63));
        assert!(layout.piece_at(NUM_SQUARES).is_none());
    }

    #[test]
    fn build_rejects_missing_king() {
        let mut builder = Builder::new();
        builder.set_piece(Piece::king(Alliance::White, 60, false, false));
        assert_eq!(
            builder.build().unwrap_err(),
            BoardError::MissingKing(Alliance::Black)
        );
    }

    #[test]
    fn build_rejects_duplicate_king() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Alliance::White, 60, false, false))
            .set_piece(Piece::king(Alliance::Black, 4, false, false))
            .set_piece(Piece::king(Alliance::Black, 12, false, false));
        assert_eq!(
            builder.build().unwrap_err(),
            BoardError::DuplicateKing(Alliance::Black)
        );
    }

    #[test]
    fn build_rejects_square_out_of_range() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Alliance::White, 60, false, false))
            .set_piece(Piece::king(Alliance::Black, 4, false, false))
            .set_piece(Piece::new(PieceKind::Rook, Alliance::Black, 64));
        assert_eq!(builder.build().unwrap_err(), BoardError::SquareOutOfRange(64));
    }

    #[test]
    fn display_renders_rows() {
        let text = Position::standard().to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], " r  n  b  q  k  b  n  r ");
        assert_eq!(rows[4], " -  -  -  -  -  -  -  - ");
        assert_eq!(rows[7], " R  N  B  Q  K  B  N  R ");
    }

    #[test]
    fn occupancy_matches_piece_sets() {
        let pos = Position::standard();
        for piece in pos.all_pieces() {
            assert_eq!(pos.piece_at(piece.square()), Some(piece));
        }
    }
}
