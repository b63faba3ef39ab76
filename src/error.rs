use crate::pieces::Alliance;

/// Errors raised while building or transforming a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{0} has no king on the board")]
    MissingKing(Alliance),

    #[error("{0} has more than one king on the board")]
    DuplicateKing(Alliance),

    #[error("square index {0} is outside the board")]
    SquareOutOfRange(usize),

    #[error("the null move cannot be performed")]
    NullMove,

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),
}
