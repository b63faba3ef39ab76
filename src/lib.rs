pub mod board;
pub mod error;
pub mod eval;
pub mod fen;
pub mod moves;
pub mod perft;
pub mod pieces;
pub mod player;
pub mod search;
pub mod utils;

pub use board::{Builder, Layout, Position};
pub use error::BoardError;
pub use moves::{create_move, Move, MoveStatus, MoveTransition};
pub use pieces::{Alliance, KingState, Piece, PieceKind};
pub use player::Player;
