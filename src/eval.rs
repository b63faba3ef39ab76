//! Modulo di valutazione
//!
//! Static score of a position from White's point of view: material,
//! mobility and fixed bonuses for check, checkmate and castling.
//! Positive values favour White.

use crate::board::Position;
use crate::player::Player;

// ============================================================================
// BONUS
// ============================================================================
pub const CHECK_BONUS: i32 = 50;
pub const CHECKMATE_BONUS: i32 = 10000;
pub const DEPTH_BONUS: i32 = 100;
pub const CASTLE_BONUS: i32 = 60;

/// Scores a position for the search.
///
/// `depth` is the remaining search depth when the position was reached, so
/// evaluators can prefer faster mates.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, position: &Position, depth: u32) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl Evaluator for StandardEvaluator {
    fn evaluate(&self, position: &Position, depth: u32) -> i32 {
        score_player(&position.white_player(), depth) - score_player(&position.black_player(), depth)
    }
}

fn score_player(player: &Player<'_>, depth: u32) -> i32 {
    material(player) + mobility(player) + check(player) + checkmate(player, depth) + castled(player)
}

fn material(player: &Player<'_>) -> i32 {
    player.active_pieces().iter().map(|p| p.weight()).sum()
}

fn mobility(player: &Player<'_>) -> i32 {
    player.legal_moves().len() as i32
}

fn check(player: &Player<'_>) -> i32 {
    if player.opponent().is_in_check() {
        CHECK_BONUS
    } else {
        0
    }
}

fn checkmate(player: &Player<'_>, depth: u32) -> i32 {
    if player.opponent().is_in_checkmate() {
        CHECKMATE_BONUS * depth_bonus(depth)
    } else {
        0
    }
}

fn castled(player: &Player<'_>) -> i32 {
    if player.is_castled() {
        CASTLE_BONUS
    } else {
        0
    }
}

// Mates found with more depth left are reached sooner
fn depth_bonus(depth: u32) -> i32 {
    if depth == 0 {
        1
    } else {
        DEPTH_BONUS * depth as i32
    }
}
