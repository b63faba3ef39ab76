//! Perft: count the leaves of the admissible-move tree.
//!
//! Used to validate move generation against known node counts.

use crate::board::Position;
use crate::moves::Move;

/// Number of admissible move sequences of length `depth` from `position`.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let player = position.current_player();
    if depth == 1 {
        return player.admissible_moves().count() as u64;
    }
    player
        .admissible_moves()
        .map(|(_, next)| perft(&next, depth - 1))
        .sum()
}

/// Perft split by root move, in generation order.
pub fn divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    position
        .current_player()
        .admissible_moves()
        .map(|(mv, next)| (*mv, perft(&next, depth - 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::from_fen;

    #[test]
    fn perft_start_position() {
        let pos = Position::standard();
        assert_eq!(perft(&pos, 0), 1);
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
    }

    #[test]
    fn divide_sums_to_perft() {
        let pos = Position::standard();
        let split = divide(&pos, 2);
        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|(_, n)| *n == 20));
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), perft(&pos, 2));
    }

    #[test]
    fn perft_endgame_position() {
        let pos = from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&pos, 1), 14);
        assert_eq!(perft(&pos, 2), 191);
    }
}
