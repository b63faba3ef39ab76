//! Fixed-depth minimax search
//!
//! White maximizes and Black minimizes the evaluator's score. Only
//! admissible moves are followed; a side with none left ends the line
//! (checkmate or stalemate) and the position is evaluated as is.

use tracing::debug;

use super::params::SearchParams;
use super::parallel;
use super::stats::SearchStats;
use crate::board::Position;
use crate::eval::{Evaluator, StandardEvaluator};
use crate::moves::Move;
use crate::pieces::Alliance;

/// Minimax searcher
pub struct Minimax<E: Evaluator = StandardEvaluator> {
    evaluator: E,

    /// Search parameters
    params: SearchParams,

    /// Statistics of the last search
    stats: SearchStats,
}

impl Minimax<StandardEvaluator> {
    pub fn new(params: SearchParams) -> Self {
        Self::with_evaluator(StandardEvaluator, params)
    }

    /// Sequential search at `depth` with the standard evaluator
    pub fn with_depth(depth: u32) -> Self {
        Self::new(SearchParams::new().depth(depth))
    }
}

impl<E: Evaluator> Minimax<E> {
    pub fn with_evaluator(evaluator: E, params: SearchParams) -> Self {
        Self {
            evaluator,
            params,
            stats: SearchStats::new(),
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Recommend a move for the side to move, `None` when it has no
    /// admissible move.
    ///
    /// On equal values the move generated first is kept, also when the
    /// root moves are spread over several threads.
    pub fn search(&mut self, position: &Position) -> Option<Move> {
        self.search_with_value(position).map(|(mv, _)| mv)
    }

    /// Like [`Minimax::search`], also returning the value of the chosen move.
    pub fn search_with_value(&mut self, position: &Position) -> Option<(Move, i32)> {
        let depth = self.params.effective_depth();
        let player = position.current_player();
        debug!("{} thinking with depth = {}", player, depth);

        self.stats.reset();
        self.stats.start_timing();

        let children: Vec<(Move, Position)> = player
            .admissible_moves()
            .map(|(mv, next)| (*mv, next))
            .collect();
        self.stats.root_moves = children.len() as u64;

        let values = if self.params.threads > 1 && children.len() > 1 {
            let (values, worker_stats) =
                parallel::evaluate_root_moves(&self.evaluator, children, depth - 1, self.params.threads);
            self.stats.merge(&worker_stats);
            values
        } else {
            let mut values = Vec::with_capacity(children.len());
            for (mv, next) in &children {
                self.stats.inc_node();
                values.push((*mv, minimax_value(&self.evaluator, next, depth - 1, &mut self.stats)));
            }
            values
        };

        for (mv, value) in &values {
            debug!(%mv, value, "root move");
        }
        let best = select_best(values, player.alliance());

        self.stats.update_timing();
        if self.params.log_stats {
            self.stats.log_summary();
        }
        if let Some((mv, value)) = &best {
            debug!(%mv, value, "best move");
        }
        best
    }
}

/// Value of `position` searched `depth` plies deep.
pub(crate) fn minimax_value<E: Evaluator>(
    evaluator: &E,
    position: &Position,
    depth: u32,
    stats: &mut SearchStats,
) -> i32 {
    let player = position.current_player();
    if depth == 0 || player.is_in_checkmate() || player.is_in_stalemate() {
        stats.inc_evaluation();
        return evaluator.evaluate(position, depth);
    }

    let maximizing = player.alliance().is_white();
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for (_, next) in player.admissible_moves() {
        stats.inc_node();
        let value = minimax_value(evaluator, &next, depth - 1, stats);
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }
    best
}

/// Extremal value for `side`, keeping the earliest move on ties.
pub(crate) fn select_best<I>(values: I, side: Alliance) -> Option<(Move, i32)>
where
    I: IntoIterator<Item = (Move, i32)>,
{
    let mut best: Option<(Move, i32)> = None;
    for (mv, value) in values {
        let improves = match best {
            None => true,
            Some((_, seen)) => match side {
                Alliance::White => value > seen,
                Alliance::Black => value < seen,
            },
        };
        if improves {
            best = Some((mv, value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::from_fen;

    struct Constant;

    impl Evaluator for Constant {
        fn evaluate(&self, _position: &Position, _depth: u32) -> i32 {
            7
        }
    }

    #[test]
    fn ties_keep_first_move() {
        let pos = Position::standard();
        let mut search = Minimax::with_evaluator(Constant, SearchParams::new().depth(2));
        let (mv, value) = search.search_with_value(&pos).unwrap();
        assert_eq!(value, 7);
        let first = pos.current_player().admissible_moves().next().map(|(m, _)| *m);
        assert_eq!(Some(mv), first);
    }

    #[test]
    fn select_best_is_strict() {
        let pos = Position::standard();
        let moves: Vec<Move> = pos.current_player().legal_moves().iter().take(3).copied().collect();
        let values = vec![(moves[0], 5), (moves[1], 9), (moves[2], 9)];
        assert_eq!(select_best(values.clone(), Alliance::White), Some((moves[1], 9)));
        assert_eq!(select_best(values, Alliance::Black), Some((moves[0], 5)));
        assert_eq!(select_best(Vec::new(), Alliance::White), None);
    }

    #[test]
    fn finds_mate_in_one() {
        // Rook to a8 mates the boxed-in king on h8
        let pos = from_fen("7k/6pp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mut search = Minimax::with_depth(1);
        let mv = search.search(&pos).unwrap();
        assert_eq!(mv.to_uci(), "a1a8");
        assert!(search.stats().nodes > 0);
        assert_eq!(search.stats().root_moves, search.stats().nodes);
    }

    #[test]
    fn counts_evaluations() {
        let pos = Position::standard();
        let mut search = Minimax::with_depth(1);
        assert_eq!(search.params().depth, 1);
        search.search(&pos);
        assert_eq!(search.stats().evaluations, 20);
    }
}
