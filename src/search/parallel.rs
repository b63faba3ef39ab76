//! Root-parallel minimax
//!
//! The admissible root moves are split into contiguous chunks, one per
//! worker, and each subtree is searched on a scoped thread. Workers are
//! joined in spawn order, so the values come back in move generation order
//! whatever the finishing order was, and the first-found tie-break of the
//! sequential search is preserved.

use std::panic;
use std::thread;

use super::minimax::minimax_value;
use super::stats::SearchStats;
use crate::board::Position;
use crate::eval::Evaluator;
use crate::moves::Move;

/// Value of each root move searched `depth` plies below the root.
pub(crate) fn evaluate_root_moves<E: Evaluator>(
    evaluator: &E,
    children: Vec<(Move, Position)>,
    depth: u32,
    threads: usize,
) -> (Vec<(Move, i32)>, SearchStats) {
    if children.is_empty() {
        return (Vec::new(), SearchStats::new());
    }
    let workers = threads.clamp(1, children.len());
    let chunk_size = children.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = children
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut stats = SearchStats::new();
                    let values: Vec<(Move, i32)> = chunk
                        .iter()
                        .map(|(mv, next)| {
                            stats.inc_node();
                            (*mv, minimax_value(evaluator, next, depth, &mut stats))
                        })
                        .collect();
                    (values, stats)
                })
            })
            .collect();

        let mut values = Vec::with_capacity(children.len());
        let mut stats = SearchStats::new();
        for handle in handles {
            match handle.join() {
                Ok((chunk_values, chunk_stats)) => {
                    values.extend(chunk_values);
                    stats.merge(&chunk_stats);
                }
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        (values, stats)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::StandardEvaluator;
    use crate::search::{Minimax, SearchParams};

    fn root_children(position: &Position) -> Vec<(Move, Position)> {
        position
            .current_player()
            .admissible_moves()
            .map(|(mv, next)| (*mv, next))
            .collect()
    }

    #[test]
    fn values_come_back_in_generation_order() {
        let pos = Position::standard();
        let children = root_children(&pos);
        let expected: Vec<Move> = children.iter().map(|(mv, _)| *mv).collect();
        let (values, stats) = evaluate_root_moves(&StandardEvaluator, children, 1, 4);
        let order: Vec<Move> = values.iter().map(|(mv, _)| *mv).collect();
        assert_eq!(order, expected);
        assert_eq!(stats.nodes, 20 + 400);
    }

    #[test]
    fn parallel_search_matches_sequential() {
        let pos = Position::standard();
        let sequential = Minimax::new(SearchParams::new().depth(2)).search_with_value(&pos);
        let parallel = Minimax::new(SearchParams::new().depth(2).threads(3)).search_with_value(&pos);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn more_threads_than_moves() {
        let pos = Position::standard();
        let (values, _) = evaluate_root_moves(&StandardEvaluator, root_children(&pos), 0, 64);
        assert_eq!(values.len(), 20);
    }
}
