//! Search statistics and performance metrics
//!
//! Tracks positions visited, leaf evaluations and timing information.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Positions reached through admissible moves
    pub nodes: u64,

    /// Positions scored by the evaluator
    pub evaluations: u64,

    /// Admissible moves at the root
    pub root_moves: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and calculate NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    /// Increment node count
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    /// Increment evaluation count
    pub fn inc_evaluation(&mut self) {
        self.evaluations += 1;
    }

    /// Add the counters of a worker's stats
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.evaluations += other.evaluations;
        self.root_moves += other.root_moves;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Log formatted summary
    pub fn log_summary(&self) {
        info!(
            nodes = self.nodes,
            evaluations = self.evaluations,
            root_moves = self.root_moves,
            time_ms = self.search_time.as_millis() as u64,
            nps = self.nps,
            "search statistics"
        );
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Search Statistics ===")?;
        writeln!(f, "Nodes searched: {}", self.nodes)?;
        writeln!(f, "Evaluations: {}", self.evaluations)?;
        writeln!(f, "Root moves: {}", self.root_moves)?;
        writeln!(f, "Search time: {} ms", self.search_time.as_millis())?;
        write!(f, "Nodes per second: {}", self.nps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_counters() {
        let mut total = SearchStats::new();
        let mut worker = SearchStats::new();
        worker.inc_node();
        worker.inc_node();
        worker.inc_evaluation();
        total.merge(&worker);
        total.merge(&worker);
        assert_eq!(total.nodes, 4);
        assert_eq!(total.evaluations, 2);
        total.reset();
        assert_eq!(total.nodes, 0);
    }

    #[test]
    fn timing_without_start_is_zero() {
        let mut stats = SearchStats::new();
        stats.update_timing();
        assert_eq!(stats.search_time, Duration::ZERO);
        assert_eq!(stats.nps, 0);
    }
}
