//! Search parameters and configuration
//!
//! Controls the fixed search depth, the number of root threads and whether
//! a statistics summary is logged at the end of each search.

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Search depth in plies; a depth of 0 is searched as 1
    pub depth: u32,

    /// Threads sharing the root moves (1 = sequential search)
    pub threads: usize,

    /// Log a `SearchStats` summary when the search finishes
    pub log_stats: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 3,
            threads: 1,
            log_stats: false,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search depth in plies
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set number of root threads, at least one
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Enable or disable the statistics summary
    pub fn log_stats(mut self, enable: bool) -> Self {
        self.log_stats = enable;
        self
    }

    /// Depth actually searched from the root.
    pub fn effective_depth(&self) -> u32 {
        self.depth.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains() {
        let params = SearchParams::new().depth(5).threads(0).log_stats(true);
        assert_eq!(params.depth, 5);
        assert_eq!(params.threads, 1);
        assert!(params.log_stats);
    }

    #[test]
    fn zero_depth_is_searched_as_one() {
        assert_eq!(SearchParams::new().depth(0).effective_depth(), 1);
        assert_eq!(SearchParams::default().effective_depth(), 3);
    }
}
