//! Search engine for Scacchiera
//!
//! Plain fixed-depth minimax over admissible moves, optionally spreading the
//! root moves over several threads.

pub mod minimax;
pub mod params;
pub mod parallel;
pub mod stats;

pub use self::minimax::Minimax;
pub use self::params::SearchParams;
pub use self::stats::SearchStats;
pub use crate::moves::Move;
