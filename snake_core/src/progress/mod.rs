//! Long-running player records kept across sessions: lifetime statistics,
//! the local leaderboard and achievements.

pub mod achievements;
pub mod leaderboard;
pub mod stats;

pub use achievements::*;
pub use leaderboard::*;
pub use stats::*;
