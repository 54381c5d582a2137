use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::store::{self, keys, PersistenceStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
    /// Wall-clock milliseconds since the epoch
    pub date_ms: f64,
    pub snake_length: usize,
    pub play_time_ms: f64,
}

/// Best rounds on this device, highest score first
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    store: Rc<dyn PersistenceStore>,
}

impl Leaderboard {
    pub fn load(store: Rc<dyn PersistenceStore>) -> Self {
        let mut entries: Vec<LeaderboardEntry> =
            store::load_json(store.as_ref(), keys::LEADERBOARD).unwrap_or_default();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(Params::LEADERBOARD_SIZE);
        Self { entries, store }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Would `score` earn a place on the board?
    pub fn is_high_score(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(last) if self.entries.len() >= Params::LEADERBOARD_SIZE => score > last.score,
            _ => true,
        }
    }

    /// Insert a finished round. Ties rank below older entries. Returns the
    /// zero-based rank, or `None` if the entry fell off the board.
    pub fn add_score(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        if rank >= Params::LEADERBOARD_SIZE {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(Params::LEADERBOARD_SIZE);
        store::save_json(self.store.as_ref(), keys::LEADERBOARD, &self.entries);
        Some(rank)
    }
}
