use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::store::{self, keys, PersistenceStore};

/// Lifetime totals over every round played
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStats {
    pub total_games: u32,
    pub total_score: u64,
    pub highest_score: u32,
    pub total_play_time_ms: f64,
    pub longest_snake: usize,
    pub food_eaten: u32,
    pub average_score: f64,
}

pub struct Statistics {
    stats: GameStats,
    round_started_ms: Option<f64>,
    store: Rc<dyn PersistenceStore>,
}

impl Statistics {
    pub fn load(store: Rc<dyn PersistenceStore>) -> Self {
        let stats = store::load_json(store.as_ref(), keys::GAME_STATS).unwrap_or_default();
        Self {
            stats,
            round_started_ms: None,
            store,
        }
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn start_round(&mut self, now_ms: f64) {
        self.stats.total_games += 1;
        self.round_started_ms = Some(now_ms);
        self.save();
    }

    /// Fold a finished round into the totals. Returns false when no round
    /// was running.
    pub fn end_round(&mut self, score: u32, snake_length: usize, now_ms: f64) -> bool {
        let Some(started) = self.round_started_ms.take() else {
            return false;
        };

        let stats = &mut self.stats;
        stats.total_score += u64::from(score);
        stats.highest_score = stats.highest_score.max(score);
        stats.total_play_time_ms += (now_ms - started).max(0.0);
        stats.longest_snake = stats.longest_snake.max(snake_length);
        stats.average_score = stats.total_score as f64 / f64::from(stats.total_games.max(1));
        self.save();
        true
    }

    pub fn record_food(&mut self) {
        self.stats.food_eaten += 1;
        self.save();
    }

    /// Milliseconds spent in the running round, if any
    pub fn round_time_ms(&self, now_ms: f64) -> Option<f64> {
        self.round_started_ms.map(|started| (now_ms - started).max(0.0))
    }

    fn save(&self) {
        store::save_json(self.store.as_ref(), keys::GAME_STATS, &self.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_round_totals() {
        let store = Rc::new(MemoryStore::new());
        let mut stats = Statistics::load(store.clone());

        stats.start_round(1_000.0);
        stats.record_food();
        stats.record_food();
        assert!(stats.end_round(30, 5, 4_000.0));

        stats.start_round(10_000.0);
        assert!(stats.end_round(10, 3, 11_000.0));
        assert!(!stats.end_round(99, 99, 12_000.0), "no round running");

        let totals = stats.stats();
        assert_eq!(totals.total_games, 2);
        assert_eq!(totals.total_score, 40);
        assert_eq!(totals.highest_score, 30);
        assert_eq!(totals.total_play_time_ms, 4_000.0);
        assert_eq!(totals.longest_snake, 5);
        assert_eq!(totals.food_eaten, 2);
        assert_eq!(totals.average_score, 20.0);

        let reloaded = Statistics::load(store);
        assert_eq!(reloaded.stats(), totals);
    }

    #[test]
    fn test_round_time() {
        let mut stats = Statistics::load(Rc::new(MemoryStore::new()));
        assert_eq!(stats.round_time_ms(5.0), None);
        stats.start_round(100.0);
        assert_eq!(stats.round_time_ms(350.0), Some(250.0));
    }

    #[test]
    fn test_malformed_stats_start_fresh() {
        let store = Rc::new(MemoryStore::with_values([
            (keys::GAME_STATS, "{\"totalGames\": \"lots\"}"),
        ]));
        let stats = Statistics::load(store);
        assert_eq!(*stats.stats(), GameStats::default());
    }

    #[test]
    fn test_partial_stats_keep_known_fields() {
        let store = Rc::new(MemoryStore::with_values([(keys::GAME_STATS, "{\"foodEaten\": 7}")]));
        let stats = Statistics::load(store);
        assert_eq!(stats.stats().food_eaten, 7);
        assert_eq!(stats.stats().total_games, 0);
    }
}
