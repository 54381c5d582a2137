use std::rc::Rc;

use crate::params::Params;
use crate::resources::Clock;
use crate::store::{self, keys, PersistenceStore};

/// What a single `add_score` call produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub points: u32,
    pub score: u32,
    pub combo: u32,
    pub new_high_score: bool,
}

/// Score with a time-windowed combo multiplier and a persisted best score
pub struct ScoreTracker {
    score: u32,
    high_score: u32,
    combo: u32,
    last_score_ms: f64,
    combo_timeout_ms: f64,
    clock: Rc<dyn Clock>,
    store: Rc<dyn PersistenceStore>,
}

impl ScoreTracker {
    pub fn new(clock: Rc<dyn Clock>, store: Rc<dyn PersistenceStore>) -> Self {
        let high_score = store::load_parsed(store.as_ref(), keys::HIGH_SCORE).unwrap_or(0);
        Self {
            score: 0,
            high_score,
            combo: 0,
            last_score_ms: 0.0,
            combo_timeout_ms: Params::COMBO_TIMEOUT_MS,
            clock,
            store,
        }
    }

    pub fn with_combo_timeout(mut self, combo_timeout_ms: f64) -> Self {
        self.combo_timeout_ms = combo_timeout_ms;
        self
    }

    /// Award `base_points`, scaled by the combo.
    ///
    /// Scoring again within the combo window extends the combo; otherwise it
    /// restarts at 1. Each combo step past the first adds 10%.
    pub fn add_score(&mut self, base_points: u32) -> ScoreUpdate {
        let now = self.clock.now();
        if now - self.last_score_ms < self.combo_timeout_ms {
            self.combo += 1;
        } else {
            self.combo = 1;
        }

        let multiplier = 1.0 + f64::from(self.combo - 1) * Params::COMBO_BONUS;
        let points = (f64::from(base_points) * multiplier).floor() as u32;
        self.score += points;

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
            self.persist_high_score();
        }

        self.last_score_ms = now;

        ScoreUpdate {
            points,
            score: self.score,
            combo: self.combo,
            new_high_score,
        }
    }

    /// Zero the round score and combo; the best score is kept
    pub fn reset(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.last_score_ms = 0.0;
    }

    pub fn persist_high_score(&self) {
        self.store
            .set(keys::HIGH_SCORE, &self.high_score.to_string());
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn last_score_ms(&self) -> f64 {
        self.last_score_ms
    }
}
