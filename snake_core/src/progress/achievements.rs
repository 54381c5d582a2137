use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::store::{self, keys, PersistenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    #[serde(rename = "first_food")]
    FirstFood,
    #[serde(rename = "snake_10")]
    Snake10,
    #[serde(rename = "score_100")]
    Score100,
    #[serde(rename = "combo_5")]
    Combo5,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::FirstFood,
        Achievement::Snake10,
        Achievement::Score100,
        Achievement::Combo5,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstFood => "first_food",
            Achievement::Snake10 => "snake_10",
            Achievement::Score100 => "score_100",
            Achievement::Combo5 => "combo_5",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstFood => "Appetizer",
            Achievement::Snake10 => "Growing Up",
            Achievement::Score100 => "Century",
            Achievement::Combo5 => "Combo Master",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstFood => "Eat your first food",
            Achievement::Snake10 => "Reach a length of 10",
            Achievement::Score100 => "Score 100 points in one round",
            Achievement::Combo5 => "Chain a 5x combo",
        }
    }

    fn is_met(self, progress: &RoundProgress) -> bool {
        match self {
            Achievement::FirstFood => progress.food_eaten > 0,
            Achievement::Snake10 => progress.snake_length >= Params::ACHIEVEMENT_LENGTH,
            Achievement::Score100 => progress.score >= Params::ACHIEVEMENT_SCORE,
            Achievement::Combo5 => progress.combo >= Params::ACHIEVEMENT_COMBO,
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the current round has reached so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundProgress {
    pub food_eaten: u32,
    pub snake_length: usize,
    pub score: u32,
    pub combo: u32,
}

pub struct Achievements {
    unlocked: Vec<Achievement>,
    store: Rc<dyn PersistenceStore>,
}

impl Achievements {
    pub fn load(store: Rc<dyn PersistenceStore>) -> Self {
        // Unknown ids make the whole list unreadable, so parse them one by one
        let ids: Vec<String> =
            store::load_json(store.as_ref(), keys::ACHIEVEMENTS).unwrap_or_default();
        let mut unlocked = Vec::new();
        for id in ids {
            match Achievement::ALL.into_iter().find(|a| a.id() == id) {
                Some(achievement) if !unlocked.contains(&achievement) => unlocked.push(achievement),
                Some(_) => {}
                None => log::warn!("ignoring unknown achievement {id:?}"),
            }
        }
        Self { unlocked, store }
    }

    pub fn unlocked(&self) -> &[Achievement] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    /// Unlock everything `progress` satisfies; returns only the new ones
    pub fn check(&mut self, progress: &RoundProgress) -> Vec<Achievement> {
        let fresh: Vec<Achievement> = Achievement::ALL
            .into_iter()
            .filter(|&a| !self.is_unlocked(a) && a.is_met(progress))
            .collect();
        if !fresh.is_empty() {
            self.unlocked.extend(&fresh);
            store::save_json(self.store.as_ref(), keys::ACHIEVEMENTS, &self.unlocked);
            for achievement in &fresh {
                log::info!("achievement unlocked: {achievement}");
            }
        }
        fresh
    }
}
