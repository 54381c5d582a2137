use serde::{Deserialize, Serialize};

use crate::config::Difficulty;
use crate::store::{self, keys, PersistenceStore};

/// Player preferences, stored as one JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub difficulty: Difficulty,
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            sound_enabled: true,
            music_enabled: true,
        }
    }
}

impl Settings {
    pub fn load(store: &dyn PersistenceStore) -> Self {
        store::load_json(store, keys::SETTINGS).unwrap_or_default()
    }

    pub fn save(&self, store: &dyn PersistenceStore) {
        store::save_json(store, keys::SETTINGS, self);
    }

    pub fn move_interval_ms(&self) -> f64 {
        self.difficulty.move_interval_ms()
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }
}
