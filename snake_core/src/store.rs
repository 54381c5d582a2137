//! Key-value persistence seam.
//!
//! The core never touches durable storage directly. Everything it saves goes
//! through one injected [`PersistenceStore`]; values are opaque strings and a
//! missing or unreadable value is treated as absent.

use std::cell::RefCell;
use std::collections::HashMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;

/// Keys written by the core
pub mod keys {
    pub const HIGH_SCORE: &str = "snakeHighScore";
    pub const CURRENCY: &str = "snakeCurrency";
    pub const OWNED_SKINS: &str = "snakeOwnedSkins";
    pub const CURRENT_SKIN: &str = "snakeCurrentSkin";
    pub const LAST_REWARD_TIME: &str = "snakeLastRewardTime";
    pub const SETTINGS: &str = "snakeSettings";
    pub const GAME_STATS: &str = "gameStats";
    pub const LEADERBOARD: &str = "leaderboard";
    pub const ACHIEVEMENTS: &str = "achievements";
}

/// Synchronous, best-effort string store
pub trait PersistenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory store, the default for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        for (key, value) in values {
            store.set(key, value);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Read a plain scalar (`"42"`), falling back to `None` when absent or malformed
pub fn load_parsed<T: FromStr>(store: &dyn PersistenceStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring malformed value for {key}: {raw:?}");
            None
        }
    }
}

/// Read a JSON value, falling back to `None` when absent or malformed
pub fn load_json<T: DeserializeOwned>(store: &dyn PersistenceStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("ignoring malformed JSON for {key}: {err}");
            None
        }
    }
}

/// Write a JSON value; serialisation failures are logged and dropped
pub fn save_json<T: serde::Serialize>(store: &dyn PersistenceStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(err) => log::warn!("could not encode {key}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert!(store.get("missing").is_none());
        store.set("a", "1");
        store.set("a", "2");
        assert_eq!(store.get("a").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_parsed_falls_back_on_garbage() {
        let store = MemoryStore::with_values([("good", " 17 "), ("bad", "seventeen")]);
        assert_eq!(load_parsed::<u32>(&store, "good"), Some(17));
        assert_eq!(load_parsed::<u32>(&store, "bad"), None);
        assert_eq!(load_parsed::<u32>(&store, "absent"), None);
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        save_json(&store, "list", &vec!["default", "gold"]);
        assert_eq!(store.get("list").as_deref(), Some(r#"["default","gold"]"#));

        let list: Option<Vec<String>> = load_json(&store, "list");
        assert_eq!(list, Some(vec!["default".to_string(), "gold".to_string()]));

        store.set("list", "[not json");
        assert_eq!(load_json::<Vec<String>>(&store, "list"), None);
    }
}
