//! JSON file persistence

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use snake_core::PersistenceStore;

/// Key-value store backed by one JSON object on disk.
///
/// Every `set` rewrites the file; write failures are logged, never raised,
/// since the game treats persistence as best-effort.
pub struct JsonFileStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    ///
    /// Unreadable content is never fatal: a file that is not a JSON object
    /// starts fresh, and non-string values are dropped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read save file {}", path.display()))?;
            parse_values(&raw, &path)
        } else {
            log::info!("no save file at {}, starting fresh", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: RefCell::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&*self.values.borrow())?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write save file {}", self.path.display()))?;
        Ok(())
    }
}

fn parse_values(raw: &str, path: &Path) -> BTreeMap<String, String> {
    let object: Map<String, Value> = match serde_json::from_str(raw) {
        Ok(object) => object,
        Err(err) => {
            log::warn!(
                "save file {} is not a JSON object ({err}), starting fresh",
                path.display()
            );
            return BTreeMap::new();
        }
    };

    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(value) => Some((key, value)),
            other => {
                log::warn!("ignoring non-string value for {key}: {other}");
                None
            }
        })
        .collect()
}

impl PersistenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            log::warn!("could not persist {key}: {err:#}");
        }
    }
}
