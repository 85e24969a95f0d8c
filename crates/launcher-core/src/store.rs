//! Durable key-value store backed by a single JSON document.
//!
//! Every [`Store::set`] writes the whole document through to disk before
//! returning, using a temp file and rename so a crash mid-write never leaves
//! a truncated file behind.

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;

pub const STORE_FILE: &str = "store.json";

pub const KEY_SHORTCUTS: &str = "shortcuts";
pub const KEY_DARK_THEME: &str = "darkTheme";
pub const KEY_WINDOW_POSITION: &str = "windowPosition";
pub const KEY_ALWAYS_ON_TOP: &str = "alwaysOnTop";

#[derive(Debug, Default)]
pub struct Store {
    path: Option<PathBuf>,
    data: Map<String, Value>,
}

impl Store {
    /// Opens the store at `path`, starting empty when the file is missing or
    /// cannot be parsed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    warn!("store {} is not a JSON object, starting empty", path.display());
                    Map::new()
                }
                Err(err) => {
                    warn!("failed to parse store {}: {err}", path.display());
                    Map::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => {
                warn!("failed to read store {}: {err}", path.display());
                Map::new()
            }
        };

        debug!("opened store {} with {} keys", path.display(), data.len());
        Self {
            path: Some(path),
            data,
        }
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the value under `key`, or `default` when it is absent or has
    /// the wrong shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.data.get(key) else {
            return default;
        };

        match T::deserialize(value) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("ignoring malformed store value for `{key}`: {err}");
                default
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.data.insert(key.to_string(), value);
        self.flush()
    }

    fn flush(&self) -> Result<(), StoreError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let serialized = serde_json::to_string_pretty(&self.data).map_err(StoreError::Serialize)?;
        let temp_path = path.with_extension(format!("json.{}.tmp", process::id()));

        fs::write(&temp_path, serialized).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_starts_empty_and_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join(STORE_FILE));

        assert!(!store.contains(KEY_DARK_THEME));
        assert!(store.get(KEY_DARK_THEME, true));
        assert!(!store.get(KEY_ALWAYS_ON_TOP, false));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(STORE_FILE);

        let mut store = Store::open(&path);
        store.set(KEY_DARK_THEME, &false).unwrap();
        store.set("answer", &42u32).unwrap();

        let reopened = Store::open(&path);
        assert!(!reopened.get(KEY_DARK_THEME, true));
        assert_eq!(reopened.get("answer", 0u32), 42);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);
        fs::write(&path, "{ not json").unwrap();

        let store = Store::open(&path);
        assert!(!store.contains(KEY_SHORTCUTS));
    }

    #[test]
    fn malformed_value_falls_back_to_default() {
        let mut store = Store::in_memory();
        store.set(KEY_DARK_THEME, "yes").unwrap();

        assert!(!store.get(KEY_DARK_THEME, false));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path().join(STORE_FILE));
        store.set(KEY_DARK_THEME, &true).unwrap();
        store.set(KEY_DARK_THEME, &false).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }
}
