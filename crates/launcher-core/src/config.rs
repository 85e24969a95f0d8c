use std::{fs, path::Path};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{drag::PositionPersistence, error::ConfigError, launch::LaunchFailurePolicy};

pub const CONFIG_FILE: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Global shortcut that shows or hides the toolbar. `None` disables it.
    pub toggle_hotkey: Option<String>,
    pub launch_failure: LaunchFailurePolicy,
    pub position_persistence: PositionPersistence,
}

impl AppConfig {
    pub fn load(path: &Path) -> Self {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!("invalid settings in {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Hotkey with surrounding whitespace removed, `None` when blank.
    pub fn normalized_hotkey(&self) -> Option<&str> {
        self.toggle_hotkey
            .as_deref()
            .map(str::trim)
            .filter(|hotkey| !hotkey.is_empty())
    }

    /// Takes every field of `update`, except the hotkey when it could not be
    /// bound: the saved hotkey has to stay the one that is actually live.
    pub fn apply_update(&mut self, update: AppConfig, hotkey_bound: bool) {
        let previous_hotkey = self.toggle_hotkey.take();
        *self = update;
        if !hotkey_bound {
            self.toggle_hotkey = previous_hotkey;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_or_corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        assert_eq!(AppConfig::load(&path), AppConfig::default());

        fs::write(&path, "[1, 2").unwrap();
        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"launchFailure":"notify"}"#).unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.launch_failure, LaunchFailurePolicy::Notify);
        assert_eq!(config.position_persistence, PositionPersistence::OnDragEnd);
        assert_eq!(config.toggle_hotkey, None);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join(CONFIG_FILE);
        let config = AppConfig {
            toggle_hotkey: Some(" Alt+Space ".into()),
            launch_failure: LaunchFailurePolicy::Notify,
            position_persistence: PositionPersistence::EveryMove,
        };

        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path);
        assert_eq!(loaded, config);
        assert_eq!(loaded.normalized_hotkey(), Some("Alt+Space"));
    }

    #[test]
    fn rejected_hotkey_keeps_other_changes() {
        let mut config = AppConfig {
            toggle_hotkey: Some("Alt+Space".into()),
            ..Default::default()
        };
        let update = AppConfig {
            toggle_hotkey: Some("Bogus+".into()),
            launch_failure: LaunchFailurePolicy::Notify,
            position_persistence: PositionPersistence::EveryMove,
        };

        config.apply_update(update.clone(), false);
        assert_eq!(config.normalized_hotkey(), Some("Alt+Space"));
        assert_eq!(config.launch_failure, LaunchFailurePolicy::Notify);
        assert_eq!(config.position_persistence, PositionPersistence::EveryMove);

        config.apply_update(update.clone(), true);
        assert_eq!(config, update);
    }
}
