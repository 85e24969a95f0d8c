use std::path::PathBuf;

use launcher_core::{config::CONFIG_FILE, store::STORE_FILE, AppConfig};
use tauri::{AppHandle, Manager};

const ICON_CACHE_DIR: &str = "icons";

pub fn load(handle: &AppHandle) -> AppConfig {
    match config_path(handle) {
        Some(path) => AppConfig::load(&path),
        None => AppConfig::default(),
    }
}

pub fn save(handle: &AppHandle, config: &AppConfig) -> Result<(), String> {
    let Some(path) = config_path(handle) else {
        return Err("cannot determine the config directory".into());
    };
    config.save(&path).map_err(|err| err.to_string())
}

fn config_path(handle: &AppHandle) -> Option<PathBuf> {
    handle
        .path()
        .app_config_dir()
        .ok()
        .map(|dir| dir.join(CONFIG_FILE))
}

pub fn store_path(handle: &AppHandle) -> Option<PathBuf> {
    handle
        .path()
        .app_data_dir()
        .ok()
        .map(|dir| dir.join(STORE_FILE))
}

pub fn icon_cache_dir(handle: &AppHandle) -> Option<PathBuf> {
    handle
        .path()
        .app_cache_dir()
        .ok()
        .map(|dir| dir.join(ICON_CACHE_DIR))
}
