use std::sync::{Arc, Mutex, MutexGuard};

use launcher_core::{hotkey::HotkeyBinding, icons::IconLoader, AppConfig, AppController};
use tauri::{menu::CheckMenuItem, Wry};

pub struct AppState {
    pub controller: Arc<Mutex<AppController>>,
    pub config: Arc<Mutex<AppConfig>>,
    pub hotkey: Mutex<HotkeyBinding>,
    pub always_on_top_item: Mutex<Option<CheckMenuItem<Wry>>>,
    pub icons: IconLoader,
}

impl AppState {
    pub fn new(controller: AppController, config: AppConfig, icons: IconLoader) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            config: Arc::new(Mutex::new(config)),
            hotkey: Mutex::new(HotkeyBinding::default()),
            always_on_top_item: Mutex::new(None),
            icons,
        }
    }

    pub fn controller(&self) -> Result<MutexGuard<'_, AppController>, String> {
        self.controller
            .lock()
            .map_err(|_| "shortcut state is unavailable".to_string())
    }
}
