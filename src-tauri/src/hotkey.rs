use launcher_core::hotkey::HotkeyRegistrar;
use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

use crate::{commands::toggle_window, state::AppState};

/// Registers hotkeys with the global-shortcut plugin; every hotkey toggles the
/// toolbar window.
struct GlobalShortcutRegistrar<'a> {
    app_handle: &'a AppHandle,
}

impl HotkeyRegistrar for GlobalShortcutRegistrar<'_> {
    fn register(&self, hotkey: &str) -> Result<(), String> {
        self.app_handle
            .global_shortcut()
            .on_shortcut(hotkey, |app_handle, _, event| {
                if event.state == ShortcutState::Pressed {
                    toggle_window(app_handle);
                }
            })
            .map_err(|err| err.to_string())
    }

    fn unregister(&self, hotkey: &str) -> Result<(), String> {
        self.app_handle
            .global_shortcut()
            .unregister(hotkey)
            .map_err(|err| err.to_string())
    }
}

/// Binds the show/hide hotkey. On failure the previously bound hotkey stays
/// active.
pub fn bind_hotkey(
    app_handle: &AppHandle,
    state: &AppState,
    hotkey: Option<&str>,
) -> Result<(), String> {
    let mut binding = state
        .hotkey
        .lock()
        .map_err(|_| "hotkey state is unavailable".to_string())?;

    binding
        .rebind(&GlobalShortcutRegistrar { app_handle }, hotkey)
        .map_err(|err| err.to_string())
}
