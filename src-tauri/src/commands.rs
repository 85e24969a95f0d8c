use launcher_core::{
    launch::{LaunchDispatcher, LaunchOutcome},
    AppConfig, AppController, HostIntent, IntentEffect, ShortcutId, TileAction, ToolbarView, Visibility,
    WindowPosition,
};
use tauri::{
    menu::MenuBuilder, AppHandle, Emitter, Manager, PhysicalPosition, State, WebviewWindow,
};

use crate::{
    config,
    hotkey::bind_hotkey,
    platform::{self, TauriOpener},
    state::AppState,
    MAIN_WINDOW_LABEL,
};

pub const TOOLBAR_EVENT: &str = "toolbar-updated";
pub const LAUNCH_FAILED_EVENT: &str = "launch-failed";

#[tauri::command]
pub fn get_toolbar(state: State<'_, AppState>) -> Result<ToolbarView, String> {
    let controller = state.controller()?;
    Ok(controller.render(&state.icons))
}

#[tauri::command]
pub async fn launch_shortcut(id: u64, app_handle: AppHandle) -> Result<(), String> {
    let path = {
        let state = app_handle.state::<AppState>();
        let controller = state.controller()?;
        controller.shortcut_path(ShortcutId(id)).map(str::to_string)
    };

    match path {
        Some(path) => launch_path(&app_handle, &path),
        None => log::debug!("ignoring launch of unknown shortcut {id}"),
    }
    Ok(())
}

#[tauri::command]
pub fn add_shortcut(app_handle: AppHandle) {
    pick_shortcut_file(&app_handle);
}

#[tauri::command]
pub fn show_tile_menu(id: u64, window: WebviewWindow) -> Result<(), String> {
    let id = ShortcutId(id);
    let menu = TileAction::ALL
        .into_iter()
        .fold(MenuBuilder::new(&window), |builder, action| {
            builder.text(action.menu_id(id), action.label())
        })
        .build()
        .map_err(|err| err.to_string())?;
    window.popup_menu(&menu).map_err(|err| err.to_string())
}

#[tauri::command]
pub fn paste_shortcuts(
    text: String,
    app_handle: AppHandle,
    state: State<'_, AppState>,
) -> Result<usize, String> {
    let added = state.controller()?.paste(&text).len();
    if added > 0 {
        refresh(&app_handle);
    }
    Ok(added)
}

#[tauri::command]
pub fn toggle_theme(app_handle: AppHandle, state: State<'_, AppState>) -> Result<(), String> {
    state.controller()?.toggle_theme();
    refresh(&app_handle);
    Ok(())
}

#[tauri::command]
pub fn set_dark_theme(
    dark: bool,
    app_handle: AppHandle,
    state: State<'_, AppState>,
) -> Result<(), String> {
    state.controller()?.set_dark_theme(dark);
    refresh(&app_handle);
    Ok(())
}

#[tauri::command]
pub fn set_always_on_top(enabled: bool, app_handle: AppHandle) {
    apply_always_on_top(&app_handle, |controller| controller.set_always_on_top(enabled));
}

#[tauri::command]
pub fn drag_begin(
    x: i32,
    y: i32,
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let origin = window
        .outer_position()
        .ok()
        .map(|position| WindowPosition::new(position.x, position.y));
    state.controller()?.begin_drag((x, y), origin);
    Ok(())
}

#[tauri::command]
pub fn drag_move(
    x: i32,
    y: i32,
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let position = state.controller()?.drag_to((x, y));
    if let Some(position) = position {
        window
            .set_position(PhysicalPosition::new(position.x, position.y))
            .map_err(|err| err.to_string())?;
    }
    Ok(())
}

#[tauri::command]
pub fn drag_end(state: State<'_, AppState>) -> Result<(), String> {
    if let Some(position) = state.controller()?.end_drag() {
        log::debug!("window moved to ({}, {})", position.x, position.y);
    }
    Ok(())
}

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> AppConfig {
    state
        .config
        .lock()
        .map(|cfg| cfg.clone())
        .unwrap_or_default()
}

#[tauri::command]
pub fn update_settings(
    settings: AppConfig,
    app_handle: AppHandle,
    state: State<'_, AppState>,
) -> Result<AppConfig, String> {
    let mut guard = state
        .config
        .lock()
        .map_err(|_| "settings are unavailable".to_string())?;

    let bound = if settings.normalized_hotkey() != guard.normalized_hotkey() {
        bind_hotkey(&app_handle, &state, settings.normalized_hotkey())
    } else {
        Ok(())
    };
    if let Err(err) = &bound {
        log::warn!("keeping previous hotkey: {err}");
    }

    guard.apply_update(settings, bound.is_ok());
    state
        .controller()?
        .set_position_persistence(guard.position_persistence);
    config::save(&app_handle, &guard)?;

    bound.map_err(|err| format!("{err}; other settings were saved"))?;
    Ok(guard.clone())
}

/// Re-renders the toolbar and pushes it to the webview.
pub fn refresh(app_handle: &AppHandle) {
    let state = app_handle.state::<AppState>();
    let view = match state.controller() {
        Ok(controller) => controller.render(&state.icons),
        Err(err) => {
            log::error!("cannot render toolbar: {err}");
            return;
        }
    };

    if let Err(err) = app_handle.emit(TOOLBAR_EVENT, view) {
        log::warn!("failed to send toolbar to the view: {err}");
    }
}

pub fn launch_path(app_handle: &AppHandle, path: &str) {
    let policy = app_handle
        .state::<AppState>()
        .config
        .lock()
        .map(|cfg| cfg.launch_failure)
        .unwrap_or_default();

    let dispatcher = LaunchDispatcher::new(TauriOpener::new(app_handle.clone()), policy);
    if let LaunchOutcome::Failed {
        notice: Some(notice),
    } = dispatcher.launch(path)
    {
        let _ = app_handle.emit(LAUNCH_FAILED_EVENT, notice);
    }
}

pub fn pick_shortcut_file(app_handle: &AppHandle) {
    let handle = app_handle.clone();
    platform::pick_file(app_handle, move |picked| {
        let state = handle.state::<AppState>();
        let added = match state.controller() {
            Ok(mut controller) => controller.add_shortcut(picked.as_deref()).is_some(),
            Err(err) => {
                log::error!("cannot add shortcut: {err}");
                false
            }
        };
        if added {
            refresh(&handle);
        }
    });
}

pub fn handle_tile_action(app_handle: &AppHandle, action: TileAction, id: ShortcutId) {
    let state = app_handle.state::<AppState>();
    let path = match state.controller() {
        Ok(controller) => controller.shortcut_path(id).map(str::to_string),
        Err(err) => {
            log::error!("cannot handle {action:?}: {err}");
            return;
        }
    };
    let Some(path) = path else {
        log::debug!("ignoring {action:?} on unknown shortcut {id}");
        return;
    };

    match action {
        TileAction::Launch => launch_path(app_handle, &path),
        TileAction::CopyPath => platform::copy_text(app_handle, &path),
        TileAction::CustomIcon => {
            let handle = app_handle.clone();
            platform::pick_image(app_handle, move |picked| {
                let Some(icon) = picked else {
                    return;
                };
                let state = handle.state::<AppState>();
                let changed = state
                    .controller()
                    .map(|mut controller| controller.set_custom_icon_by_id(id, Some(&icon)))
                    .unwrap_or(false);
                if changed {
                    refresh(&handle);
                }
            });
        }
        TileAction::Remove => {
            let removed = state
                .controller()
                .map(|mut controller| controller.remove_shortcut_by_id(id).is_some())
                .unwrap_or(false);
            if removed {
                refresh(app_handle);
            }
        }
    }
}

pub fn handle_intent(app_handle: &AppHandle, intent: HostIntent) {
    let effect = {
        let state = app_handle.state::<AppState>();
        let Ok(mut controller) = state.controller() else {
            return;
        };
        controller.handle_intent(intent)
    };

    match effect {
        IntentEffect::Rerender => refresh(app_handle),
        IntentEffect::PickShortcutFile => pick_shortcut_file(app_handle),
        IntentEffect::ShowPreferences => {
            show_window(app_handle);
            let _ = app_handle.emit(intent.event_name(), ());
        }
    }
}

pub fn toggle_always_on_top(app_handle: &AppHandle) {
    apply_always_on_top(app_handle, AppController::toggle_always_on_top);
}

/// Runs `change` on the controller, then syncs the window, the tray checkbox
/// and the view with the resulting flag.
fn apply_always_on_top<F>(app_handle: &AppHandle, change: F)
where
    F: FnOnce(&mut AppController) -> bool,
{
    let state = app_handle.state::<AppState>();
    let Ok(enabled) = state
        .controller()
        .map(|mut controller| change(&mut controller))
    else {
        return;
    };

    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        if let Err(err) = window.set_always_on_top(enabled) {
            log::warn!("failed to change always-on-top: {err}");
        }
    }
    if let Ok(item) = state.always_on_top_item.lock() {
        if let Some(item) = item.as_ref() {
            let _ = item.set_checked(enabled);
        }
    }
    refresh(app_handle);
}

pub fn toggle_window(app_handle: &AppHandle) {
    let Some(state) = app_handle.try_state::<AppState>() else {
        return;
    };
    let visibility = state
        .controller()
        .map(|mut controller| controller.toggle_visibility());
    if let Ok(visibility) = visibility {
        apply_visibility(app_handle, visibility);
    }
}

pub fn show_window(app_handle: &AppHandle) {
    let Some(state) = app_handle.try_state::<AppState>() else {
        return;
    };
    let visibility = state
        .controller()
        .map(|mut controller| controller.show());
    if let Ok(visibility) = visibility {
        apply_visibility(app_handle, visibility);
    }
}

fn apply_visibility(app_handle: &AppHandle, visibility: Visibility) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    if visibility.is_visible() {
        let _ = window.show();
        let _ = window.set_focus();
    } else {
        let _ = window.hide();
    }
}
