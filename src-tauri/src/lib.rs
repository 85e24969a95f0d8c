mod commands;
mod config;
mod hotkey;
mod platform;
mod state;

use commands::{
    add_shortcut, drag_begin, drag_end, drag_move, get_settings, get_toolbar, handle_intent,
    handle_tile_action, launch_shortcut, paste_shortcuts, set_always_on_top, set_dark_theme,
    show_tile_menu, show_window, toggle_always_on_top, toggle_theme, toggle_window,
    update_settings,
};
use hotkey::bind_hotkey;
use launcher_core::{
    icons::IconLoader, AppController, HostIntent, Store, TileAction, WindowPosition,
};
use log::{info, warn};
use state::AppState;
use tauri::{
    menu::{CheckMenuItemBuilder, MenuBuilder, MenuEvent, SubmenuBuilder},
    tray::TrayIconBuilder,
    App, AppHandle, Manager, PhysicalPosition, WindowEvent,
};
use tracing_subscriber::EnvFilter;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
const TRAY_ID: &str = "main-tray";
const TRAY_TOOLTIP: &str = "Super Shortcut Launcher";
const MENU_SHOW_HIDE: &str = "tray-show-hide";
const MENU_ALWAYS_ON_TOP: &str = "tray-always-on-top";
const MENU_QUIT: &str = "tray-quit";
const MENU_ADD_SHORTCUT: &str = "menu-add-shortcut";
const MENU_PREFERENCES: &str = "menu-preferences";
const MENU_TOGGLE_THEME: &str = "menu-toggle-theme";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, _, _| {
            show_window(app_handle);
        }))
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_clipboard_manager::init())
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            get_toolbar,
            launch_shortcut,
            add_shortcut,
            show_tile_menu,
            paste_shortcuts,
            toggle_theme,
            set_dark_theme,
            set_always_on_top,
            drag_begin,
            drag_move,
            drag_end,
            get_settings,
            update_settings
        ])
        .on_menu_event(on_menu_event)
        .on_window_event(|window, event| {
            if let WindowEvent::Moved(position) = event {
                let Some(state) = window.try_state::<AppState>() else {
                    return;
                };
                if let Ok(mut controller) = state.controller() {
                    controller.set_position(WindowPosition::new(position.x, position.y));
                }
            }
        })
        .setup(|app| {
            let handle = app.handle();

            let config = config::load(handle);
            let store = match config::store_path(handle) {
                Some(path) => Store::open(path),
                None => {
                    warn!("no app data directory, shortcuts will not be saved");
                    Store::in_memory()
                }
            };
            let controller = AppController::load(store, config.position_persistence);
            let icons = IconLoader::new(config::icon_cache_dir(handle));

            if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
                let position = controller.position();
                let _ = window.set_position(PhysicalPosition::new(position.x, position.y));
                let _ = window.set_always_on_top(controller.always_on_top());
            }

            let always_on_top = controller.always_on_top();
            app.manage(AppState::new(controller, config.clone(), icons));
            let state = app.state::<AppState>();

            if let Err(err) = bind_hotkey(handle, &state, config.normalized_hotkey()) {
                warn!(
                    "failed to register global shortcut {:?}: {}",
                    config.toggle_hotkey, err
                );
            }

            build_app_menu(app)?;
            build_tray(app, &state, always_on_top)?;

            info!("toolbar ready");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn build_app_menu(app: &App) -> tauri::Result<()> {
    let file_menu = SubmenuBuilder::new(app, "File")
        .text(MENU_ADD_SHORTCUT, "Add Shortcut")
        .separator()
        .quit()
        .build()?;
    let edit_menu = SubmenuBuilder::new(app, "Edit")
        .copy()
        .paste()
        .separator()
        .text(MENU_PREFERENCES, "Preferences")
        .build()?;
    let view_menu = SubmenuBuilder::new(app, "View")
        .text(MENU_TOGGLE_THEME, "Toggle Theme")
        .build()?;

    let menu = MenuBuilder::new(app)
        .item(&file_menu)
        .item(&edit_menu)
        .item(&view_menu)
        .build()?;
    app.handle().set_menu(menu)?;
    Ok(())
}

fn build_tray(app: &App, state: &AppState, always_on_top: bool) -> tauri::Result<()> {
    let always_on_top_item = CheckMenuItemBuilder::with_id(MENU_ALWAYS_ON_TOP, "Always on Top")
        .checked(always_on_top)
        .build(app)?;

    let tray_menu = MenuBuilder::new(app)
        .text(MENU_SHOW_HIDE, "Show/Hide")
        .item(&always_on_top_item)
        .separator()
        .text(MENU_QUIT, "Quit")
        .build()?;

    if let Ok(mut slot) = state.always_on_top_item.lock() {
        *slot = Some(always_on_top_item);
    }

    let tray_builder = if let Some(icon) = app.default_window_icon().cloned() {
        TrayIconBuilder::with_id(TRAY_ID).icon(icon)
    } else {
        TrayIconBuilder::with_id(TRAY_ID)
    };

    tray_builder
        .menu(&tray_menu)
        .tooltip(TRAY_TOOLTIP)
        .build(app)?;

    Ok(())
}

/// Single dispatch point for tray, application menu and tile context menu
/// events.
fn on_menu_event(app_handle: &AppHandle, event: MenuEvent) {
    let id = event.id().as_ref();
    if let Some((action, shortcut)) = TileAction::parse_menu_id(id) {
        handle_tile_action(app_handle, action, shortcut);
        return;
    }

    match id {
        MENU_SHOW_HIDE => toggle_window(app_handle),
        MENU_ALWAYS_ON_TOP => toggle_always_on_top(app_handle),
        MENU_QUIT => app_handle.exit(0),
        MENU_ADD_SHORTCUT => handle_intent(app_handle, HostIntent::TriggerAddShortcut),
        MENU_PREFERENCES => handle_intent(app_handle, HostIntent::OpenPreferences),
        MENU_TOGGLE_THEME => handle_intent(app_handle, HostIntent::ToggleTheme),
        _ => {}
    }
}
