//! Core of the Super Shortcut Launcher toolbar: the shortcut registry, its
//! persistent store, the view model the webview paints, and the controller
//! the Tauri shell drives. Nothing in here talks to a window system; platform
//! services come in through small traits such as [`launch::Opener`] and
//! [`icons::IconSource`].

pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod hotkey;
pub mod icons;
pub mod intent;
pub mod launch;
pub mod models;
pub mod paste;
pub mod registry;
pub mod store;
pub mod theme;
pub mod view;

pub use config::AppConfig;
pub use controller::AppController;
pub use error::{ConfigError, HotkeyError, IconError, LaunchError, StoreError};
pub use intent::{HostIntent, IntentEffect};
pub use models::{ShortcutId, ShortcutRecord, Visibility, WindowPosition};
pub use store::Store;
pub use theme::ThemeKind;
pub use view::{TileAction, ToolbarView};
