//! Adapters between the launcher core and the Tauri plugins that provide the
//! native dialogs, clipboard and default-handler launching.

use launcher_core::{icons::IMAGE_EXTENSIONS, launch::Opener, LaunchError};
use tauri::AppHandle;
use tauri_plugin_clipboard_manager::ClipboardExt;
use tauri_plugin_dialog::{DialogExt, FilePath};
use tauri_plugin_opener::OpenerExt;

pub struct TauriOpener {
    app_handle: AppHandle,
}

impl TauriOpener {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl Opener for TauriOpener {
    fn open_path(&self, path: &str) -> Result<(), LaunchError> {
        self.app_handle
            .opener()
            .open_path(path, Option::<&str>::None)
            .map_err(|err| LaunchError::Open {
                path: path.to_string(),
                message: err.to_string(),
            })
    }
}

/// Shows the native file picker; `on_pick` receives `None` on cancel.
pub fn pick_file<F>(app_handle: &AppHandle, on_pick: F)
where
    F: FnOnce(Option<String>) + Send + 'static,
{
    app_handle
        .dialog()
        .file()
        .set_title("Add Shortcut")
        .pick_file(move |file| on_pick(file.and_then(file_path_to_string)));
}

pub fn pick_image<F>(app_handle: &AppHandle, on_pick: F)
where
    F: FnOnce(Option<String>) + Send + 'static,
{
    app_handle
        .dialog()
        .file()
        .set_title("Custom Icon")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file(move |file| on_pick(file.and_then(file_path_to_string)));
}

pub fn copy_text(app_handle: &AppHandle, text: &str) {
    if let Err(err) = app_handle.clipboard().write_text(text.to_string()) {
        log::warn!("failed to copy to clipboard: {err}");
    }
}

fn file_path_to_string(file: FilePath) -> Option<String> {
    file.into_path()
        .ok()
        .map(|path| path.to_string_lossy().into_owned())
}
