//! Error types shared by the launcher core.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or writing the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize store: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failures while loading or saving `settings.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while turning a custom icon file into something the view can show.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to read icon {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode icon {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode icon thumbnail: {0}")]
    Encode(#[source] image::ImageError),
}

/// Failures reported by the platform opener.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("shortcut path is empty")]
    EmptyPath,

    #[error("failed to open {path}: {message}")]
    Open { path: String, message: String },
}

/// Failures while binding the global show/hide hotkey.
#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("cannot bind hotkey `{hotkey}`: {message}")]
    Register { hotkey: String, message: String },
}
