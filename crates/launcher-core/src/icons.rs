use std::{
    fs,
    path::{Path, PathBuf},
    time::UNIX_EPOCH,
};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use log::debug;
use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::error::IconError;

/// Edge length of the thumbnails generated for custom icons.
pub const THUMBNAIL_SIDE: u32 = 64;

/// Extensions offered by the custom icon picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "ico"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IconCategory {
    Executable,
    Document,
    Script,
    File,
}

impl IconCategory {
    pub fn for_path(path: &str) -> Self {
        let name = crate::models::base_name(path);
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "exe" => IconCategory::Executable,
            "txt" => IconCategory::Document,
            "sh" | "bat" => IconCategory::Script,
            _ => IconCategory::File,
        }
    }

    /// Asset path relative to the webview root.
    pub fn asset(self) -> &'static str {
        match self {
            IconCategory::Executable => "icons/app.png",
            IconCategory::Document => "icons/document.png",
            IconCategory::Script => "icons/script.png",
            IconCategory::File => "icons/file.png",
        }
    }
}

/// Resolves a user-chosen icon file into an image source the view can show.
pub trait IconSource {
    fn custom_icon(&self, path: &str) -> Option<String>;
}

/// Loads custom icons as PNG data URLs, caching thumbnails on disk.
#[derive(Debug, Clone, Default)]
pub struct IconLoader {
    cache_dir: Option<PathBuf>,
}

impl IconLoader {
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self { cache_dir }
    }

    pub fn load(&self, path: &Path) -> Result<String, IconError> {
        let metadata = fs::metadata(path).map_err(|source| IconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cache_key = icon_cache_key(path, &metadata);

        if let Some(encoded) = self.load_cached(&cache_key) {
            return Ok(data_url(&encoded));
        }

        let bytes = fs::read(path).map_err(|source| IconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let encoded = thumbnail_base64(path, &bytes)?;
        self.store_cached(&cache_key, &encoded);
        Ok(data_url(&encoded))
    }

    fn load_cached(&self, key: &str) -> Option<String> {
        let path = self.cache_file_path(key)?;
        fs::read_to_string(path).ok()
    }

    fn store_cached(&self, key: &str, data: &str) {
        if let Some(path) = self.cache_file_path(key) {
            if let Some(parent) = path.parent() {
                if fs::create_dir_all(parent).is_err() {
                    return;
                }
            }
            let _ = fs::write(path, data);
        }
    }

    fn cache_file_path(&self, key: &str) -> Option<PathBuf> {
        let mut dir = self.cache_dir.clone()?;
        dir.push(format!("{key}.b64"));
        Some(dir)
    }
}

impl IconSource for IconLoader {
    fn custom_icon(&self, path: &str) -> Option<String> {
        match self.load(Path::new(path)) {
            Ok(url) => Some(url),
            Err(err) => {
                debug!("falling back to default icon: {err}");
                None
            }
        }
    }
}

fn icon_cache_key(path: &Path, metadata: &fs::Metadata) -> String {
    let modified = metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha1::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hasher.update(metadata.len().to_le_bytes());
    hasher.update(modified.to_le_bytes());
    hasher.update(THUMBNAIL_SIDE.to_le_bytes());
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(digest.len() * 2);
    const LUT: &[u8; 16] = b"0123456789abcdef";
    for byte in digest {
        hex.push(LUT[(byte >> 4) as usize] as char);
        hex.push(LUT[(byte & 0x0f) as usize] as char);
    }
    hex
}

fn thumbnail_base64(path: &Path, bytes: &[u8]) -> Result<String, IconError> {
    let image = image::load_from_memory(bytes).map_err(|source| IconError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.thumbnail(THUMBNAIL_SIDE, THUMBNAIL_SIDE).to_rgba8();

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgba.as_raw(), rgba.width(), rgba.height(), ColorType::Rgba8)
        .map_err(IconError::Encode)?;

    Ok(BASE64.encode(png))
}

fn data_url(encoded_png: &str) -> String {
    format!("data:image/png;base64,{encoded_png}")
}
