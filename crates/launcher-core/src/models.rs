use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle for a shortcut. Unlike its index it survives removals of
/// other shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortcutId(pub u64);

impl fmt::Display for ShortcutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutRecord {
    /// Missing in data written before ids existed; the registry fills it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShortcutId>,
    pub path: String,
    #[serde(default)]
    pub custom_icon: Option<String>,
}

impl ShortcutRecord {
    pub fn new(id: ShortcutId, path: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            path: path.into(),
            custom_icon: None,
        }
    }

    /// Final path component, splitting on both `/` and `\`.
    pub fn base_name(&self) -> &str {
        base_name(&self.path)
    }
}

pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden => Visibility::Visible,
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}
