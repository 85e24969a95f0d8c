//! View model for the toolbar webview.
//!
//! [`render`] rebuilds the whole toolbar from state on every call; there is no
//! diffing, the webview simply replaces its tile list with the new one.

use std::str::FromStr;

use serde::Serialize;

use crate::{
    icons::{IconCategory, IconSource},
    models::{ShortcutId, ShortcutRecord},
    theme::{ThemeKind, ThemeStyle},
};

pub const ADD_TILE_LABEL: &str = "+";
pub const ADD_TILE_TOOLTIP: &str = "Add shortcut";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarView {
    pub theme: ThemeKind,
    pub style: ThemeStyle,
    pub always_on_top: bool,
    pub tiles: Vec<TileView>,
    pub add_tile: AddTile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub id: ShortcutId,
    pub index: usize,
    pub path: String,
    pub tooltip: String,
    pub icon: TileIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TileIcon {
    /// Bundled asset for a file category.
    Category {
        category: IconCategory,
        src: &'static str,
    },
    /// User-chosen icon, already resolved into an image URL.
    Custom { src: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTile {
    pub label: &'static str,
    pub tooltip: &'static str,
}

impl Default for AddTile {
    fn default() -> Self {
        Self {
            label: ADD_TILE_LABEL,
            tooltip: ADD_TILE_TOOLTIP,
        }
    }
}

pub fn render(
    shortcuts: &[ShortcutRecord],
    theme: ThemeKind,
    always_on_top: bool,
    icons: &dyn IconSource,
) -> ToolbarView {
    let tiles = shortcuts
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let id = record.id?;
            Some(TileView {
                id,
                index,
                path: record.path.clone(),
                tooltip: record.base_name().to_string(),
                icon: tile_icon(record, icons),
            })
        })
        .collect();

    ToolbarView {
        theme,
        style: theme.style(),
        always_on_top,
        tiles,
        add_tile: AddTile::default(),
    }
}

fn tile_icon(record: &ShortcutRecord, icons: &dyn IconSource) -> TileIcon {
    if let Some(src) = record
        .custom_icon
        .as_deref()
        .and_then(|path| icons.custom_icon(path))
    {
        return TileIcon::Custom { src };
    }

    let category = IconCategory::for_path(&record.path);
    TileIcon::Category {
        category,
        src: category.asset(),
    }
}

/// Entries of a tile's context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAction {
    Launch,
    CopyPath,
    CustomIcon,
    Remove,
}

const TILE_MENU_PREFIX: &str = "tile";

impl TileAction {
    pub const ALL: [TileAction; 4] = [
        TileAction::Launch,
        TileAction::CopyPath,
        TileAction::CustomIcon,
        TileAction::Remove,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TileAction::Launch => "Launch",
            TileAction::CopyPath => "Copy Path",
            TileAction::CustomIcon => "Custom Icon",
            TileAction::Remove => "Remove",
        }
    }

    fn key(self) -> &'static str {
        match self {
            TileAction::Launch => "launch",
            TileAction::CopyPath => "copy-path",
            TileAction::CustomIcon => "custom-icon",
            TileAction::Remove => "remove",
        }
    }

    /// Menu item id for this action on the shortcut `id`.
    pub fn menu_id(self, id: ShortcutId) -> String {
        format!("{TILE_MENU_PREFIX}:{}:{id}", self.key())
    }

    /// Inverse of [`TileAction::menu_id`]. Returns `None` for ids that do
    /// not belong to a tile menu.
    pub fn parse_menu_id(menu_id: &str) -> Option<(TileAction, ShortcutId)> {
        let mut parts = menu_id.splitn(3, ':');
        if parts.next()? != TILE_MENU_PREFIX {
            return None;
        }
        let action = parts.next()?.parse().ok()?;
        let id = parts.next()?.parse::<u64>().ok()?;
        Some((action, ShortcutId(id)))
    }
}

impl FromStr for TileAction {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TileAction::ALL
            .into_iter()
            .find(|action| action.key() == value)
            .ok_or(())
    }
}
