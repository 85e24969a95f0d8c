//! Application state and the operations the shell drives it with.
//!
//! Every mutation is written through to the [`Store`] before the method
//! returns. A failed write is logged and the in-memory state is kept, so the
//! toolbar keeps working on a read-only or full disk.

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    drag::{DragTracker, PositionPersistence},
    icons::IconSource,
    intent::{HostIntent, IntentEffect},
    models::{ShortcutId, ShortcutRecord, Visibility, WindowPosition},
    paste::paths_from_paste,
    registry::ShortcutRegistry,
    store::{Store, KEY_ALWAYS_ON_TOP, KEY_DARK_THEME, KEY_WINDOW_POSITION},
    theme::ThemeKind,
    view::{render, ToolbarView},
};

#[derive(Debug)]
pub struct AppController {
    store: Store,
    registry: ShortcutRegistry,
    theme: ThemeKind,
    position: WindowPosition,
    always_on_top: bool,
    visibility: Visibility,
    drag: DragTracker,
    position_persistence: PositionPersistence,
}

impl AppController {
    pub fn load(store: Store, position_persistence: PositionPersistence) -> Self {
        let registry = ShortcutRegistry::load(&store);
        let theme = ThemeKind::from_dark(store.get(KEY_DARK_THEME, true));
        let position = store.get(KEY_WINDOW_POSITION, WindowPosition::default());
        let always_on_top = store.get(KEY_ALWAYS_ON_TOP, true);

        info!(
            "loaded {} shortcuts, theme {:?}, position ({}, {})",
            registry.len(),
            theme,
            position.x,
            position.y
        );

        Self {
            store,
            registry,
            theme,
            position,
            always_on_top,
            visibility: Visibility::Visible,
            drag: DragTracker::default(),
            position_persistence,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn shortcuts(&self) -> &[ShortcutRecord] {
        self.registry.list()
    }

    pub fn theme(&self) -> ThemeKind {
        self.theme
    }

    pub fn position(&self) -> WindowPosition {
        self.position
    }

    pub fn always_on_top(&self) -> bool {
        self.always_on_top
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_position_persistence(&mut self, persistence: PositionPersistence) {
        self.position_persistence = persistence;
    }

    pub fn render(&self, icons: &dyn IconSource) -> ToolbarView {
        render(self.registry.list(), self.theme, self.always_on_top, icons)
    }

    pub fn shortcut_path(&self, id: ShortcutId) -> Option<&str> {
        self.registry.get(id).map(|record| record.path.as_str())
    }

    /// Adds the file picked by the user; `None` or an empty path means the
    /// picker was cancelled.
    pub fn add_shortcut(&mut self, path: Option<&str>) -> Option<ShortcutId> {
        let id = self.registry.add(path?)?;
        debug!("added shortcut {id}");
        self.persist_shortcuts();
        Some(id)
    }

    pub fn paste(&mut self, text: &str) -> Vec<ShortcutId> {
        let added: Vec<_> = paths_from_paste(text)
            .iter()
            .filter_map(|path| self.registry.add(path))
            .collect();
        if !added.is_empty() {
            debug!("added {} pasted shortcuts", added.len());
            self.persist_shortcuts();
        }
        added
    }

    pub fn remove_shortcut(&mut self, index: usize) -> Option<ShortcutRecord> {
        let removed = self.registry.remove(index)?;
        self.persist_shortcuts();
        Some(removed)
    }

    pub fn remove_shortcut_by_id(&mut self, id: ShortcutId) -> Option<ShortcutRecord> {
        let removed = self.registry.remove_by_id(id)?;
        self.persist_shortcuts();
        Some(removed)
    }

    pub fn set_custom_icon(&mut self, index: usize, icon: Option<&str>) -> bool {
        let changed = self.registry.set_custom_icon(index, icon);
        if changed {
            self.persist_shortcuts();
        }
        changed
    }

    pub fn set_custom_icon_by_id(&mut self, id: ShortcutId, icon: Option<&str>) -> bool {
        let changed = self.registry.set_custom_icon_by_id(id, icon);
        if changed {
            self.persist_shortcuts();
        }
        changed
    }

    pub fn toggle_theme(&mut self) -> ThemeKind {
        self.set_dark_theme(!self.theme.is_dark())
    }

    pub fn set_dark_theme(&mut self, is_dark: bool) -> ThemeKind {
        self.theme = ThemeKind::from_dark(is_dark);
        self.persist(KEY_DARK_THEME, &is_dark);
        self.theme
    }

    pub fn toggle_always_on_top(&mut self) -> bool {
        self.set_always_on_top(!self.always_on_top)
    }

    pub fn set_always_on_top(&mut self, enabled: bool) -> bool {
        self.always_on_top = enabled;
        self.persist(KEY_ALWAYS_ON_TOP, &enabled);
        enabled
    }

    pub fn toggle_visibility(&mut self) -> Visibility {
        self.visibility = self.visibility.toggled();
        self.visibility
    }

    pub fn show(&mut self) -> Visibility {
        self.visibility = Visibility::Visible;
        self.visibility
    }

    pub fn handle_intent(&mut self, intent: HostIntent) -> IntentEffect {
        debug!("host intent {}", intent.event_name());
        match intent {
            HostIntent::ToggleTheme => {
                self.toggle_theme();
                IntentEffect::Rerender
            }
            HostIntent::TriggerAddShortcut => IntentEffect::PickShortcutFile,
            HostIntent::OpenPreferences => IntentEffect::ShowPreferences,
        }
    }

    /// Starts a drag. `window_origin` is the window's actual position when
    /// the shell can query it; otherwise the last known position is used.
    pub fn begin_drag(&mut self, pointer: (i32, i32), window_origin: Option<WindowPosition>) {
        let origin = window_origin.unwrap_or(self.position);
        self.position = origin;
        self.drag.begin(pointer, origin);
    }

    pub fn drag_to(&mut self, pointer: (i32, i32)) -> Option<WindowPosition> {
        let position = self.drag.motion(pointer)?;
        self.position = position;
        if self.position_persistence == PositionPersistence::EveryMove {
            self.persist(KEY_WINDOW_POSITION, &position);
        }
        Some(position)
    }

    pub fn end_drag(&mut self) -> Option<WindowPosition> {
        let position = self.drag.end()?;
        self.position = position;
        self.persist(KEY_WINDOW_POSITION, &position);
        Some(position)
    }

    /// Records a position change that did not come from a drag gesture.
    pub fn set_position(&mut self, position: WindowPosition) {
        if self.drag.is_dragging() || self.position == position {
            return;
        }
        self.position = position;
        self.persist(KEY_WINDOW_POSITION, &position);
    }

    fn persist_shortcuts(&mut self) {
        if let Err(err) = self.registry.save(&mut self.store) {
            warn!("failed to persist shortcuts: {err}");
        }
    }

    fn persist<T: Serialize>(&mut self, key: &str, value: &T) {
        if let Err(err) = self.store.set(key, value) {
            warn!("failed to persist `{key}`: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KEY_SHORTCUTS;

    struct NoIcons;

    impl IconSource for NoIcons {
        fn custom_icon(&self, _path: &str) -> Option<String> {
            None
        }
    }

    fn controller() -> AppController {
        AppController::load(Store::in_memory(), PositionPersistence::default())
    }

    fn stored_records(controller: &AppController) -> Vec<ShortcutRecord> {
        controller.store().get(KEY_SHORTCUTS, Vec::new())
    }

    #[test]
    fn defaults_on_empty_store() {
        let controller = controller();
        assert!(controller.shortcuts().is_empty());
        assert_eq!(controller.theme(), ThemeKind::Dark);
        assert_eq!(controller.position(), WindowPosition::new(100, 100));
        assert!(controller.always_on_top());
        assert!(controller.visibility().is_visible());
    }

    #[test]
    fn shortcut_scenario_writes_through() {
        let mut controller = controller();

        controller.add_shortcut(Some("/usr/bin/vim")).unwrap();
        assert_eq!(stored_records(&controller)[0].path, "/usr/bin/vim");
        assert_eq!(stored_records(&controller)[0].custom_icon, None);

        assert!(controller.set_custom_icon(0, Some("/icons/vim.png")));
        assert_eq!(
            stored_records(&controller)[0].custom_icon.as_deref(),
            Some("/icons/vim.png")
        );

        assert!(controller.remove_shortcut(0).is_some());
        assert!(stored_records(&controller).is_empty());
        assert!(controller.shortcuts().is_empty());
    }

    #[test]
    fn cancelled_pick_changes_nothing() {
        let mut controller = controller();
        assert_eq!(controller.add_shortcut(None), None);
        assert_eq!(controller.add_shortcut(Some("")), None);
        assert!(!controller.store().contains(KEY_SHORTCUTS));
    }

    #[test]
    fn stale_ids_are_ignored() {
        let mut controller = controller();
        let id = controller.add_shortcut(Some("/a")).unwrap();
        controller.remove_shortcut_by_id(id).unwrap();

        assert!(controller.remove_shortcut_by_id(id).is_none());
        assert!(!controller.set_custom_icon_by_id(id, Some("/x.png")));
        assert!(controller.remove_shortcut(0).is_none());
        assert_eq!(controller.shortcut_path(id), None);
    }

    #[test]
    fn paste_adds_each_path() {
        let mut controller = controller();
        let added = controller.paste("file:///opt/run.sh\nnot a path\n/usr/bin/htop");

        assert_eq!(added.len(), 2);
        assert_eq!(stored_records(&controller).len(), 2);
        assert!(controller.paste("nothing useful").is_empty());
    }

    #[test]
    fn theme_toggle_persists_and_rerenders() {
        let mut controller = controller();
        let before = controller.render(&NoIcons).style;

        assert_eq!(
            controller.handle_intent(HostIntent::ToggleTheme),
            IntentEffect::Rerender
        );
        assert_eq!(controller.theme(), ThemeKind::Light);
        assert!(!controller.store().get(KEY_DARK_THEME, true));

        controller.toggle_theme();
        assert_eq!(controller.render(&NoIcons).style, before);
        assert!(controller.store().get(KEY_DARK_THEME, false));
    }

    #[test]
    fn other_intents_map_to_effects() {
        let mut controller = controller();
        assert_eq!(
            controller.handle_intent(HostIntent::TriggerAddShortcut),
            IntentEffect::PickShortcutFile
        );
        assert_eq!(
            controller.handle_intent(HostIntent::OpenPreferences),
            IntentEffect::ShowPreferences
        );
        assert_eq!(controller.theme(), ThemeKind::Dark);
    }

    #[test]
    fn always_on_top_and_visibility() {
        let mut controller = controller();
        assert!(!controller.toggle_always_on_top());
        assert!(!controller.store().get(KEY_ALWAYS_ON_TOP, true));

        assert_eq!(controller.toggle_visibility(), Visibility::Hidden);
        assert_eq!(controller.toggle_visibility(), Visibility::Visible);
        controller.toggle_visibility();
        assert_eq!(controller.show(), Visibility::Visible);
    }

    #[test]
    fn drag_persists_only_on_end_by_default() {
        let mut controller = controller();
        controller.begin_drag((300, 300), Some(WindowPosition::new(40, 60)));

        assert_eq!(
            controller.drag_to((320, 290)),
            Some(WindowPosition::new(60, 50))
        );
        assert!(!controller.store().contains(KEY_WINDOW_POSITION));

        assert_eq!(controller.end_drag(), Some(WindowPosition::new(60, 50)));
        assert_eq!(
            controller
                .store()
                .get(KEY_WINDOW_POSITION, WindowPosition::default()),
            WindowPosition::new(60, 50)
        );
    }

    #[test]
    fn every_move_persistence_writes_each_motion() {
        let mut controller = AppController::load(Store::in_memory(), PositionPersistence::EveryMove);
        controller.begin_drag((0, 0), None);
        controller.drag_to((5, 7));

        assert_eq!(
            controller
                .store()
                .get(KEY_WINDOW_POSITION, WindowPosition::default()),
            WindowPosition::new(105, 107)
        );
    }

    #[test]
    fn external_moves_are_recorded_outside_drags() {
        let mut controller = controller();
        controller.set_position(WindowPosition::new(7, 8));
        assert_eq!(
            controller
                .store()
                .get(KEY_WINDOW_POSITION, WindowPosition::default()),
            WindowPosition::new(7, 8)
        );

        controller.begin_drag((0, 0), None);
        controller.set_position(WindowPosition::new(500, 500));
        assert_eq!(controller.position(), WindowPosition::new(7, 8));
    }
}
