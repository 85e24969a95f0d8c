/// One-way notifications sent from the tray or application menu to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostIntent {
    ToggleTheme,
    TriggerAddShortcut,
    OpenPreferences,
}

/// What the shell has to do after the controller has handled an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentEffect {
    Rerender,
    PickShortcutFile,
    ShowPreferences,
}

impl HostIntent {
    pub fn event_name(self) -> &'static str {
        match self {
            HostIntent::ToggleTheme => "toggle-theme",
            HostIntent::TriggerAddShortcut => "trigger-add-shortcut",
            HostIntent::OpenPreferences => "open-preferences",
        }
    }
}
