//! Extension core wiring.
//!
//! Holds the coordinator and the shortcut bindings; translates incoming key
//! chords into commands the way the platform's command dispatcher would.

use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::managers::tab_coordinator::TabCoordinator;
use crate::platform::{NotificationsApi, TabMessenger, TabsApi};
use crate::services::settings::ControlSettings;
use crate::types::command::Command;

/// The assembled extension core over a concrete platform.
pub struct Extension<P>
where
    P: TabsApi + NotificationsApi + TabMessenger,
{
    pub coordinator: TabCoordinator<P>,
    pub shortcuts: ShortcutManager,
}

impl<P> Extension<P>
where
    P: TabsApi + NotificationsApi + TabMessenger,
{
    pub fn new(platform: P, settings: ControlSettings) -> Self {
        Self {
            coordinator: TabCoordinator::with_settings(platform, settings),
            shortcuts: ShortcutManager::new(),
        }
    }

    /// Startup sequence: bind the active tab slot from the open tabs.
    pub fn startup(&mut self) {
        self.coordinator.startup();
    }

    /// Resolve a key chord and route the command. Returns false for chords
    /// with no binding.
    pub fn handle_shortcut(&mut self, keys: &str) -> bool {
        match self.shortcuts.command_for(keys) {
            Some(command) => {
                self.coordinator.handle_command(command);
                true
            }
            None => false,
        }
    }

    /// Route a command directly, bypassing chord resolution.
    pub fn handle_command(&mut self, command: Command) {
        self.coordinator.handle_command(command);
    }
}
