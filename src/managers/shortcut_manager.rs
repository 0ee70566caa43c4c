//! Shortcut Manager.
//!
//! Maps global key chords to playback commands with conflict detection and
//! platform-specific modifier adaptation. The authoritative chord set is
//! declared to the platform externally; this manager mirrors it so the core
//! can resolve an incoming chord to a command and report bindings.

use std::collections::HashMap;

use crate::types::command::Command;
use crate::types::errors::ShortcutError;

/// Trait defining shortcut binding operations.
pub trait ShortcutManagerTrait {
    fn bind(&mut self, command: Command, keys: &str) -> Result<(), ShortcutError>;
    fn unbind(&mut self, command: Command) -> Result<(), ShortcutError>;
    fn chord_for(&self, command: Command) -> Option<&str>;
    fn command_for(&self, keys: &str) -> Option<Command>;
    fn bindings(&self) -> &HashMap<Command, String>;
    fn reset_to_defaults(&mut self);
    fn conflict(&self, keys: &str, exclude: Option<Command>) -> Option<Command>;
}

/// In-memory shortcut manager with platform adaptation.
pub struct ShortcutManager {
    bindings: HashMap<Command, String>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        let mut mgr = Self {
            bindings: HashMap::new(),
        };
        mgr.reset_to_defaults();
        mgr
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }

    fn default_bindings() -> Vec<(Command, &'static str)> {
        vec![
            (Command::TogglePlayPause, "Ctrl+Shift+Space"),
            (Command::Backward10s, "Ctrl+Shift+Left"),
            (Command::Forward10s, "Ctrl+Shift+Right"),
            (Command::TogglePip, "Ctrl+Shift+P"),
            (Command::NextVideo, "Ctrl+Shift+Period"),
            (Command::PreviousVideo, "Ctrl+Shift+Comma"),
        ]
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn bind(&mut self, command: Command, keys: &str) -> Result<(), ShortcutError> {
        if keys.is_empty() {
            return Err(ShortcutError::InvalidKeys(
                "Keys cannot be empty".to_string(),
            ));
        }
        if let Some(conflicting) = self.conflict(keys, Some(command)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys, conflicting
            )));
        }
        let adapted = Self::adapt_for_platform(keys);
        self.bindings.insert(command, adapted);
        Ok(())
    }

    fn unbind(&mut self, command: Command) -> Result<(), ShortcutError> {
        self.bindings
            .remove(&command)
            .map(|_| ())
            .ok_or_else(|| ShortcutError::NotFound(command.to_string()))
    }

    fn chord_for(&self, command: Command) -> Option<&str> {
        self.bindings.get(&command).map(|s| s.as_str())
    }

    fn command_for(&self, keys: &str) -> Option<Command> {
        let adapted = Self::adapt_for_platform(keys);
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == adapted)
            .map(|(command, _)| *command)
    }

    fn bindings(&self) -> &HashMap<Command, String> {
        &self.bindings
    }

    fn reset_to_defaults(&mut self) {
        self.bindings = Self::default_bindings()
            .into_iter()
            .map(|(command, keys)| (command, Self::adapt_for_platform(keys)))
            .collect();
    }

    fn conflict(&self, keys: &str, exclude: Option<Command>) -> Option<Command> {
        let adapted = Self::adapt_for_platform(keys);
        for (command, bound) in &self.bindings {
            if *bound == adapted && exclude != Some(*command) {
                return Some(*command);
            }
        }
        None
    }
}
