use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of user-triggerable playback actions. Commands carry no
/// payload; the wire names double as the shortcut action names declared to
/// the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    #[serde(rename = "toggle-play-pause")]
    TogglePlayPause,
    #[serde(rename = "toggle-pip")]
    TogglePip,
    #[serde(rename = "next-video")]
    NextVideo,
    #[serde(rename = "previous-video")]
    PreviousVideo,
    #[serde(rename = "backward-10s")]
    Backward10s,
    #[serde(rename = "forward-10s")]
    Forward10s,
}

/// Every command, in a stable order.
pub const ALL_COMMANDS: [Command; 6] = [
    Command::TogglePlayPause,
    Command::TogglePip,
    Command::NextVideo,
    Command::PreviousVideo,
    Command::Backward10s,
    Command::Forward10s,
];

impl Command {
    /// The name used on the wire and in shortcut declarations.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Command::TogglePlayPause => "toggle-play-pause",
            Command::TogglePip => "toggle-pip",
            Command::NextVideo => "next-video",
            Command::PreviousVideo => "previous-video",
            Command::Backward10s => "backward-10s",
            Command::Forward10s => "forward-10s",
        }
    }

    /// Parse a wire name. Anything outside the fixed vocabulary is `None`.
    pub fn from_wire(name: &str) -> Option<Command> {
        ALL_COMMANDS.iter().copied().find(|c| c.wire_name() == name)
    }

    /// Whether the command needs a video that is actively playing, not just
    /// loaded. Seeks and PiP are gated on a running video; the remaining
    /// commands only need a loaded one.
    pub fn requires_running_video(&self) -> bool {
        matches!(
            self,
            Command::Backward10s | Command::Forward10s | Command::TogglePip
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
