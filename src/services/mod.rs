// ytcontrols services
// Per-page engines: video detection and command execution, the page player
// bridge, and the settings engine.

pub mod player_bridge;
pub mod settings;
pub mod video_controller;
pub mod video_watcher;
