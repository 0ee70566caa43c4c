// ytcontrols state managers
// Managers handle stateful coordination: the active-tab slot and the
// shortcut bindings.

pub mod shortcut_manager;
pub mod tab_coordinator;
