//! Browser platform seams.
//!
//! The coordinator talks to the platform only through these traits: tab
//! queries and lifecycle, the notification surface, and the per-tab message
//! channel. `sim` provides an in-memory implementation of all three.

pub mod sim;

use crate::types::errors::{DispatchError, PlatformError};
use crate::types::message::{TabRequest, TabResponse};
use crate::types::notification::Notification;
use crate::types::tab::{TabId, TabInfo, WindowId};

/// Tab query and lifecycle operations.
pub trait TabsApi {
    fn query_tabs(&self) -> Result<Vec<TabInfo>, PlatformError>;
    fn get_tab(&self, id: TabId) -> Result<TabInfo, PlatformError>;
    /// Open a new tab; when `active`, it also takes focus.
    fn create_tab(&mut self, url: &str, active: bool) -> Result<TabInfo, PlatformError>;
    fn reload_tab(&mut self, id: TabId) -> Result<(), PlatformError>;
    fn activate_tab(&mut self, id: TabId) -> Result<(), PlatformError>;
    fn focus_window(&mut self, id: WindowId) -> Result<(), PlatformError>;
}

/// User-facing notification surface.
pub trait NotificationsApi {
    fn show_notification(&mut self, notification: &Notification) -> Result<(), PlatformError>;
    fn clear_notification(&mut self, id: &str) -> Result<(), PlatformError>;
}

/// Request/response channel into a tab's content controller. There is no
/// application-level timeout; the transport's own failure signal is the only
/// indication that the tab is not ready.
pub trait TabMessenger {
    fn send_to_tab(&mut self, id: TabId, request: &TabRequest)
        -> Result<TabResponse, DispatchError>;
}
