//! Tab Coordinator.
//!
//! The single process-wide owner of the "active YouTube tab" slot. Reacts to
//! shortcut triggers, tab lifecycle events and readiness signals; verifies
//! video state before dispatching commands; recovers from unresponsive tabs
//! by reloading or opening one. All platform failures are swallowed; this
//! is a best-effort utility, not a system of record.
//!
//! The active-tab slot moves through `Unknown → Discovering → Bound | Unknown`:
//! a tab close or failed dispatch unbinds and triggers rediscovery, a
//! discovery hit or readiness signal binds.

use std::cmp::Reverse;

use log::{debug, warn};

use crate::platform::{NotificationsApi, TabMessenger, TabsApi};
use crate::services::settings::ControlSettings;
use crate::types::command::Command;
use crate::types::errors::PlatformError;
use crate::types::message::{TabRequest, TabResponse};
use crate::types::notification::NotificationKind;
use crate::types::tab::{is_youtube_url, is_youtube_video_url, TabId, TabInfo};
use crate::types::video::VideoState;

/// Pick the control target from a tab query result: YouTube tabs only,
/// video pages preferred over other YouTube pages, most recently accessed
/// first. Ties keep the first tab found, so selection is deterministic.
pub fn select_target(tabs: &[TabInfo]) -> Option<TabId> {
    let youtube: Vec<&TabInfo> = tabs.iter().filter(|t| is_youtube_url(&t.url)).collect();
    if youtube.is_empty() {
        return None;
    }
    let videos: Vec<&TabInfo> = youtube
        .iter()
        .copied()
        .filter(|t| is_youtube_video_url(&t.url))
        .collect();
    let pool = if videos.is_empty() { &youtube } else { &videos };
    pool.iter()
        .enumerate()
        .max_by_key(|(idx, t)| (t.last_accessed.unwrap_or(0), Reverse(*idx)))
        .map(|(_, t)| t.id)
}

/// Coordinator over a platform implementing the three seams.
pub struct TabCoordinator<P>
where
    P: TabsApi + NotificationsApi + TabMessenger,
{
    platform: P,
    settings: ControlSettings,
    active_tab: Option<TabId>,
}

impl<P> TabCoordinator<P>
where
    P: TabsApi + NotificationsApi + TabMessenger,
{
    pub fn new(platform: P) -> Self {
        Self::with_settings(platform, ControlSettings::default())
    }

    pub fn with_settings(platform: P, settings: ControlSettings) -> Self {
        Self {
            platform,
            settings,
            active_tab: None,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.active_tab
    }

    /// Initial discovery, run on extension startup and install.
    pub fn startup(&mut self) {
        self.discover_active_tab();
    }

    /// Shortcut trigger entry point.
    pub fn handle_command(&mut self, command: Command) {
        if self.active_tab.is_none() {
            self.discover_active_tab();
        }
        let Some(tab) = self.active_tab else {
            self.notify(NotificationKind::YoutubeRequired);
            return;
        };

        let state = self.check_video_state(tab);
        if !state.is_loaded {
            self.notify(NotificationKind::VideoNotLoaded);
            return;
        }
        if command.requires_running_video() && !state.is_running {
            self.notify(NotificationKind::VideoNotRunning);
            return;
        }

        match self.platform.send_to_tab(tab, &TabRequest::Command(command)) {
            Ok(TabResponse::Ack { success }) => {
                debug!("dispatched {} to {}: success={}", command, tab, success);
            }
            Ok(TabResponse::State(_)) => {
                debug!("unexpected state response for {} from {}", command, tab);
            }
            Err(e) => {
                // Channel failure means the controller is not loaded in that
                // tab anymore; unbind and run the recovery path.
                debug!("dispatch of {} to {} failed: {}", command, tab, e);
                let stale = self.active_tab.take();
                self.recover(stale);
            }
        }
    }

    /// Query all open tabs and rebind the active slot to the best match, or
    /// unbind when no YouTube tab exists. A failed query leaves the slot
    /// untouched.
    pub fn discover_active_tab(&mut self) -> Option<TabId> {
        match self.platform.query_tabs() {
            Ok(tabs) => {
                self.active_tab = select_target(&tabs);
                debug!("discovery result: {:?}", self.active_tab);
            }
            Err(e) => warn!("tab query failed: {}", e),
        }
        self.active_tab
    }

    /// A tab finished loading; adopt it when it is a YouTube tab.
    pub fn on_tab_updated(&mut self, tab: &TabInfo, load_complete: bool) {
        if load_complete && is_youtube_url(&tab.url) {
            self.active_tab = Some(tab.id);
        }
    }

    /// A tab closed; unbind if it was ours and rediscover immediately.
    pub fn on_tab_removed(&mut self, id: TabId) {
        if self.active_tab == Some(id) {
            self.active_tab = None;
            self.discover_active_tab();
        }
    }

    /// The user switched tabs; re-evaluate which YouTube tab to target.
    pub fn on_tab_activated(&mut self) {
        self.discover_active_tab();
    }

    /// Push-model readiness signal from a tab's content controller. Binds
    /// unconditionally: the controller found a real video element, which
    /// beats whatever URL polling concluded.
    pub fn on_tab_ready(&mut self, id: TabId) {
        debug!("readiness signal from {}", id);
        self.active_tab = Some(id);
    }

    /// The user clicked a notification or its action button.
    pub fn on_notification_clicked(&mut self, notification_id: &str) {
        if let Err(e) = self.platform.clear_notification(notification_id) {
            debug!("clearing notification {} failed: {}", notification_id, e);
        }
        self.navigate_to_youtube();
    }

    fn check_video_state(&mut self, tab: TabId) -> VideoState {
        match self.platform.send_to_tab(tab, &TabRequest::CheckVideoState) {
            Ok(TabResponse::State(state)) => state,
            Ok(TabResponse::Ack { .. }) => VideoState::not_loaded(),
            Err(e) => {
                debug!("video state query for {} failed: {}", tab, e);
                VideoState::not_loaded()
            }
        }
    }

    /// Recovery after a failed dispatch: reload the stale tab so its
    /// controller re-attaches, else rediscover and reload, else open a fresh
    /// tab. One attempt, no re-dispatch of the original command.
    fn recover(&mut self, stale: Option<TabId>) {
        if let Some(tab) = stale {
            if self.platform.reload_tab(tab).is_ok() {
                // Tab still exists; keep it bound while it reloads. Its
                // readiness signal will confirm the binding.
                self.active_tab = Some(tab);
                return;
            }
        }
        if let Some(tab) = self.discover_active_tab() {
            if let Err(e) = self.platform.reload_tab(tab) {
                warn!("recovery reload of {} failed: {}", tab, e);
            }
        } else {
            self.open_youtube_tab();
        }
    }

    /// Bring the user to the active YouTube tab: focus its window, activate
    /// it, and reload when it is a video page so the controller re-attaches.
    /// Without a bound tab, rediscover; without any match, open a new one.
    fn navigate_to_youtube(&mut self) {
        if self.active_tab.is_none() {
            self.discover_active_tab();
        }
        let Some(tab) = self.active_tab else {
            self.open_youtube_tab();
            return;
        };
        if let Err(e) = self.focus_tab(tab) {
            warn!("navigating to {} failed ({}), opening a new tab", tab, e);
            self.open_youtube_tab();
        }
    }

    fn focus_tab(&mut self, tab: TabId) -> Result<(), PlatformError> {
        let info = self.platform.get_tab(tab)?;
        self.platform.activate_tab(tab)?;
        self.platform.focus_window(info.window_id)?;
        if is_youtube_video_url(&info.url) {
            self.platform.reload_tab(tab)?;
        }
        Ok(())
    }

    fn open_youtube_tab(&mut self) {
        let url = self.settings.youtube_home_url.clone();
        match self.platform.create_tab(&url, true) {
            Ok(tab) => self.active_tab = Some(tab.id),
            Err(e) => warn!("opening a YouTube tab failed: {}", e),
        }
    }

    fn notify(&mut self, kind: NotificationKind) {
        if !self.settings.notifications_enabled {
            return;
        }
        if let Err(e) = self.platform.show_notification(&kind.build()) {
            debug!("notification {} failed: {}", kind.id(), e);
        }
    }
}
