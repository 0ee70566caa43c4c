//! In-memory simulated browser.
//!
//! Implements the three platform seams against plain data structures so the
//! whole coordinator/controller stack can run without a browser. Each
//! YouTube tab hosts a simulated page with a real `VideoController` behind
//! it; tabs can be marked unresponsive to exercise the recovery path.
//!
//! Event delivery is explicit: the harness drives detection via `tick_page`
//! / `mutate_page` and forwards the returned readiness announcements to the
//! coordinator, the same way the platform would deliver runtime messages.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use uuid::Uuid;

use crate::dom::{MediaElement, MediaHandle, PageDom, PipWindowSize};
use crate::platform::{NotificationsApi, TabMessenger, TabsApi};
use crate::services::video_controller::VideoController;
use crate::types::errors::{DispatchError, DomError, PlatformError};
use crate::types::message::{TabRequest, TabResponse};
use crate::types::notification::Notification;
use crate::types::tab::{is_youtube_url, TabId, TabInfo, WindowId};

// === SimMedia ===

struct MediaState {
    id: Uuid,
    paused: Cell<bool>,
    ended: Cell<bool>,
    current_time: Cell<f64>,
    duration: Cell<f64>,
    ready_state: Cell<u8>,
    has_source: Cell<bool>,
    seek_supported: Cell<bool>,
    pip_supported: Cell<bool>,
    reduced_pip_supported: Cell<bool>,
    pip_active: Cell<bool>,
}

/// Simulated media element. Cheap to clone; clones share state, mirroring
/// multiple handles to one DOM node.
#[derive(Clone)]
pub struct SimMedia {
    state: Rc<MediaState>,
}

impl SimMedia {
    fn new(duration: f64) -> Self {
        Self {
            state: Rc::new(MediaState {
                id: Uuid::new_v4(),
                paused: Cell::new(true),
                ended: Cell::new(false),
                current_time: Cell::new(0.0),
                duration: Cell::new(duration),
                ready_state: Cell::new(4),
                has_source: Cell::new(true),
                seek_supported: Cell::new(true),
                pip_supported: Cell::new(true),
                reduced_pip_supported: Cell::new(true),
                pip_active: Cell::new(false),
            }),
        }
    }

    /// Put the element into a playing state at the given position.
    pub fn begin_playback(&self, at: f64) {
        self.state.paused.set(false);
        self.state.ended.set(false);
        self.state.current_time.set(at);
    }

    pub fn set_ended(&self, ended: bool) {
        self.state.ended.set(ended);
    }

    pub fn set_ready_state(&self, ready_state: u8) {
        self.state.ready_state.set(ready_state);
    }

    pub fn set_has_source(&self, has_source: bool) {
        self.state.has_source.set(has_source);
    }

    pub fn set_position(&self, seconds: f64) {
        self.state.current_time.set(seconds);
    }

    /// Make direct position assignment fail, forcing the key fallback.
    pub fn set_seek_supported(&self, supported: bool) {
        self.state.seek_supported.set(supported);
    }

    pub fn set_pip_supported(&self, supported: bool) {
        self.state.pip_supported.set(supported);
    }

    /// Make the reduced-size PiP request fail while the default one works.
    pub fn set_reduced_pip_supported(&self, supported: bool) {
        self.state.reduced_pip_supported.set(supported);
    }

    pub fn pip_active(&self) -> bool {
        self.state.pip_active.get()
    }
}

impl MediaElement for SimMedia {
    fn instance_id(&self) -> Uuid {
        self.state.id
    }

    fn ready_state(&self) -> u8 {
        self.state.ready_state.get()
    }

    fn has_source(&self) -> bool {
        self.state.has_source.get()
    }

    fn paused(&self) -> bool {
        self.state.paused.get()
    }

    fn ended(&self) -> bool {
        self.state.ended.get()
    }

    fn current_time(&self) -> f64 {
        self.state.current_time.get()
    }

    fn duration(&self) -> f64 {
        self.state.duration.get()
    }

    fn set_current_time(&self, seconds: f64) -> Result<(), DomError> {
        if !self.state.seek_supported.get() {
            return Err(DomError::Unsupported("direct position assignment".to_string()));
        }
        self.state.current_time.set(seconds);
        Ok(())
    }

    fn play(&self) -> Result<(), DomError> {
        self.state.paused.set(false);
        Ok(())
    }

    fn pause(&self) -> Result<(), DomError> {
        self.state.paused.set(true);
        Ok(())
    }

    fn request_picture_in_picture(&self, size: PipWindowSize) -> Result<(), DomError> {
        if !self.state.pip_supported.get() {
            return Err(DomError::Unsupported("picture-in-picture".to_string()));
        }
        if size == PipWindowSize::Reduced && !self.state.reduced_pip_supported.get() {
            return Err(DomError::Unsupported("reduced PiP window".to_string()));
        }
        self.state.pip_active.set(true);
        Ok(())
    }
}

// === SimPage ===

#[derive(Default)]
struct PageState {
    media: Option<SimMedia>,
    buttons: HashSet<String>,
    disabled: HashSet<String>,
    clicked: Vec<String>,
    keys: Vec<String>,
}

/// Simulated page DOM. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct SimPage {
    inner: Rc<RefCell<PageState>>,
}

impl SimPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a fresh media element with the given duration. A second call
    /// models SPA navigation: the old element is replaced by a new instance.
    pub fn load_video(&self, duration: f64) -> SimMedia {
        let media = SimMedia::new(duration);
        self.inner.borrow_mut().media = Some(media.clone());
        media
    }

    pub fn remove_video(&self) {
        self.inner.borrow_mut().media = None;
    }

    pub fn media(&self) -> Option<SimMedia> {
        self.inner.borrow().media.clone()
    }

    /// Make a control matching the selector present and enabled.
    pub fn add_button(&self, selector: &str) {
        self.inner.borrow_mut().buttons.insert(selector.to_string());
    }

    pub fn disable_button(&self, selector: &str) {
        self.inner.borrow_mut().disabled.insert(selector.to_string());
    }

    /// Selectors clicked so far, in order.
    pub fn clicked(&self) -> Vec<String> {
        self.inner.borrow().clicked.clone()
    }

    /// Synthetic keys dispatched so far, in order.
    pub fn dispatched_keys(&self) -> Vec<String> {
        self.inner.borrow().keys.clone()
    }
}

impl PageDom for SimPage {
    fn find_media(&self) -> Option<MediaHandle> {
        self.inner
            .borrow()
            .media
            .clone()
            .map(|media| Rc::new(media) as MediaHandle)
    }

    fn pip_element_active(&self) -> bool {
        self.inner
            .borrow()
            .media
            .as_ref()
            .map(|m| m.pip_active())
            .unwrap_or(false)
    }

    fn exit_picture_in_picture(&self) -> Result<(), DomError> {
        let state = self.inner.borrow();
        match state.media.as_ref() {
            Some(media) if media.pip_active() => {
                media.state.pip_active.set(false);
                Ok(())
            }
            _ => Err(DomError::Api("no picture-in-picture element".to_string())),
        }
    }

    fn click_first_enabled(&self, selectors: &[&str]) -> bool {
        let mut state = self.inner.borrow_mut();
        for selector in selectors {
            if state.buttons.contains(*selector) && !state.disabled.contains(*selector) {
                state.clicked.push(selector.to_string());
                return true;
            }
        }
        false
    }

    fn dispatch_key(&self, key: &str) -> bool {
        self.inner.borrow_mut().keys.push(key.to_string());
        true
    }
}

// === SimBrowser ===

struct TabPage {
    page: SimPage,
    controller: VideoController<SimPage>,
}

impl TabPage {
    fn new() -> Self {
        let page = SimPage::new();
        let controller = VideoController::new(page.clone());
        Self { page, controller }
    }
}

struct SimTab {
    info: TabInfo,
    /// Present on YouTube tabs only; models the injected content controller.
    page: Option<TabPage>,
    responsive: bool,
    reload_count: u32,
}

/// The simulated browser: tabs, a notification surface and per-tab message
/// routing into real `VideoController` instances.
#[derive(Default)]
pub struct SimBrowser {
    tabs: Vec<SimTab>,
    next_tab_id: u32,
    clock: u64,
    focused_window: Option<WindowId>,
    shown: Vec<Notification>,
    cleared: Vec<String>,
}

impl SimBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.info.id == id)
    }

    /// Convenience wrapper around `create_tab` for harness code.
    pub fn open_tab(&mut self, url: &str, active: bool) -> TabId {
        self.create_tab(url, active)
            .map(|info| info.id)
            .expect("SimBrowser::create_tab is infallible")
    }

    /// The simulated page behind a YouTube tab.
    pub fn page(&self, id: TabId) -> Option<SimPage> {
        let idx = self.index_of(id)?;
        self.tabs[idx].page.as_ref().map(|p| p.page.clone())
    }

    /// Drive one detection poll on the tab's controller. Returns whether a
    /// readiness announcement fired; the harness forwards it to the
    /// coordinator like any other runtime message.
    pub fn tick_page(&mut self, id: TabId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        match self.tabs[idx].page.as_mut() {
            Some(page) => page.controller.on_poll_tick(),
            None => false,
        }
    }

    /// Deliver a DOM mutation notification to the tab's controller.
    pub fn mutate_page(&mut self, id: TabId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        match self.tabs[idx].page.as_mut() {
            Some(page) => page.controller.on_dom_mutation(),
            None => false,
        }
    }

    /// Remove the tab entirely. Returns whether it existed; the harness is
    /// responsible for delivering the removal event to the coordinator.
    pub fn close_tab(&mut self, id: TabId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.tabs.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Mark a tab's message channel up or down. An unresponsive tab fails
    /// dispatch the way a tab without a content controller does.
    pub fn set_responsive(&mut self, id: TabId, responsive: bool) {
        if let Some(idx) = self.index_of(id) {
            self.tabs[idx].responsive = responsive;
        }
    }

    pub fn set_last_accessed(&mut self, id: TabId, at: u64) {
        if let Some(idx) = self.index_of(id) {
            self.tabs[idx].info.last_accessed = Some(at);
        }
    }

    pub fn reload_count(&self, id: TabId) -> u32 {
        self.index_of(id)
            .map(|idx| self.tabs[idx].reload_count)
            .unwrap_or(0)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.info.id).collect()
    }

    pub fn tab_url(&self, id: TabId) -> Option<String> {
        self.index_of(id).map(|idx| self.tabs[idx].info.url.clone())
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.shown
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.shown.last()
    }

    pub fn cleared_notifications(&self) -> &[String] {
        &self.cleared
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.focused_window
    }
}

impl TabsApi for SimBrowser {
    fn query_tabs(&self) -> Result<Vec<TabInfo>, PlatformError> {
        Ok(self.tabs.iter().map(|t| t.info.clone()).collect())
    }

    fn get_tab(&self, id: TabId) -> Result<TabInfo, PlatformError> {
        self.index_of(id)
            .map(|idx| self.tabs[idx].info.clone())
            .ok_or(PlatformError::TabNotFound(id))
    }

    fn create_tab(&mut self, url: &str, active: bool) -> Result<TabInfo, PlatformError> {
        self.next_tab_id += 1;
        let id = TabId(self.next_tab_id);
        let now = self.tick();
        if active {
            for tab in &mut self.tabs {
                tab.info.active = false;
            }
        }
        let info = TabInfo {
            id,
            window_id: WindowId(1),
            url: url.to_string(),
            active,
            last_accessed: Some(now),
        };
        let page = is_youtube_url(url).then(TabPage::new);
        self.tabs.push(SimTab {
            info: info.clone(),
            page,
            responsive: true,
            reload_count: 0,
        });
        Ok(info)
    }

    fn reload_tab(&mut self, id: TabId) -> Result<(), PlatformError> {
        let idx = self.index_of(id).ok_or(PlatformError::TabNotFound(id))?;
        let tab = &mut self.tabs[idx];
        tab.reload_count += 1;
        tab.responsive = true;
        // A reload restarts the page from scratch: new DOM, new controller,
        // no media until the page loads one.
        tab.page = is_youtube_url(&tab.info.url).then(TabPage::new);
        Ok(())
    }

    fn activate_tab(&mut self, id: TabId) -> Result<(), PlatformError> {
        let idx = self.index_of(id).ok_or(PlatformError::TabNotFound(id))?;
        let now = self.tick();
        for tab in &mut self.tabs {
            tab.info.active = false;
        }
        self.tabs[idx].info.active = true;
        self.tabs[idx].info.last_accessed = Some(now);
        Ok(())
    }

    fn focus_window(&mut self, id: WindowId) -> Result<(), PlatformError> {
        self.focused_window = Some(id);
        Ok(())
    }
}

impl NotificationsApi for SimBrowser {
    fn show_notification(&mut self, notification: &Notification) -> Result<(), PlatformError> {
        self.shown.push(notification.clone());
        Ok(())
    }

    fn clear_notification(&mut self, id: &str) -> Result<(), PlatformError> {
        self.cleared.push(id.to_string());
        Ok(())
    }
}

impl TabMessenger for SimBrowser {
    fn send_to_tab(
        &mut self,
        id: TabId,
        request: &TabRequest,
    ) -> Result<TabResponse, DispatchError> {
        let idx = self
            .index_of(id)
            .ok_or(DispatchError::NoReceiver(id))?;
        let tab = &mut self.tabs[idx];
        if !tab.responsive {
            return Err(DispatchError::NoReceiver(id));
        }
        match tab.page.as_mut() {
            Some(page) => Ok(page.controller.handle_request(request)),
            None => Err(DispatchError::NoReceiver(id)),
        }
    }
}
