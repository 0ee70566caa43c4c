//! Per-tab video controller.
//!
//! Runs isolated in each matching tab: owns the reference to the page's
//! media element, executes incoming commands against it, and computes the
//! video state snapshot for the coordinator. Every DOM interaction is
//! best-effort; failures surface as a `false` result, never as a panic or a
//! propagated error.

use log::debug;

use crate::dom::{MediaHandle, PageDom, PipWindowSize};
use crate::services::video_watcher::{VideoWatcher, WatchEvent};
use crate::types::command::Command;
use crate::types::message::{TabRequest, TabResponse};
use crate::types::video::{VideoState, MIN_READY_STATE};

/// Seek step applied by the backward/forward commands, in seconds.
pub const SEEK_STEP_SECS: f64 = 10.0;

/// Selector patterns for the host page's next-video control, most specific
/// first. Best-effort: these track YouTube's player DOM and may go stale.
pub const NEXT_SELECTORS: &[&str] = &[
    ".ytp-next-button",
    "[data-title=\"Next\"]",
    ".ytp-button[title*=\"Next\"]",
    "button[title*=\"Next\"]",
];

/// Selector patterns for the previous-video control.
pub const PREV_SELECTORS: &[&str] = &[
    ".ytp-prev-button",
    "[data-title=\"Previous\"]",
    ".ytp-button[title*=\"Previous\"]",
    "button[title*=\"Previous\"]",
];

/// Controller for the media element of a single page.
pub struct VideoController<D: PageDom> {
    dom: D,
    media: Option<MediaHandle>,
    watcher: VideoWatcher,
    /// Last enhanced state pushed by the page bridge, preferred over the raw
    /// element snapshot while present.
    enhanced_state: Option<VideoState>,
}

impl<D: PageDom> VideoController<D> {
    pub fn new(dom: D) -> Self {
        Self {
            dom,
            media: None,
            watcher: VideoWatcher::new(),
            enhanced_state: None,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    /// DOM mutation feed. Returns true when a readiness announcement should
    /// be sent to the coordinator.
    pub fn on_dom_mutation(&mut self) -> bool {
        let event = self.watcher.on_mutation(&self.dom);
        self.apply_watch_event(event)
    }

    /// Periodic fallback poll feed. Same contract as `on_dom_mutation`.
    pub fn on_poll_tick(&mut self) -> bool {
        let event = self.watcher.on_poll_tick(&self.dom);
        self.apply_watch_event(event)
    }

    fn apply_watch_event(&mut self, event: Option<WatchEvent>) -> bool {
        match event {
            Some(event) if event.announces_ready() => {
                self.media = self.dom.find_media();
                self.enhanced_state = None;
                true
            }
            Some(WatchEvent::Removed) => {
                self.media = None;
                self.enhanced_state = None;
                false
            }
            _ => false,
        }
    }

    /// Content-side dispatcher for the coordinator's request channel.
    pub fn handle_request(&mut self, request: &TabRequest) -> TabResponse {
        match request {
            TabRequest::CheckVideoState => TabResponse::State(self.video_state()),
            TabRequest::Command(command) => TabResponse::Ack {
                success: self.execute(*command),
            },
        }
    }

    /// Dispatch by wire name. Names outside the fixed vocabulary yield false
    /// without touching the page.
    pub fn execute_wire(&mut self, action: &str) -> bool {
        match Command::from_wire(action) {
            Some(command) => self.execute(command),
            None => {
                debug!("unknown command: {}", action);
                false
            }
        }
    }

    /// Apply a command to the known media element. Returns whether the
    /// action was applied.
    pub fn execute(&mut self, command: Command) -> bool {
        let Some(media) = self.media.clone() else {
            debug!("cannot execute {}: no media element", command);
            return false;
        };
        let applied = match command {
            Command::TogglePlayPause => self.toggle_play_pause(&media),
            Command::TogglePip => self.toggle_picture_in_picture(&media),
            Command::NextVideo => self.adjacent_video(NEXT_SELECTORS, "n"),
            Command::PreviousVideo => self.adjacent_video(PREV_SELECTORS, "p"),
            Command::Backward10s => self.seek_by(&media, -SEEK_STEP_SECS),
            Command::Forward10s => self.seek_by(&media, SEEK_STEP_SECS),
        };
        debug!("executed {}: applied={}", command, applied);
        applied
    }

    /// Snapshot of the media element, preferring the enhanced state from the
    /// page bridge when one has been received for the current element.
    pub fn video_state(&self) -> VideoState {
        if let Some(state) = &self.enhanced_state {
            return state.clone();
        }
        self.basic_state()
    }

    /// Snapshot computed from the raw element only.
    pub fn basic_state(&self) -> VideoState {
        let Some(media) = &self.media else {
            return VideoState::not_loaded();
        };
        let ready_state = media.ready_state();
        let paused = media.paused();
        let ended = media.ended();
        let current_time = media.current_time();
        VideoState {
            is_loaded: ready_state >= MIN_READY_STATE && media.has_source(),
            is_running: !paused && !ended && current_time > 0.0,
            current_time,
            duration: media.duration(),
            paused,
            ended,
            ready_state,
        }
    }

    /// Store an enhanced snapshot received from the page bridge.
    pub fn on_bridge_state(&mut self, state: VideoState) {
        self.enhanced_state = Some(state);
    }

    fn toggle_play_pause(&self, media: &MediaHandle) -> bool {
        let result = if media.paused() {
            media.play()
        } else {
            media.pause()
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                debug!("play/pause toggle failed: {}", e);
                false
            }
        }
    }

    fn toggle_picture_in_picture(&self, media: &MediaHandle) -> bool {
        if self.dom.pip_element_active() {
            return match self.dom.exit_picture_in_picture() {
                Ok(()) => true,
                Err(e) => {
                    debug!("exit picture-in-picture failed: {}", e);
                    false
                }
            };
        }
        // Reduced-size request first; platforms that reject the sizing hint
        // get a plain default-size request.
        match media.request_picture_in_picture(PipWindowSize::Reduced) {
            Ok(()) => true,
            Err(first) => {
                debug!("reduced PiP request rejected: {}", first);
                match media.request_picture_in_picture(PipWindowSize::Default) {
                    Ok(()) => true,
                    Err(e) => {
                        debug!("picture-in-picture failed: {}", e);
                        false
                    }
                }
            }
        }
    }

    fn seek_by(&self, media: &MediaHandle, delta: f64) -> bool {
        let duration = media.duration();
        let upper = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            f64::INFINITY
        };
        let target = (media.current_time() + delta).clamp(0.0, upper);
        match media.set_current_time(target) {
            Ok(()) => true,
            Err(e) => {
                // Last resort: let the host page's own arrow-key handler
                // perform the seek.
                debug!("direct seek failed ({}), simulating arrow key", e);
                let key = if delta < 0.0 { "ArrowLeft" } else { "ArrowRight" };
                self.dom.dispatch_key(key)
            }
        }
    }

    fn adjacent_video(&self, selectors: &[&str], fallback_key: &str) -> bool {
        if self.dom.click_first_enabled(selectors) {
            return true;
        }
        self.dom.dispatch_key(fallback_key)
    }
}
