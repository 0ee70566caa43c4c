//! Page player bridge.
//!
//! Runs in the hosting page's own script context. Polls until it can obtain
//! a handle to the site's internal player API, then routes seeks and state
//! reads through that handle in preference to the raw media element, since
//! the internal API reflects true position and duration more reliably during
//! buffering. Falls back to the element whenever the handle is absent or a
//! call fails. Talks to the content controller over the page-local broadcast
//! channel, never by direct call.

use std::rc::Rc;

use log::{debug, info};

use crate::dom::{MediaHandle, PageDom};
use crate::services::video_controller::SEEK_STEP_SECS;
use crate::types::errors::DomError;
use crate::types::message::{BridgeCommand, PageMessage};
use crate::types::video::{VideoState, MIN_READY_STATE};

/// Handle to the site's internal player object. Every call is fallible: the
/// page may tear the player down at any time.
pub trait PlayerApi {
    fn current_time(&self) -> Result<f64, DomError>;
    fn duration(&self) -> Result<f64, DomError>;
    fn seek_to(&self, seconds: f64) -> Result<(), DomError>;
    fn play(&self) -> Result<(), DomError>;
    fn pause(&self) -> Result<(), DomError>;
    fn next_video(&self) -> Result<(), DomError>;
    fn previous_video(&self) -> Result<(), DomError>;
}

pub type PlayerHandle = Rc<dyn PlayerApi>;

/// Locates the internal player object on the page. Returns `None` until the
/// page has created it; the bridge keeps retrying without a hard timeout.
pub trait PlayerLocator {
    fn locate(&self) -> Option<PlayerHandle>;
}

/// The bridge itself: one per page, polled on a bounded interval.
pub struct PlayerBridge<D: PageDom, L: PlayerLocator> {
    dom: D,
    locator: L,
    player: Option<PlayerHandle>,
}

impl<D: PageDom, L: PlayerLocator> PlayerBridge<D, L> {
    pub fn new(dom: D, locator: L) -> Self {
        Self {
            dom,
            locator,
            player: None,
        }
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    /// Retry tick for player acquisition. Returns whether a handle is held
    /// afterwards. Called indefinitely; the page may create the player late.
    pub fn poll_player(&mut self) -> bool {
        if self.player.is_none() {
            self.player = self.locator.locate();
            if self.player.is_some() {
                info!("internal player handle acquired");
            }
        }
        self.player.is_some()
    }

    /// Handle a broadcast-channel message. State queries are answered;
    /// seek commands are applied with no reply.
    pub fn handle_message(&mut self, message: &PageMessage) -> Option<PageMessage> {
        match message {
            PageMessage::Control { command } => match command {
                BridgeCommand::GetPlayerState => Some(PageMessage::Response {
                    state: self.player_state(),
                }),
                BridgeCommand::Backward10s => {
                    self.skip_backward();
                    None
                }
                BridgeCommand::Forward10s => {
                    self.skip_forward();
                    None
                }
            },
            // Our own responses echo back on the shared channel; ignore them.
            PageMessage::Response { .. } => None,
        }
    }

    pub fn skip_backward(&mut self) {
        self.seek_by(-SEEK_STEP_SECS);
    }

    pub fn skip_forward(&mut self) {
        self.seek_by(SEEK_STEP_SECS);
    }

    pub fn play(&mut self) {
        if let Some(player) = self.player.clone() {
            if player.play().is_ok() {
                return;
            }
            self.drop_player("play");
        }
        if let Some(media) = self.dom.find_media() {
            let _ = media.play();
        }
    }

    pub fn pause(&mut self) {
        if let Some(player) = self.player.clone() {
            if player.pause().is_ok() {
                return;
            }
            self.drop_player("pause");
        }
        if let Some(media) = self.dom.find_media() {
            let _ = media.pause();
        }
    }

    pub fn next_video(&mut self) -> bool {
        if let Some(player) = self.player.clone() {
            if player.next_video().is_ok() {
                return true;
            }
            self.drop_player("next_video");
        }
        false
    }

    pub fn previous_video(&mut self) -> bool {
        if let Some(player) = self.player.clone() {
            if player.previous_video().is_ok() {
                return true;
            }
            self.drop_player("previous_video");
        }
        false
    }

    /// Snapshot merging the internal player's position/duration with the raw
    /// element's flags; falls back to the element alone without a handle.
    pub fn player_state(&self) -> VideoState {
        let media = self.dom.find_media();
        let Some(media) = media else {
            return VideoState::not_loaded();
        };
        let ready_state = media.ready_state();
        let paused = media.paused();
        let ended = media.ended();
        let mut current_time = media.current_time();
        let mut duration = media.duration();
        if let Some(player) = &self.player {
            if let (Ok(t), Ok(d)) = (player.current_time(), player.duration()) {
                current_time = t;
                duration = d;
            }
        }
        VideoState {
            is_loaded: ready_state >= MIN_READY_STATE && media.has_source(),
            is_running: !paused && !ended && current_time > 0.0,
            current_time,
            duration,
            paused,
            ended,
            ready_state,
        }
    }

    fn seek_by(&mut self, delta: f64) {
        let Some(media) = self.dom.find_media() else {
            return;
        };
        if let Some(player) = self.player.clone() {
            match self.player_seek(&player, delta) {
                Ok(()) => return,
                Err(e) => debug!("player seek failed ({}), falling back to element", e),
            }
        }
        Self::element_seek(&media, delta);
    }

    fn player_seek(&self, player: &PlayerHandle, delta: f64) -> Result<(), DomError> {
        let current = player.current_time()?;
        let upper = if delta > 0.0 {
            let duration = player.duration()?;
            if duration.is_finite() && duration > 0.0 {
                duration
            } else {
                f64::INFINITY
            }
        } else {
            f64::INFINITY
        };
        player.seek_to((current + delta).clamp(0.0, upper))
    }

    fn element_seek(media: &MediaHandle, delta: f64) {
        let duration = media.duration();
        let upper = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            f64::INFINITY
        };
        let target = (media.current_time() + delta).clamp(0.0, upper);
        let _ = media.set_current_time(target);
    }

    fn drop_player(&mut self, op: &str) {
        debug!("player handle failed during {}; re-acquiring", op);
        self.player = None;
    }
}
