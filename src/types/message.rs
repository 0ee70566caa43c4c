//! Inter-context message protocol.
//!
//! Two typed channels with closed vocabularies:
//! - a request/response channel between the background coordinator and the
//!   per-tab controller (`TabRequest` / `TabResponse`), plus the one-way
//!   readiness signal (`RuntimeMessage`);
//! - a page-local broadcast channel between the content controller and the
//!   page player bridge (`PageMessage`).
//!
//! Everything serializes as small tagged JSON records; unknown action names
//! fail deserialization rather than being silently accepted.

use serde::{Deserialize, Serialize};

use crate::types::command::Command;
use crate::types::video::VideoState;

const CHECK_VIDEO_STATE: &str = "check-video-state";
const TAB_READY: &str = "youtube-tab-ready";

/// Raw wire shape shared by the action-tagged messages: `{"action": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireAction {
    pub action: String,
}

/// Background → content request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireAction", try_from = "WireAction")]
pub enum TabRequest {
    /// Apply a playback command; answered with an acknowledgment.
    Command(Command),
    /// Query the media element snapshot; answered with a `VideoState`.
    CheckVideoState,
}

impl From<TabRequest> for WireAction {
    fn from(request: TabRequest) -> Self {
        let action = match request {
            TabRequest::Command(cmd) => cmd.wire_name().to_string(),
            TabRequest::CheckVideoState => CHECK_VIDEO_STATE.to_string(),
        };
        WireAction { action }
    }
}

impl TryFrom<WireAction> for TabRequest {
    type Error = String;

    fn try_from(wire: WireAction) -> Result<Self, Self::Error> {
        if wire.action == CHECK_VIDEO_STATE {
            return Ok(TabRequest::CheckVideoState);
        }
        Command::from_wire(&wire.action)
            .map(TabRequest::Command)
            .ok_or_else(|| format!("unknown action: {}", wire.action))
    }
}

/// Content → background announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireAction", try_from = "WireAction")]
pub enum RuntimeMessage {
    /// A controllable video element was found on the page.
    TabReady,
}

impl From<RuntimeMessage> for WireAction {
    fn from(message: RuntimeMessage) -> Self {
        let RuntimeMessage::TabReady = message;
        WireAction {
            action: TAB_READY.to_string(),
        }
    }
}

impl TryFrom<WireAction> for RuntimeMessage {
    type Error = String;

    fn try_from(wire: WireAction) -> Result<Self, Self::Error> {
        if wire.action == TAB_READY {
            Ok(RuntimeMessage::TabReady)
        } else {
            Err(format!("unknown runtime message: {}", wire.action))
        }
    }
}

/// Content → background response. Commands are acknowledged with a boolean;
/// the state query returns a full snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TabResponse {
    State(VideoState),
    Ack { success: bool },
}

/// Commands understood by the page player bridge over the broadcast channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeCommand {
    #[serde(rename = "get-player-state")]
    GetPlayerState,
    #[serde(rename = "backward-10s")]
    Backward10s,
    #[serde(rename = "forward-10s")]
    Forward10s,
}

/// Messages on the page-local broadcast channel. The content controller posts
/// `Control` records; the bridge answers state queries with `Response`. Both
/// directions share the channel, so each side ignores its own message type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageMessage {
    #[serde(rename = "YOUTUBE_CONTROL")]
    Control { command: BridgeCommand },
    #[serde(rename = "YOUTUBE_CONTROL_RESPONSE")]
    Response { state: VideoState },
}
