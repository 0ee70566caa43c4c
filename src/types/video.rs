use serde::{Deserialize, Serialize};

/// Minimum media readyState for a video to count as loaded
/// (HAVE_CURRENT_DATA in the HTML media element model).
pub const MIN_READY_STATE: u8 = 2;

/// Snapshot of the page's media element at query time. Never persisted;
/// recomputed on demand. Field names follow the wire shape used between the
/// background and content contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoState {
    pub is_loaded: bool,
    pub is_running: bool,
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub ended: bool,
    pub ready_state: u8,
}

impl VideoState {
    /// The state reported when no media element is reachable, including when
    /// the state query itself fails.
    pub fn not_loaded() -> Self {
        Self {
            is_loaded: false,
            is_running: false,
            current_time: 0.0,
            duration: 0.0,
            paused: true,
            ended: false,
            ready_state: 0,
        }
    }
}
