use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque platform-assigned tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Opaque platform-assigned window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u32);

/// Snapshot of a browser tab as reported by the platform tab query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub window_id: WindowId,
    pub url: String,
    pub active: bool,
    /// Platform timestamp of the last time the tab was focused, when known.
    pub last_accessed: Option<u64>,
}

/// Classification of a URL for routing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A YouTube watch or shorts page that can host a controllable video.
    Video,
    /// A YouTube page without a video path segment (home, search, channel).
    Home,
    /// Anything outside the YouTube domain.
    Other,
}

/// True for any URL on the YouTube domain.
pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com")
}

/// True for YouTube video pages: `/watch` and `/shorts` paths.
pub fn is_youtube_video_url(url: &str) -> bool {
    url.contains("youtube.com/watch") || url.contains("youtube.com/shorts")
}

/// True for YouTube pages that are not video pages.
pub fn is_youtube_home_url(url: &str) -> bool {
    is_youtube_url(url) && !is_youtube_video_url(url)
}

pub fn classify_url(url: &str) -> PageKind {
    if is_youtube_video_url(url) {
        PageKind::Video
    } else if is_youtube_url(url) {
        PageKind::Home
    } else {
        PageKind::Other
    }
}
