use serde::{Deserialize, Serialize};

/// An ephemeral user-facing alert. Lifecycle is create → (click | clear) →
/// gone; the platform owns rendering and delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    /// Label of the single optional action button.
    pub button: Option<String>,
}

/// The fixed notifications the coordinator can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// No YouTube tab exists at all.
    YoutubeRequired,
    /// A tab is bound but its page has no loaded video.
    VideoNotLoaded,
    /// The video is loaded but not playing, and the command needs playback.
    VideoNotRunning,
}

const TITLE: &str = "YouTube Global Controls";
const BUTTON: &str = "Go to YouTube";

impl NotificationKind {
    pub fn id(&self) -> &'static str {
        match self {
            NotificationKind::YoutubeRequired => "youtube-required",
            NotificationKind::VideoNotLoaded => "video-not-loaded",
            NotificationKind::VideoNotRunning => "video-not-running",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            NotificationKind::YoutubeRequired => "You have to play a YouTube video first",
            NotificationKind::VideoNotLoaded => {
                "YouTube video is not loaded. Please visit the YouTube tab and load a video first."
            }
            NotificationKind::VideoNotRunning => {
                "YouTube video is not running. Please start playing a video first."
            }
        }
    }

    /// Build the concrete notification with the fixed title, message and
    /// action button.
    pub fn build(&self) -> Notification {
        Notification {
            id: self.id().to_string(),
            title: TITLE.to_string(),
            message: self.message().to_string(),
            button: Some(BUTTON.to_string()),
        }
    }
}
