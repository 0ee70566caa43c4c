use std::fmt;

use crate::types::tab::{TabId, WindowId};

// === PlatformError ===

/// Errors surfaced by the browser platform APIs (tabs, windows,
/// notifications). Callers treat these as best-effort failures.
#[derive(Debug)]
pub enum PlatformError {
    /// The referenced tab no longer exists.
    TabNotFound(TabId),
    /// The referenced window no longer exists.
    WindowNotFound(WindowId),
    /// The platform API call itself failed.
    Api(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::TabNotFound(id) => write!(f, "Tab not found: {}", id),
            PlatformError::WindowNotFound(id) => write!(f, "Window not found: window#{}", id.0),
            PlatformError::Api(msg) => write!(f, "Platform API error: {}", msg),
        }
    }
}

impl std::error::Error for PlatformError {}

// === DispatchError ===

/// Errors on the background → content message channel. A channel failure is
/// the only completion signal the transport provides; the coordinator reads
/// it as "tab not ready" and enters the recovery path.
#[derive(Debug)]
pub enum DispatchError {
    /// No listener on the receiving end (tab closed, navigated away, or the
    /// content controller never loaded).
    NoReceiver(TabId),
    /// The transport reported a delivery failure.
    Transport(String),
    /// The receiver answered with something outside the protocol.
    BadResponse(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoReceiver(id) => write!(f, "No receiver in {}", id),
            DispatchError::Transport(msg) => write!(f, "Message transport error: {}", msg),
            DispatchError::BadResponse(msg) => write!(f, "Bad response: {}", msg),
        }
    }
}

impl std::error::Error for DispatchError {}

// === DomError ===

/// Errors from page DOM and media element operations. The controller catches
/// all of these and degrades to a weaker fallback or a `false` result.
#[derive(Debug)]
pub enum DomError {
    /// The media element is no longer attached to the page.
    Detached,
    /// The operation is not supported by this element or page.
    Unsupported(String),
    /// The underlying DOM API threw.
    Api(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::Detached => write!(f, "Media element detached"),
            DomError::Unsupported(msg) => write!(f, "Unsupported DOM operation: {}", msg),
            DomError::Api(msg) => write!(f, "DOM API error: {}", msg),
        }
    }
}

impl std::error::Error for DomError {}

// === SettingsError ===

/// Errors loading or saving the settings file.
#[derive(Debug)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::Parse(msg) => write!(f, "Settings parse error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

// === ShortcutError ===

/// Errors related to shortcut binding operations.
#[derive(Debug)]
pub enum ShortcutError {
    /// The key chord string is empty or malformed.
    InvalidKeys(String),
    /// The key chord is already bound to another command.
    Conflict(String),
    /// No binding exists for the command.
    NotFound(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::InvalidKeys(msg) => write!(f, "Invalid keys: {}", msg),
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::NotFound(action) => write!(f, "Shortcut not found: {}", action),
        }
    }
}

impl std::error::Error for ShortcutError {}
