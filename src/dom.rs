//! Page and media element abstraction.
//!
//! The content controller and the page bridge never touch a real DOM
//! directly; they work against these traits so command execution is testable
//! without a browser. Real implementations wrap the host page's elements,
//! the simulated browser provides in-memory ones.

use std::rc::Rc;

use uuid::Uuid;

use crate::types::errors::DomError;

/// Requested size for a picture-in-picture window. The reduced request is
/// tried first; platforms that reject a sizing hint get the default request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipWindowSize {
    Reduced,
    Default,
}

/// Handle to the page's primary video element. All operations are fallible;
/// a failure never propagates past the controller boundary.
///
/// Methods take `&self`: real handles proxy into the page, fakes use
/// interior mutability.
pub trait MediaElement {
    /// Stable identity of this element instance. A replacement element (SPA
    /// navigation) gets a fresh id, which is how the watcher detects it.
    fn instance_id(&self) -> Uuid;
    fn ready_state(&self) -> u8;
    /// Whether the element has a non-empty src or currentSrc.
    fn has_source(&self) -> bool;
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn set_current_time(&self, seconds: f64) -> Result<(), DomError>;
    fn play(&self) -> Result<(), DomError>;
    fn pause(&self) -> Result<(), DomError>;
    fn request_picture_in_picture(&self, size: PipWindowSize) -> Result<(), DomError>;
}

/// Shared handle to a media element.
pub type MediaHandle = Rc<dyn MediaElement>;

/// The hosting page seen from the content controller.
pub trait PageDom {
    /// Locate the primary media element, if any.
    fn find_media(&self) -> Option<MediaHandle>;
    /// Whether any element is currently presented picture-in-picture.
    fn pip_element_active(&self) -> bool;
    fn exit_picture_in_picture(&self) -> Result<(), DomError>;
    /// Click the first present, enabled element matching one of the
    /// selectors, most specific first. Returns whether a click happened.
    fn click_first_enabled(&self, selectors: &[&str]) -> bool;
    /// Dispatch a synthetic key event so the host page's own handler reacts.
    /// Returns whether the event was delivered.
    fn dispatch_key(&self, key: &str) -> bool;
}
