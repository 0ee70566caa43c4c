//! Media element watch for the content controller.
//!
//! A cancellable watch over the page producing element appeared / replaced /
//! removed events. Two feeds funnel into the same scan: DOM mutation
//! notifications and a periodic fallback poll (the poll catches changes the
//! mutation feed misses). Readiness is announced exactly once per element
//! instance; a replaced element (SPA navigation) triggers a re-announcement.

use uuid::Uuid;

use crate::dom::PageDom;

/// A change in the page's primary media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// A media element appeared where none was known.
    Appeared,
    /// The known element was swapped for a different instance.
    Replaced,
    /// The known element left the page.
    Removed,
}

impl WatchEvent {
    /// Whether this event warrants a readiness announcement upstream.
    pub fn announces_ready(&self) -> bool {
        matches!(self, WatchEvent::Appeared | WatchEvent::Replaced)
    }
}

/// Tracks the identity of the current media element across scans.
#[derive(Debug, Default)]
pub struct VideoWatcher {
    current: Option<Uuid>,
    cancelled: bool,
}

impl VideoWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop producing events. Scans after cancellation yield nothing.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Identity of the currently tracked element, if any.
    pub fn current_element(&self) -> Option<Uuid> {
        self.current
    }

    /// Feed from a DOM mutation notification.
    pub fn on_mutation<D: PageDom>(&mut self, dom: &D) -> Option<WatchEvent> {
        self.scan(dom)
    }

    /// Feed from the periodic fallback poll.
    pub fn on_poll_tick<D: PageDom>(&mut self, dom: &D) -> Option<WatchEvent> {
        self.scan(dom)
    }

    fn scan<D: PageDom>(&mut self, dom: &D) -> Option<WatchEvent> {
        if self.cancelled {
            return None;
        }
        let found = dom.find_media().map(|media| media.instance_id());
        match (self.current, found) {
            (None, Some(id)) => {
                self.current = Some(id);
                log::debug!("video element detected: {}", id);
                Some(WatchEvent::Appeared)
            }
            (Some(old), Some(new)) if old != new => {
                self.current = Some(new);
                log::debug!("video element replaced: {} -> {}", old, new);
                Some(WatchEvent::Replaced)
            }
            (Some(old), None) => {
                self.current = None;
                log::debug!("video element removed: {}", old);
                Some(WatchEvent::Removed)
            }
            _ => None,
        }
    }
}
