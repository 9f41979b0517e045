//! Bookkeeping for host listeners.
//!
//! Every listener a slider registers is recorded here so teardown is
//! symmetric: whatever `bind` added, `unbind` removes, and nothing leaks past
//! `destroy`.

use smallvec::SmallVec;
use tracing::trace;

use crate::host::{EventSource, Host, ListenerId};

/// Sources active while the slider accepts user input.
pub const INTERACTION_SOURCES: &[EventSource] =
    &[EventSource::SurfacePointerDown, EventSource::HandleKeyDown];

/// Sources active only for the duration of a drag.
pub const DRAG_SOURCES: &[EventSource] = &[
    EventSource::DocumentPointerMove,
    EventSource::DocumentPointerUp,
    EventSource::DocumentTouchCancel,
];

/// Sources active for the slider's whole lifetime.
pub const LIFETIME_SOURCES: &[EventSource] = &[
    EventSource::DocumentScroll,
    EventSource::WindowResize,
    EventSource::ElementChange,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Subscription {
    source: EventSource,
    listener: ListenerId,
}

/// Registry of the listeners a slider currently holds.
#[derive(Debug, Default, Clone)]
pub struct SubscriptionRegistry {
    entries: SmallVec<[Subscription; 8]>,
}

impl SubscriptionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if events from `source` are being received.
    pub fn is_subscribed(&self, source: EventSource) -> bool {
        self.entries.iter().any(|entry| entry.source == source)
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers a listener for `source` unless one already exists.
    pub fn subscribe<H: Host + ?Sized>(&mut self, host: &mut H, source: EventSource) {
        if self.is_subscribed(source) {
            return;
        }
        let listener = host.listen(source);
        trace!(?source, ?listener, "listening");
        self.entries.push(Subscription { source, listener });
    }

    /// Registers listeners for every source in `sources`.
    pub fn subscribe_all<H: Host + ?Sized>(&mut self, host: &mut H, sources: &[EventSource]) {
        for &source in sources {
            self.subscribe(host, source);
        }
    }

    /// Removes the listener for `source`. Returns `false` if there was none.
    pub fn unsubscribe<H: Host + ?Sized>(&mut self, host: &mut H, source: EventSource) -> bool {
        let Some(position) = self.entries.iter().position(|entry| entry.source == source) else {
            return false;
        };
        let entry = self.entries.remove(position);
        host.unlisten(entry.listener);
        trace!(?source, listener = ?entry.listener, "stopped listening");
        true
    }

    /// Removes the listeners for every source in `sources`.
    pub fn unsubscribe_all<H: Host + ?Sized>(&mut self, host: &mut H, sources: &[EventSource]) {
        for &source in sources {
            self.unsubscribe(host, source);
        }
    }

    /// Removes every listener.
    pub fn clear<H: Host + ?Sized>(&mut self, host: &mut H) {
        for entry in self.entries.drain(..) {
            host.unlisten(entry.listener);
        }
    }
}
