//! Event dispatch system
//!
//! Input event identifiers shared by the state machines, and a keyed
//! dispatcher used to deliver notifications to consumers.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Event type identifier
pub type EventType = u32;

/// Event identifiers understood by the scroll state machines
pub mod event_types {
    use super::EventType;

    /// Native scroll event on the scroll element
    pub const SCROLL: EventType = 30;
    /// Scroll-stop debounce elapsed (or a forced settle)
    pub const SCROLL_END: EventType = 31;
    /// Settle logic finished
    pub const SETTLED: EventType = 32;

    pub const TOUCH_START: EventType = 40;
    pub const TOUCH_MOVE: EventType = 41;

    /// Host reported an overflow/underflow change
    pub const OVERFLOW_CHANGED: EventType = 50;
    /// Content is larger than the viewport on an axis
    pub const CONTENT_OVERFLOW: EventType = 51;
    /// Content fits inside the viewport on an axis
    pub const CONTENT_FITS: EventType = 52;
}

/// Event handler function type
pub type EventHandler<P> = Box<dyn Fn(&P) + Send + Sync>;

/// Dispatches payloads to handlers registered under a key
pub struct EventDispatcher<K, P> {
    handlers: FxHashMap<K, Vec<EventHandler<P>>>,
}

impl<K, P> EventDispatcher<K, P>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register a handler for a key
    pub fn register<F>(&mut self, key: K, handler: F)
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.handlers.entry(key).or_default().push(Box::new(handler));
    }

    /// Dispatch a payload to every handler registered under `key`.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, key: &K, payload: &P) -> usize {
        let Some(handlers) = self.handlers.get(key) else {
            return 0;
        };
        for handler in handlers {
            handler(payload);
        }
        handlers.len()
    }

    /// Check whether any handler is registered under `key`
    pub fn has_handlers(&self, key: &K) -> bool {
        self.handlers.get(key).is_some_and(|h| !h.is_empty())
    }

    /// Drop every registered handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<K, P> Default for EventDispatcher<K, P>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
