//! Document-level pointer event source.
//!
//! Widgets that must react to clicks anywhere in the host (such as a select
//! closing when the user clicks elsewhere) receive a [`PointerSource`] at
//! mount time instead of reaching for a global. [`PointerHub`] is the
//! in-memory implementation hosts and tests drive directly.

use crate::event::PointerEvent;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Callback invoked for every dispatched pointer event.
pub type PointerListener = Box<dyn FnMut(&PointerEvent) + Send>;

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Source of document-level pointer events.
pub trait PointerSource: Send + Sync {
    /// Register a listener.
    fn subscribe(&self, listener: PointerListener) -> ListenerId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: BTreeMap<ListenerId, PointerListener>,
}

/// In-memory pointer source.
///
/// Listeners run in registration order. A listener must not subscribe or
/// unsubscribe from inside its own callback.
#[derive(Default)]
pub struct PointerHub {
    inner: Mutex<HubInner>,
}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl PointerHub {
    /// Create a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every listener.
    pub fn dispatch(&self, event: &PointerEvent) {
        let mut inner = self.inner.lock().expect("PointerHub mutex poisoned");
        tracing::trace!(
            listeners = inner.listeners.len(),
            depth = event.path.len(),
            "dispatching pointer event"
        );
        for listener in inner.listeners.values_mut() {
            listener(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner
            .lock()
            .expect("PointerHub mutex poisoned")
            .listeners
            .len()
    }
}

impl PointerSource for PointerHub {
    fn subscribe(&self, listener: PointerListener) -> ListenerId {
        let mut inner = self.inner.lock().expect("PointerHub mutex poisoned");
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.insert(id, listener);
        tracing::debug!(listener = id.0, "pointer listener registered");
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = self
            .inner
            .lock()
            .expect("PointerHub mutex poisoned")
            .listeners
            .remove(&id)
            .is_some();
        tracing::debug!(listener = id.0, removed, "pointer listener released");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{EventPath, NodeRef};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn body_click() -> PointerEvent {
        PointerEvent::new(EventPath::new(vec![NodeRef::detached("body")]))
    }

    #[test]
    fn test_subscribe_and_dispatch() {
        let hub = PointerHub::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        hub.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        hub.dispatch(&body_click());
        hub.dispatch(&body_click());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let hub = PointerHub::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = hub.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.dispatch(&body_click());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let hub = PointerHub::new();
        let a = hub.subscribe(Box::new(|_| {}));
        let b = hub.subscribe(Box::new(|_| {}));
        assert_ne!(a, b);
        assert_eq!(hub.listener_count(), 2);
    }

    #[test]
    fn test_debug_shows_count() {
        let hub = PointerHub::new();
        hub.subscribe(Box::new(|_| {}));
        assert_eq!(format!("{hub:?}"), "PointerHub { listeners: 1 }");
    }
}
