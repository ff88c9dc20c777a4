//! Session Observer
//!
//! The live observable returned by `FragmentSession::observe`: the current
//! identifier, synchronous subscriber fan-out, and a watch-channel bridge
//! for async UI runtimes.

use log::debug;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tokio::sync::watch;

use super::events::SessionEvent;
use super::fragment::Resolution;
use super::id::SessionId;
use crate::listeners::Listeners;
use crate::store::StoreSubscription;

type EventListener = dyn Fn(&SessionEvent) + Send + Sync;

/// Live observable session identifier.
///
/// Clones share one observation; the store listener stays registered until
/// the last clone drops, and teardown never alters the last published value.
#[derive(Clone)]
pub struct ObservedId {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Arc<ObserverInner>,
    /// Keeps the store listener registered for the lifetime of the
    /// observation; released exactly once, when the last clone drops.
    _listener: StoreSubscription,
}

pub(crate) struct ObserverInner {
    current: RwLock<SessionId>,
    subscribers: Arc<Listeners<EventListener>>,
    watch_tx: watch::Sender<SessionId>,
}

impl ObserverInner {
    pub(crate) fn new(initial: SessionId) -> Self {
        let (watch_tx, _) = watch::channel(initial.clone());
        Self {
            current: RwLock::new(initial),
            subscribers: Arc::new(Listeners::new()),
            watch_tx,
        }
    }

    /// Publish a freshly resolved value, suppressing duplicates so each
    /// external change is delivered exactly once.
    pub(crate) fn publish(&self, resolution: Resolution) {
        let previous = {
            let mut current = self.current.write();
            if *current == resolution.id {
                return;
            }
            std::mem::replace(&mut *current, resolution.id.clone())
        };

        self.watch_tx.send_replace(resolution.id.clone());

        let event = if resolution.generated {
            SessionEvent::Regenerated {
                previous,
                current: resolution.id,
            }
        } else {
            SessionEvent::Changed {
                previous,
                current: resolution.id,
            }
        };
        debug!(
            "publishing {}: {} -> {}",
            event.event_name(),
            event.previous_id(),
            event.current_id()
        );

        // Snapshot first: subscribers may subscribe or drop guards from
        // within the callback.
        for subscriber in self.subscribers.snapshot() {
            subscriber(&event);
        }
    }
}

impl ObservedId {
    pub(crate) fn new(inner: Arc<ObserverInner>, listener: StoreSubscription) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner,
                _listener: listener,
            }),
        }
    }

    /// The most recently published identifier.
    pub fn current(&self) -> SessionId {
        self.shared.inner.current.read().clone()
    }

    /// Subscribe to change events. Dropping the returned guard detaches the
    /// listener; events published afterwards are not delivered to it.
    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let subscribers = &self.shared.inner.subscribers;
        let key = subscribers.insert(Arc::new(listener));
        Subscription {
            subscribers: Arc::downgrade(subscribers),
            key,
        }
    }

    /// Watch-channel view for async UI runtimes: `borrow` yields the current
    /// identifier, `changed` resolves on the next published value, and the
    /// channel closes when observation ends.
    pub fn watch(&self) -> watch::Receiver<SessionId> {
        self.shared.inner.watch_tx.subscribe()
    }
}

/// RAII guard for an event-listener registration.
pub struct Subscription {
    subscribers: Weak<Listeners<EventListener>>,
    key: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.remove(self.key);
        }
    }
}
