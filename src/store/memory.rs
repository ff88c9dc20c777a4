//! Memory Store
//!
//! In-memory browsing-context model: a navigation history of fragment
//! entries plus change notification. Used by tests and by embedders that
//! track no address beyond the fragment itself.

use log::debug;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{strip_delimiter, with_delimiter, AddressStore, ChangeListener, StoreError, StoreSubscription};
use crate::listeners::Listeners;

/// Cheaply cloneable handle; clones share the same address state.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    /// Navigation history of raw fragment entries; never empty.
    entries: Mutex<Vec<String>>,
    listeners: Arc<Listeners<dyn Fn() + Send + Sync>>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    /// Create a store with a single history entry carrying no fragment.
    pub fn new() -> Self {
        Self::with_fragment("")
    }

    /// Create a store whose current entry already carries a fragment.
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                entries: Mutex::new(vec![normalize(&fragment.into())]),
                listeners: Arc::new(Listeners::new()),
                reject_writes: AtomicBool::new(false),
            }),
        }
    }

    /// Navigate to a new fragment, pushing a history entry and notifying
    /// listeners. Navigating to the current fragment is a no-op, matching
    /// browser behavior.
    pub fn navigate(&self, fragment: &str) {
        let target = normalize(fragment);
        {
            let mut entries = self.inner.entries.lock();
            if entries.last().map(String::as_str) == Some(target.as_str()) {
                return;
            }
            debug!("navigating fragment to {:?}", target);
            entries.push(target);
        }
        self.notify();
    }

    /// Pop the current history entry and notify listeners. Returns `false`
    /// at the root entry.
    pub fn back(&self) -> bool {
        {
            let mut entries = self.inner.entries.lock();
            if entries.len() < 2 {
                return false;
            }
            entries.pop();
        }
        self.notify();
        true
    }

    /// Number of navigation-history entries.
    pub fn history_len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    /// Toggle rejection of in-place rewrites, simulating a host that forbids
    /// address updates.
    pub fn reject_writes(&self, reject: bool) {
        self.inner.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn notify(&self) {
        // Snapshot first: listeners are free to call back into the store.
        for listener in self.inner.listeners.snapshot() {
            listener();
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressStore for MemoryStore {
    fn fragment(&self) -> String {
        self.inner.entries.lock().last().cloned().unwrap_or_default()
    }

    fn replace_fragment(&self, fragment: &str) -> Result<(), StoreError> {
        if self.inner.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected(
                "in-place rewrites are disabled for this store".to_string(),
            ));
        }

        let mut entries = self.inner.entries.lock();
        if let Some(entry) = entries.last_mut() {
            *entry = normalize(fragment);
        }
        Ok(())
    }

    fn on_change(&self, listener: ChangeListener) -> StoreSubscription {
        let key = self.inner.listeners.insert(listener);
        let listeners = Arc::downgrade(&self.inner.listeners);
        StoreSubscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.remove(key);
            }
        })
    }
}

/// Raw entry form: delimiter-prefixed when a token is present, empty otherwise.
fn normalize(fragment: &str) -> String {
    if strip_delimiter(fragment).is_empty() {
        String::new()
    } else {
        with_delimiter(fragment)
    }
}
