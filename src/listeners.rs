//! Listener Registry
//!
//! Crate-private fan-out plumbing shared by address stores and observers.
//! Entries are kept behind stable keys so RAII guards can detach them later,
//! and delivery snapshots the registry first so no shard lock is held while a
//! callback runs (callbacks may re-enter the registry).

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) struct Listeners<L: ?Sized> {
    entries: DashMap<u64, Arc<L>>,
    next_key: AtomicU64,
}

impl<L: ?Sized> Listeners<L> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_key: AtomicU64::new(0),
        }
    }

    /// Register a listener and return its key.
    pub fn insert(&self, listener: Arc<L>) -> u64 {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(key, listener);
        key
    }

    /// Detach the listener registered under `key`, if still present.
    pub fn remove(&self, key: u64) {
        self.entries.remove(&key);
    }

    /// Snapshot of all current listeners, safe to invoke without locks held.
    pub fn snapshot(&self) -> Vec<Arc<L>> {
        self.entries.iter().map(|entry| Arc::clone(entry.value())).collect()
    }
}
