//! Browser Store
//!
//! Browsing-context model over full `url::Url` history entries, for hosts
//! that track a complete document address rather than just its fragment.

use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;

use super::{strip_delimiter, with_delimiter, AddressStore, ChangeListener, StoreError, StoreSubscription};
use crate::listeners::Listeners;

/// Cheaply cloneable handle; clones share the same browsing context.
#[derive(Clone)]
pub struct BrowserStore {
    inner: Arc<BrowserInner>,
}

struct History {
    current: Url,
    /// Previous entries, most recent last.
    stack: Vec<Url>,
}

struct BrowserInner {
    history: Mutex<History>,
    listeners: Arc<Listeners<dyn Fn() + Send + Sync>>,
}

impl BrowserStore {
    /// Create a browsing context positioned at `url`.
    pub fn new(url: Url) -> Self {
        Self {
            inner: Arc::new(BrowserInner {
                history: Mutex::new(History {
                    current: url,
                    stack: Vec::new(),
                }),
                listeners: Arc::new(Listeners::new()),
            }),
        }
    }

    /// The complete current address.
    pub fn current_url(&self) -> Url {
        self.inner.history.lock().current.clone()
    }

    /// Navigate to a new address, pushing a history entry and notifying
    /// listeners. Navigating to the current address is a no-op.
    pub fn navigate(&self, url: Url) {
        {
            let mut history = self.inner.history.lock();
            if history.current == url {
                return;
            }
            debug!("navigating to {}", url);
            let previous = std::mem::replace(&mut history.current, url);
            history.stack.push(previous);
        }
        self.notify();
    }

    /// Navigate to the current address with a different fragment.
    pub fn navigate_fragment(&self, fragment: &str) {
        let mut target = self.current_url();
        let token = strip_delimiter(fragment);
        target.set_fragment(if token.is_empty() { None } else { Some(token) });
        self.navigate(target);
    }

    /// Return to the previous history entry, notifying listeners. Returns
    /// `false` at the root entry.
    pub fn back(&self) -> bool {
        {
            let mut history = self.inner.history.lock();
            match history.stack.pop() {
                Some(previous) => history.current = previous,
                None => return false,
            }
        }
        self.notify();
        true
    }

    /// Number of navigation-history entries.
    pub fn history_len(&self) -> usize {
        self.inner.history.lock().stack.len() + 1
    }

    fn notify(&self) {
        // Snapshot first: listeners are free to call back into the store.
        for listener in self.inner.listeners.snapshot() {
            listener();
        }
    }
}

impl AddressStore for BrowserStore {
    fn fragment(&self) -> String {
        match self.inner.history.lock().current.fragment() {
            Some(token) if !token.is_empty() => with_delimiter(token),
            _ => String::new(),
        }
    }

    fn replace_fragment(&self, fragment: &str) -> Result<(), StoreError> {
        let token = strip_delimiter(fragment);
        let mut history = self.inner.history.lock();
        history
            .current
            .set_fragment(if token.is_empty() { None } else { Some(token) });
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
