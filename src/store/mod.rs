//! Address Store Abstraction
//!
//! The seam between session resolution and whatever owns the document
//! address. A store exposes the current fragment, an in-place rewrite that
//! must not grow navigation history, and change notifications for
//! navigation-driven fragment updates.
//!
//! Two implementations are provided:
//! - `MemoryStore` - fragment-only browsing-context model for tests and
//!   headless embedders
//! - `BrowserStore` - the same model over full `url::Url` history entries

use std::sync::Arc;
use thiserror::Error;

pub mod browser;
pub mod memory;

pub use browser::BrowserStore;
pub use memory::MemoryStore;

/// Delimiter separating an address from its fragment.
pub const FRAGMENT_DELIMITER: char = '#';

/// Callback invoked after every navigation-driven fragment change.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Address store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("fragment rewrite rejected: {0}")]
    WriteRejected(String),

    #[error("address store unavailable: {0}")]
    Unavailable(String),
}

/// Handle to a mutable document address.
///
/// Implementations own the address state; this crate only reads the fragment
/// and rewrites it in place, never clearing it.
pub trait AddressStore: Send + Sync {
    /// Current fragment text including the leading delimiter, empty when the
    /// address carries no fragment.
    fn fragment(&self) -> String;

    /// Rewrite the fragment of the current history entry in place.
    ///
    /// Must not add a navigation-history entry and must not fire change
    /// notifications - the `history.replaceState` contract. Accepts the
    /// fragment with or without the leading delimiter.
    fn replace_fragment(&self, fragment: &str) -> Result<(), StoreError>;

    /// Register a change listener, invoked whenever the fragment changes
    /// through navigation (user edit, link, back/forward). Dropping the
    /// returned guard unregisters the listener.
    fn on_change(&self, listener: ChangeListener) -> StoreSubscription;
}

/// RAII guard for a change-listener registration.
///
/// The listener stays registered for the lifetime of the guard and is
/// released exactly once, on drop.
pub struct StoreSubscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl StoreSubscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Strip the leading delimiter from raw fragment text.
pub fn strip_delimiter(fragment: &str) -> &str {
    fragment.strip_prefix(FRAGMENT_DELIMITER).unwrap_or(fragment)
}

/// Compose raw fragment text from an identifier token.
pub fn with_delimiter(token: &str) -> String {
    format!("{}{}", FRAGMENT_DELIMITER, strip_delimiter(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_delimiter_helpers() {
        assert_eq!(strip_delimiter("#abc123"), "abc123");
        assert_eq!(strip_delimiter("abc123"), "abc123");
        assert_eq!(strip_delimiter(""), "");
        assert_eq!(strip_delimiter("#"), "");

        assert_eq!(with_delimiter("abc123"), "#abc123");
        assert_eq!(with_delimiter("#abc123"), "#abc123");
    }

    #[test]
    fn test_subscription_releases_once_on_drop() {
        let released = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&released);
        let subscription = StoreSubscription::new(move || {
            assert!(!flag.swap(true, Ordering::SeqCst));
        });

        assert!(!released.load(Ordering::SeqCst));
        drop(subscription);
        assert!(released.load(Ordering::SeqCst));
    }
}
