//! Fragment Session
//!
//! Derives a stable, shareable session identifier from the document address
//! fragment and keeps observers synchronized with it as it changes. The
//! identifier lives nowhere but the address itself, so a session can be
//! joined purely by following a shared address.

use log::{debug, error, info};
use std::sync::Arc;

use super::error::SessionResult;
use super::id::SessionId;
use super::observer::{ObservedId, ObserverInner};
use crate::store::{strip_delimiter, with_delimiter, AddressStore};
use crate::token::{TokenSource, UuidSource};

/// Outcome of one resolution pass against the store.
pub(crate) struct Resolution {
    pub(crate) id: SessionId,
    /// True when the fragment was empty and a fresh identifier was minted.
    pub(crate) generated: bool,
}

/// Resolves and observes the session identifier carried by an address
/// fragment.
#[derive(Clone)]
pub struct FragmentSession {
    store: Arc<dyn AddressStore>,
    tokens: Arc<dyn TokenSource>,
}

impl FragmentSession {
    /// Create a session over an address store and token source.
    pub fn new(store: Arc<dyn AddressStore>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { store, tokens }
    }

    /// Create a session minting v4 UUID identifiers.
    pub fn with_uuid(store: Arc<dyn AddressStore>) -> Self {
        Self::new(store, Arc::new(UuidSource))
    }

    /// Resolve the session identifier.
    ///
    /// When the fragment is empty, a fresh token is minted and written back
    /// through a single in-place rewrite that leaves navigation history
    /// untouched. A non-empty fragment is returned verbatim with its leading
    /// delimiter stripped, and nothing is written. Mint and rewrite failures
    /// propagate unrecovered - no retry, no fallback identifier.
    pub fn resolve(&self) -> SessionResult<SessionId> {
        self.resolve_current().map(|resolution| resolution.id)
    }

    /// Begin observing the fragment.
    ///
    /// Computes the initial value through the same resolution path, then
    /// re-resolves on every store change notification - regenerating only if
    /// the fragment was cleared externally - and publishes to subscribers
    /// when the identifier actually changed. Notifications are processed
    /// synchronously, one at a time, in the order the store delivers them.
    /// Dropping the last `ObservedId` clone releases the store listener.
    pub fn observe(&self) -> SessionResult<ObservedId> {
        let initial = self.resolve_current()?;
        info!("observing address fragment (session {})", initial.id);

        let inner = Arc::new(ObserverInner::new(initial.id));
        let session = self.clone();
        let publisher = Arc::clone(&inner);
        let listener = self.store.on_change(Arc::new(move || {
            match session.resolve_current() {
                Ok(resolution) => publisher.publish(resolution),
                // A notification callback has no caller to propagate to;
                // keep the last published value.
                Err(err) => error!("failed to re-derive session identifier: {}", err),
            }
        }));

        Ok(ObservedId::new(inner, listener))
    }

    fn resolve_current(&self) -> SessionResult<Resolution> {
        let raw = self.store.fragment();
        let token = strip_delimiter(&raw);

        if token.is_empty() {
            let id = SessionId::new(self.tokens.mint()?)?;
            self.store.replace_fragment(&with_delimiter(id.as_str()))?;
            debug!("minted session identifier {} for empty fragment", id);
            return Ok(Resolution {
                id,
                generated: true,
            });
        }

        Ok(Resolution {
            id: SessionId::new(token)?,
            generated: false,
        })
    }
}
