//! Shareable session identity derived from document address fragments.
//!
//! A collaborative-editing client addresses a shared session purely through
//! a shareable address: the identifier rides in the address fragment, is
//! minted on first sight when absent, and is re-derived whenever the
//! fragment changes. Ambient dependencies are injected rather than global,
//! so the whole loop runs against a fake browsing context in tests.

// Declare modules
pub mod session;
pub mod store;
pub mod token;

mod listeners;

pub use session::{
    FragmentSession, ObservedId, SessionError, SessionEvent, SessionId, SessionResult,
    Subscription,
};
pub use store::{AddressStore, BrowserStore, MemoryStore, StoreError, StoreSubscription};
pub use token::{TokenError, TokenSource, UuidSource};
