//! Session Module
//!
//! Session identity carried in the document address fragment:
//! - Identifier resolution with mint-on-empty semantics
//! - Live observation synchronized with external fragment changes
//! - Change events a webview host can forward to its UI runtime

pub mod error;
pub mod events;
pub mod fragment;
pub mod id;
pub mod observer;

pub use error::{SessionError, SessionResult};
pub use events::SessionEvent;
pub use fragment::FragmentSession;
pub use id::SessionId;
pub use observer::{ObservedId, Subscription};
