//! Session Error Types
//!
//! Error taxonomy for session resolution and observation. Failures are never
//! recovered locally - no retries, no fallback identifiers.

use thiserror::Error;

use crate::store::StoreError;
use crate::token::TokenError;

/// Session-specific errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// The address store refused or failed a fragment operation
    #[error("address store error: {0}")]
    Store(#[from] StoreError),

    /// The token source could not produce an identifier
    #[error(transparent)]
    Token(#[from] TokenError),

    /// An identifier token was empty
    #[error("session identifier must not be empty")]
    EmptyIdentifier,
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
