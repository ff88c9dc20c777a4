//! Token Sources
//!
//! Injected capability for producing fresh universally-unique string tokens.
//! Session resolution never calls a fixed global generator, so deterministic
//! stubs can stand in during tests.

use thiserror::Error;
use uuid::Uuid;

/// Token generation failure
#[derive(Error, Debug)]
#[error("token source failed: {0}")]
pub struct TokenError(pub String);

/// Produces a fresh unique token on demand, assumed collision-free for
/// practical purposes.
pub trait TokenSource: Send + Sync {
    fn mint(&self) -> Result<String, TokenError>;
}

/// Token source backed by v4 UUIDs (36-character hyphenated form).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl TokenSource for UuidSource {
    fn mint(&self) -> Result<String, TokenError> {
        Ok(Uuid::new_v4().to_string())
    }
}
