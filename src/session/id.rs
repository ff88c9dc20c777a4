//! Session Identifier
//!
//! Opaque token identifying a shared session, carried in the address
//! fragment. Generated identifiers happen to be UUID-shaped, but externally
//! supplied fragments are accepted verbatim - the only interpreted structure
//! is non-emptiness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::{SessionError, SessionResult};

/// Opaque session identifier, non-empty by construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Create an identifier from a raw token, rejecting the empty string.
    pub fn new(token: impl Into<String>) -> SessionResult<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionError::EmptyIdentifier);
        }
        Ok(Self(token))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SessionId {
    type Err = SessionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::new(token)
    }
}

impl TryFrom<String> for SessionId {
    type Error = SessionError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::new(token)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}
