//! Session Events
//!
//! Change events published to observers while a session fragment is watched.
//! Serde-tagged so a webview host can forward them to its UI runtime as-is.

use serde::{Deserialize, Serialize};

use super::id::SessionId;

/// Events published while observing a session fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// External navigation moved the fragment to a different identifier
    Changed {
        previous: SessionId,
        current: SessionId,
    },

    /// The fragment was cleared externally and a fresh identifier was minted
    Regenerated {
        previous: SessionId,
        current: SessionId,
    },
}

impl SessionEvent {
    /// The identifier in effect after this event.
    pub fn current_id(&self) -> &SessionId {
        match self {
            Self::Changed { current, .. } => current,
            Self::Regenerated { current, .. } => current,
        }
    }

    /// The identifier that was in effect before this event.
    pub fn previous_id(&self) -> &SessionId {
        match self {
            Self::Changed { previous, .. } => previous,
            Self::Regenerated { previous, .. } => previous,
        }
    }

    /// Host-facing event name for UI routing.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Changed { .. } => "session-changed",
            Self::Regenerated { .. } => "session-regenerated",
        }
    }
}
