//! Transition errors.

use super::state::Kind;
use thiserror::Error;

/// Errors that can occur when requesting a transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError<K: Kind> {
    /// The live state is not of the kind the caller expected to leave.
    #[error("Invalid transition: expected current state '{expected}' but found '{actual}'")]
    InvalidTransition { expected: K, actual: K },

    /// The target kind is not a declared successor of the source kind.
    #[error("Illegal transition target: '{to}' is not a successor of '{from}'")]
    IllegalTarget { from: K, to: K },
}

impl<K: Kind> TransitionError<K> {
    /// The kind the caller tried to leave.
    pub fn from_kind(&self) -> K {
        match self {
            Self::InvalidTransition { expected, .. } => *expected,
            Self::IllegalTarget { from, .. } => *from,
        }
    }

    /// Whether the request failed only because the state had already moved on.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}
