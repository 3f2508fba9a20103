//! Session error taxonomy.

use std::fmt;

use thiserror::Error;

/// Operations that hold an in-flight slot while waiting on the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A DM narration round trip.
    Submission,
    /// A scenario suggestion fetch.
    Suggestions,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submission => f.write_str("narration submission"),
            Self::Suggestions => f.write_str("suggestion fetch"),
        }
    }
}

/// Top-level error type for every session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The caller's input violates a precondition. Detected locally, before
    /// any network call.
    #[error("invalid request: {0}")]
    InvalidSpec(String),

    /// A conflicting operation is already in flight.
    #[error("a {0} is already in flight")]
    Busy(Operation),

    /// The remote call did not complete successfully.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The remote call completed but its data violates a structural contract.
    #[error("malformed result: {0}")]
    MalformedResult(String),

    /// Bootstrap could not assemble a complete session.
    #[error("session failed to load: {0}")]
    Load(Box<SessionError>),

    /// The session this operation targeted was torn down before it resolved.
    #[error("session was replaced while the operation was in flight")]
    SessionReplaced,
}

impl SessionError {
    /// Wraps an error as the cause of a failed bootstrap.
    ///
    /// An error that already is a `Load` is returned unchanged so causes are
    /// never nested twice.
    #[must_use]
    pub fn load(cause: Self) -> Self {
        match cause {
            Self::Load(_) => cause,
            other => Self::Load(Box::new(other)),
        }
    }

    /// Returns `true` for errors that are detected locally and never touch
    /// session state.
    #[must_use]
    pub fn is_local_rejection(&self) -> bool {
        matches!(self, Self::InvalidSpec(_) | Self::Busy(_))
    }
}
