use thiserror::Error;

use super::worker::ActionKind;

/// Failure of a dispatched remote operation, classified in priority order:
/// unreachable service first, then timeout, then a rejected request, then
/// anything else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    RequestFailed(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl SyncError {
    /// True when the service could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, SyncError::ServiceUnavailable | SyncError::Timeout)
    }
}

/// Rejection raised before anything reaches the background worker.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("a sync action is already in flight")]
    Busy,

    #[error("{0}")]
    Validation(String),
}

/// A failed outcome together with the action that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub action: ActionKind,
    pub error: SyncError,
}

impl SyncFailure {
    /// Whether the host should interrupt the user over this, instead of a
    /// passive status line. Connectivity failures always interrupt, and so
    /// does any failed mutation.
    pub fn should_block(&self) -> bool {
        self.error.is_connectivity() || self.action.is_mutation()
    }
}

impl std::fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error.fmt(f)
    }
}
