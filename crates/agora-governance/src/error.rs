//! Governance error types.

use agora_storage::StoreError;
use thiserror::Error;

/// Error returned by every governance operation.
///
/// Operations fail atomically: whenever one of these is returned, the
/// store transaction has been rolled back and no partial state change
/// remains. Notification failures never surface here.
#[derive(Debug, Error)]
pub enum GovernanceError {
    /// Referenced club, user, membership, executive, or request is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate active relation, duplicate club name, or duplicate
    /// pending request.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A state-machine guard was violated (wrong status, head-only
    /// restriction, already-processed request).
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Invalid or foreign verification token, or unauthorized processor.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Backend failure unrelated to any governance rule.
    #[error("storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for GovernanceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => GovernanceError::NotFound("record".to_string()),
            StoreError::AlreadyExists | StoreError::Conflict => {
                GovernanceError::Conflict("record already exists".to_string())
            }
            e => GovernanceError::Store(e),
        }
    }
}

/// Maps a store-level `NotFound` to a governance `NotFound` naming the
/// entity that was being looked up.
pub(crate) trait StoreResultExt<T> {
    fn or_not_found(self, what: &str) -> Result<T, GovernanceError>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn or_not_found(self, what: &str) -> Result<T, GovernanceError> {
        self.map_err(|e| match e {
            StoreError::NotFound => GovernanceError::NotFound(what.to_string()),
            e => GovernanceError::Store(e),
        })
    }
}
