//! Lifecycle errors.

use crate::core::{Operation, RequestStatus, TrackDirection};
use thiserror::Error;

/// A rejected lifecycle operation.
///
/// Both kinds are local and recoverable. A rejected operation leaves the
/// slot exactly as it was; the caller decides whether to retry, escalate to
/// an emergency stop, or abandon the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("invalid transition: cannot {operation} from status '{status}'")]
    InvalidTransition {
        status: RequestStatus,
        operation: Operation,
    },

    #[error("invalid direction: cannot ready a request against track direction '{direction}'")]
    InvalidDirection { direction: TrackDirection },
}

impl LifecycleError {
    /// Stable code for logs and collaborator protocols.
    pub fn error_code(&self) -> &'static str {
        match self {
            LifecycleError::InvalidTransition { .. } => "INVALID_TRANSITION",
            LifecycleError::InvalidDirection { .. } => "INVALID_DIRECTION",
        }
    }

    /// Status the slot was in when the operation was rejected, if recorded.
    pub fn status(&self) -> Option<RequestStatus> {
        match self {
            LifecycleError::InvalidTransition { status, .. } => Some(*status),
            LifecycleError::InvalidDirection { .. } => None,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            LifecycleError::InvalidTransition { operation, .. } => *operation,
            LifecycleError::InvalidDirection { .. } => Operation::Submit,
        }
    }
}
