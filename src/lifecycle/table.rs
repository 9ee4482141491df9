//! The legal-transition table.
//!
//! ```text
//! None --submit(dir != None)--> Ready
//! Ready --begin--> InProgress
//! InProgress --finish--> Complete
//! {Ready, InProgress} --emergency_stop--> EmergencyStop
//! EmergencyStop --emergency_stop--> EmergencyStop
//! {Complete, EmergencyStop} --reset--> None
//! ```
//!
//! `initialize` is not in the table; it applies from every status. The
//! direction check on `submit` happens in the lifecycle, after the table has
//! accepted the status.

use super::error::LifecycleError;
use crate::core::{Operation, RequestStatus};

/// One edge of the lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRule {
    pub operation: Operation,
    pub from: RequestStatus,
    pub to: RequestStatus,
}

impl TransitionRule {
    const fn new(operation: Operation, from: RequestStatus, to: RequestStatus) -> Self {
        Self {
            operation,
            from,
            to,
        }
    }

    pub fn matches(&self, current: RequestStatus, operation: Operation) -> bool {
        self.from == current && self.operation == operation
    }
}

/// Every legal edge. Pairs not listed here are rejected.
pub const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule::new(Operation::Submit, RequestStatus::None, RequestStatus::Ready),
    TransitionRule::new(Operation::Begin, RequestStatus::Ready, RequestStatus::InProgress),
    TransitionRule::new(Operation::Finish, RequestStatus::InProgress, RequestStatus::Complete),
    TransitionRule::new(
        Operation::EmergencyStop,
        RequestStatus::Ready,
        RequestStatus::EmergencyStop,
    ),
    TransitionRule::new(
        Operation::EmergencyStop,
        RequestStatus::InProgress,
        RequestStatus::EmergencyStop,
    ),
    TransitionRule::new(
        Operation::EmergencyStop,
        RequestStatus::EmergencyStop,
        RequestStatus::EmergencyStop,
    ),
    TransitionRule::new(Operation::Reset, RequestStatus::Complete, RequestStatus::None),
    TransitionRule::new(Operation::Reset, RequestStatus::EmergencyStop, RequestStatus::None),
];

/// Resolve the status `operation` leads to from `current`.
pub fn next_status(
    current: RequestStatus,
    operation: Operation,
) -> Result<RequestStatus, LifecycleError> {
    if operation == Operation::Initialize {
        return Ok(RequestStatus::None);
    }

    TRANSITIONS
        .iter()
        .find(|rule| rule.matches(current, operation))
        .map(|rule| rule.to)
        .ok_or(LifecycleError::InvalidTransition {
            status: current,
            operation,
        })
}

/// Table operations allowed from `current`, excluding `initialize`.
pub fn legal_operations(current: RequestStatus) -> Vec<Operation> {
    TRANSITIONS
        .iter()
        .filter(|rule| rule.from == current)
        .map(|rule| rule.operation)
        .collect()
}
