//! Transition history for a request slot.
//!
//! Records are values. [`StateHistory::record`] returns a new history
//! and leaves the receiver untouched, so a caller holding a copy from an
//! earlier snapshot never sees it change.

use super::{Operation, RequestStatus, TrackDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// One applied status change.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use movement_authority::core::{Operation, RequestStatus, TrackDirection, TransitionRecord};
/// use uuid::Uuid;
///
/// let record = TransitionRecord {
///     sequence: 1,
///     request_id: Uuid::new_v4(),
///     operation: Operation::Submit,
///     from: RequestStatus::None,
///     to: RequestStatus::Ready,
///     direction: TrackDirection::One,
///     timestamp: Utc::now(),
/// };
/// assert!(record.changed_status());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Per-slot counter, strictly increasing across applied transitions.
    pub sequence: u64,
    /// Request the transition belongs to.
    pub request_id: Uuid,
    /// Operation that caused the transition.
    pub operation: Operation,
    /// Status before the transition.
    pub from: RequestStatus,
    /// Status after the transition.
    pub to: RequestStatus,
    /// Direction the request was readied against.
    pub direction: TrackDirection,
    /// When the transition was applied.
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn changed_status(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered transition records, optionally bounded.
///
/// With a limit set, recording past it drops the oldest records first.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use movement_authority::core::{
///     Operation, RequestStatus, StateHistory, TrackDirection, TransitionRecord,
/// };
/// use uuid::Uuid;
///
/// let request_id = Uuid::new_v4();
/// let step = |sequence, operation, from, to| TransitionRecord {
///     sequence,
///     request_id,
///     operation,
///     from,
///     to,
///     direction: TrackDirection::Two,
///     timestamp: Utc::now(),
/// };
///
/// let history = StateHistory::new()
///     .record(step(1, Operation::Submit, RequestStatus::None, RequestStatus::Ready))
///     .record(step(2, Operation::Begin, RequestStatus::Ready, RequestStatus::InProgress));
///
/// assert_eq!(
///     history.get_path(),
///     vec![RequestStatus::None, RequestStatus::Ready, RequestStatus::InProgress]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<TransitionRecord>,
    #[serde(default)]
    limit: Option<usize>,
}

impl StateHistory {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that retains at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    /// Append a transition in place, dropping the oldest record past the limit.
    pub fn push(&mut self, transition: TransitionRecord) {
        self.transitions.push(transition);
        self.trim();
    }

    /// Same records under a different retention limit, oldest dropped first.
    pub fn retain_last(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.trim();
        self
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            if self.transitions.len() > limit {
                let excess = self.transitions.len() - limit;
                self.transitions.drain(..excess);
            }
        }
    }

    /// Statuses traversed: the first record's `from`, then every `to`.
    pub fn get_path(&self) -> Vec<RequestStatus> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Whether any retained record entered `status`.
    pub fn entered(&self, status: RequestStatus) -> bool {
        self.transitions.iter().any(|t| t.to == status)
    }

    /// Time between the first and last retained records.
    ///
    /// `None` when empty or when the clock went backwards between them.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
