//! Hooks for collaborators that watch status changes.

use crate::core::TransitionRecord;

/// Receives every applied status change of a slot.
///
/// Called synchronously, in registration order, after the new status is in
/// place. Under [`SharedLifecycle`](super::SharedLifecycle) the call happens
/// while the slot's lock is held: keep it short and never call back into the
/// same slot.
pub trait TransitionObserver: Send + Sync {
    fn on_transition(&self, record: &TransitionRecord);
}

impl<F> TransitionObserver for F
where
    F: Fn(&TransitionRecord) + Send + Sync,
{
    fn on_transition(&self, record: &TransitionRecord) {
        self(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Operation, RequestStatus, TrackDirection};
    use chrono::Utc;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use uuid::Uuid;

    #[test]
    fn closures_observe_records() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer = move |record: &TransitionRecord| sink.lock().push(record.to);

        observer.on_transition(&TransitionRecord {
            sequence: 1,
            request_id: Uuid::new_v4(),
            operation: Operation::Submit,
            from: RequestStatus::None,
            to: RequestStatus::Ready,
            direction: TrackDirection::One,
            timestamp: Utc::now(),
        });

        assert_eq!(*seen.lock(), vec![RequestStatus::Ready]);
    }
}
