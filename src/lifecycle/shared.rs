//! A request slot shared between a control path and an interrupt path.

use super::error::LifecycleError;
use super::machine::RequestLifecycle;
use crate::checkpoint::LifecycleSnapshot;
use crate::core::{DirectionSource, Operation, RequestStatus, TrackDirection};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one [`RequestLifecycle`] behind a single lock.
///
/// Each operation holds the lock for exactly one validate-then-mutate step,
/// so transitions are linearizable. Critical sections never block or do I/O,
/// which bounds how long [`emergency_stop`](Self::emergency_stop) can wait
/// for an in-flight transition.
///
/// # Example
///
/// ```rust
/// use movement_authority::core::{RequestStatus, TrackDirection};
/// use movement_authority::lifecycle::SharedLifecycle;
/// use std::thread;
///
/// let slot = SharedLifecycle::default();
/// slot.submit(TrackDirection::One).unwrap();
/// slot.begin().unwrap();
///
/// let interrupt = slot.clone();
/// thread::spawn(move || interrupt.emergency_stop())
///     .join()
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(slot.current_status(), RequestStatus::EmergencyStop);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedLifecycle {
    inner: Arc<Mutex<RequestLifecycle>>,
}

impl SharedLifecycle {
    pub fn new(lifecycle: RequestLifecycle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lifecycle)),
        }
    }

    pub fn initialize(&self) {
        self.inner.lock().initialize()
    }

    pub fn submit(&self, direction: TrackDirection) -> Result<RequestStatus, LifecycleError> {
        self.inner.lock().submit(direction)
    }

    /// Query `source` before taking the lock, then submit.
    pub fn submit_from<D>(&self, source: &D) -> Result<RequestStatus, LifecycleError>
    where
        D: DirectionSource + ?Sized,
    {
        let direction = source.current_direction();
        self.submit(direction)
    }

    pub fn begin(&self) -> Result<RequestStatus, LifecycleError> {
        self.inner.lock().begin()
    }

    pub fn finish(&self) -> Result<RequestStatus, LifecycleError> {
        self.inner.lock().finish()
    }

    pub fn emergency_stop(&self) -> Result<RequestStatus, LifecycleError> {
        self.inner.lock().emergency_stop()
    }

    pub fn reset(&self) -> Result<RequestStatus, LifecycleError> {
        self.inner.lock().reset()
    }

    /// See [`RequestLifecycle::apply`]. The lock is held while `source` is queried.
    pub fn apply<D>(
        &self,
        operation: Operation,
        source: &D,
    ) -> Result<RequestStatus, LifecycleError>
    where
        D: DirectionSource + ?Sized,
    {
        self.inner.lock().apply(operation, source)
    }

    pub fn current_status(&self) -> RequestStatus {
        self.inner.lock().current_status()
    }

    /// Run `f` against a consistent view of the slot.
    pub fn read<R>(&self, f: impl FnOnce(&RequestLifecycle) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn snapshot(&self) -> LifecycleSnapshot {
        self.inner.lock().snapshot()
    }

    /// Recover the lifecycle if this is the last handle.
    pub fn try_unwrap(self) -> Result<RequestLifecycle, Self> {
        Arc::try_unwrap(self.inner)
            .map(|mutex| mutex.into_inner())
            .map_err(|inner| Self { inner })
    }
}

impl From<RequestLifecycle> for SharedLifecycle {
    fn from(lifecycle: RequestLifecycle) -> Self {
        Self::new(lifecycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn clones_share_one_slot() {
        let control = SharedLifecycle::default();
        let interrupt = control.clone();

        control.submit(TrackDirection::One).unwrap();
        interrupt.emergency_stop().unwrap();

        assert_eq!(control.current_status(), RequestStatus::EmergencyStop);
    }

    #[test]
    fn exactly_one_concurrent_begin_wins() {
        let slot = SharedLifecycle::default();
        slot.submit(TrackDirection::Two).unwrap();

        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let slot = slot.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    slot.begin()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();

        assert_eq!(wins, 1);
        assert!(results.iter().filter(|r| r.is_err()).all(|r| matches!(
            r,
            Err(LifecycleError::InvalidTransition {
                status: RequestStatus::InProgress,
                operation: Operation::Begin,
            })
        )));
        assert_eq!(slot.current_status(), RequestStatus::InProgress);
    }

    #[test]
    fn read_sees_consistent_state() {
        let slot = SharedLifecycle::default();
        slot.submit(TrackDirection::One).unwrap();

        let (status, id, len) =
            slot.read(|l| (l.current_status(), l.request_id(), l.history().len()));
        assert_eq!(status, RequestStatus::Ready);
        assert!(id.is_some());
        assert_eq!(len, 1);
    }

    #[test]
    fn try_unwrap_requires_last_handle() {
        let slot = SharedLifecycle::default();
        let other = slot.clone();

        let slot = slot.try_unwrap().unwrap_err();
        drop(other);

        let lifecycle = slot.try_unwrap().unwrap();
        assert_eq!(lifecycle.current_status(), RequestStatus::None);
    }
}
