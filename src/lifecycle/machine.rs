//! Lifecycle of the request bound to one slot.

use super::error::LifecycleError;
use super::observer::TransitionObserver;
use super::table;
use crate::builder::LifecycleBuilder;
use crate::checkpoint::{CheckpointError, LifecycleSnapshot, CHECKPOINT_VERSION};
use crate::config::LifecycleConfig;
use crate::core::{
    DirectionSource, Operation, RequestStatus, StateHistory, TrackDirection, TransitionRecord,
};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Identity of the request currently bound to the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ActiveRequest {
    id: Uuid,
    direction: TrackDirection,
}

/// Owns the status of one movement request slot and enforces legal
/// transitions.
///
/// Every operation validates first and mutates second: a rejected operation
/// leaves status, history and request identity untouched.
///
/// # Example
///
/// ```rust
/// use movement_authority::core::{RequestStatus, TrackDirection};
/// use movement_authority::lifecycle::{LifecycleError, RequestLifecycle};
///
/// let mut slot = RequestLifecycle::new();
///
/// slot.submit(TrackDirection::One).unwrap();
/// slot.begin().unwrap();
/// assert_eq!(slot.current_status(), RequestStatus::InProgress);
///
/// // A request in progress cannot be silently discarded.
/// assert!(matches!(
///     slot.reset(),
///     Err(LifecycleError::InvalidTransition { .. })
/// ));
///
/// slot.emergency_stop().unwrap();
/// slot.reset().unwrap();
/// assert_eq!(slot.current_status(), RequestStatus::None);
/// ```
pub struct RequestLifecycle {
    config: LifecycleConfig,
    status: RequestStatus,
    request: Option<ActiveRequest>,
    history: StateHistory,
    sequence: u64,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl RequestLifecycle {
    /// An idle slot with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(LifecycleConfig::default(), Vec::new())
    }

    pub fn builder() -> LifecycleBuilder {
        LifecycleBuilder::new()
    }

    /// Assemble an idle slot. The config must already be validated.
    pub(crate) fn from_parts(
        config: LifecycleConfig,
        observers: Vec<Arc<dyn TransitionObserver>>,
    ) -> Self {
        let history = empty_history(&config);
        Self {
            config,
            status: RequestStatus::None,
            request: None,
            history,
            sequence: 0,
            observers,
        }
    }

    pub fn add_observer(&mut self, observer: impl TransitionObserver + 'static) {
        self.observers.push(Arc::new(observer));
    }

    /// Return the slot to `None`, dropping the bound request and its history.
    ///
    /// Always succeeds. Observers are not notified.
    pub fn initialize(&mut self) {
        tracing::debug!(
            slot = %self.config.label,
            previous = %self.status,
            "initializing request slot"
        );
        self.status = RequestStatus::None;
        self.request = None;
        self.history = empty_history(&self.config);
        self.sequence = 0;
    }

    /// Issue a request against `direction`, moving `None -> Ready`.
    ///
    /// Fails with `InvalidTransition` unless the slot is idle, and with
    /// `InvalidDirection` if `direction` is unassigned or not permitted by
    /// the slot's configuration.
    pub fn submit(&mut self, direction: TrackDirection) -> Result<RequestStatus, LifecycleError> {
        let to = self.resolve(Operation::Submit)?;

        if !self.config.permits(direction) {
            return Err(self.reject(LifecycleError::InvalidDirection { direction }));
        }

        let request = ActiveRequest {
            id: Uuid::new_v4(),
            direction,
        };
        self.request = Some(request);
        tracing::info!(
            slot = %self.config.label,
            request_id = %request.id,
            direction = %direction,
            "request submitted"
        );
        self.commit(Operation::Submit, request, to);
        Ok(to)
    }

    /// Query `source` for the current direction and [`submit`](Self::submit) against it.
    pub fn submit_from<D>(&mut self, source: &D) -> Result<RequestStatus, LifecycleError>
    where
        D: DirectionSource + ?Sized,
    {
        self.submit(source.current_direction())
    }

    /// Grant execution authority, moving `Ready -> InProgress`.
    pub fn begin(&mut self) -> Result<RequestStatus, LifecycleError> {
        self.advance(Operation::Begin)
    }

    /// Record a normal finish, moving `InProgress -> Complete`.
    pub fn finish(&mut self) -> Result<RequestStatus, LifecycleError> {
        self.advance(Operation::Finish)
    }

    /// Interrupt the active request.
    ///
    /// Applies from `Ready` and `InProgress`. Repeating it while already
    /// stopped succeeds without recording anything.
    pub fn emergency_stop(&mut self) -> Result<RequestStatus, LifecycleError> {
        if self.status == RequestStatus::EmergencyStop {
            tracing::debug!(slot = %self.config.label, "emergency stop already in effect");
            return Ok(RequestStatus::EmergencyStop);
        }
        self.advance(Operation::EmergencyStop)
    }

    /// Recycle a finished or stopped slot, moving back to `None`.
    pub fn reset(&mut self) -> Result<RequestStatus, LifecycleError> {
        let to = self.advance(Operation::Reset)?;
        self.request = None;
        Ok(to)
    }

    /// Dispatch `operation`. `source` is only queried for `Submit`.
    pub fn apply<D>(
        &mut self,
        operation: Operation,
        source: &D,
    ) -> Result<RequestStatus, LifecycleError>
    where
        D: DirectionSource + ?Sized,
    {
        match operation {
            Operation::Initialize => {
                self.initialize();
                Ok(self.status)
            }
            Operation::Submit => self.submit_from(source),
            Operation::Begin => self.begin(),
            Operation::Finish => self.finish(),
            Operation::EmergencyStop => self.emergency_stop(),
            Operation::Reset => self.reset(),
        }
    }

    pub fn current_status(&self) -> RequestStatus {
        self.status
    }

    /// Identifier of the bound request; `None` while idle.
    pub fn request_id(&self) -> Option<Uuid> {
        self.request.map(|r| r.id)
    }

    /// Direction the bound request was readied against.
    pub fn direction(&self) -> TrackDirection {
        self.request
            .map(|r| r.direction)
            .unwrap_or(TrackDirection::None)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether the transition table allows `operation` from the current status.
    ///
    /// For `Submit` this does not check the direction.
    pub fn can(&self, operation: Operation) -> bool {
        table::next_status(self.status, operation).is_ok()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// When the current status was entered, if a transition has been recorded.
    pub fn status_since(&self) -> Option<DateTime<Utc>> {
        self.history.last().map(|record| record.timestamp)
    }

    /// How long the slot has held its current status as of `now`.
    ///
    /// Controllers that enforce movement deadlines poll this and call
    /// [`emergency_stop`](Self::emergency_stop) themselves.
    pub fn time_in_status(&self, now: DateTime<Utc>) -> Option<Duration> {
        let since = self.status_since()?;
        Some(
            now.signed_duration_since(since)
                .to_std()
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Capture the slot for a collaborator to persist.
    pub fn snapshot(&self) -> LifecycleSnapshot {
        LifecycleSnapshot {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            label: self.config.label.clone(),
            status: self.status,
            request_id: self.request_id(),
            direction: self.direction(),
            sequence: self.sequence,
            history: self.history.clone(),
        }
    }

    /// Rebuild a slot from a snapshot under `config`.
    ///
    /// The snapshot is validated again and a bound request must use a
    /// direction `config` permits. The config's history limit is applied to
    /// the restored history. Observers must be re-attached.
    pub fn restore(
        snapshot: LifecycleSnapshot,
        config: LifecycleConfig,
    ) -> Result<Self, CheckpointError> {
        snapshot.validate()?;
        config.check()?;
        if snapshot.request_id.is_some() && !config.permits(snapshot.direction) {
            return Err(CheckpointError::DirectionNotPermitted {
                direction: snapshot.direction,
            });
        }

        let request = snapshot.request_id.map(|id| ActiveRequest {
            id,
            direction: snapshot.direction,
        });
        let history = snapshot.history.retain_last(config.history_limit);

        tracing::info!(
            slot = %config.label,
            status = %snapshot.status,
            snapshot_id = %snapshot.id,
            "restored request slot"
        );

        Ok(Self {
            config,
            status: snapshot.status,
            request,
            history,
            sequence: snapshot.sequence,
            observers: Vec::new(),
        })
    }

    fn resolve(&self, operation: Operation) -> Result<RequestStatus, LifecycleError> {
        table::next_status(self.status, operation).map_err(|err| self.reject(err))
    }

    fn advance(&mut self, operation: Operation) -> Result<RequestStatus, LifecycleError> {
        let to = self.resolve(operation)?;
        let Some(request) = self.request else {
            return Err(self.reject(LifecycleError::InvalidTransition {
                status: self.status,
                operation,
            }));
        };
        self.commit(operation, request, to);
        Ok(to)
    }

    fn commit(&mut self, operation: Operation, request: ActiveRequest, to: RequestStatus) {
        let from = self.status;
        self.sequence += 1;
        let record = TransitionRecord {
            sequence: self.sequence,
            request_id: request.id,
            operation,
            from,
            to,
            direction: request.direction,
            timestamp: Utc::now(),
        };

        self.history.push(record.clone());
        self.status = to;

        if to == RequestStatus::EmergencyStop {
            tracing::warn!(
                slot = %self.config.label,
                request_id = %request.id,
                from = %from,
                "emergency stop applied"
            );
        } else {
            tracing::debug!(
                slot = %self.config.label,
                request_id = %request.id,
                operation = %operation,
                from = %from,
                to = %to,
                sequence = self.sequence,
                "transition applied"
            );
        }

        for observer in &self.observers {
            observer.on_transition(&record);
        }
    }

    fn reject(&self, err: LifecycleError) -> LifecycleError {
        tracing::warn!(
            slot = %self.config.label,
            status = %self.status,
            operation = %err.operation(),
            code = err.error_code(),
            "{}",
            err
        );
        err
    }
}

fn empty_history(config: &LifecycleConfig) -> StateHistory {
    match config.history_limit {
        Some(limit) => StateHistory::with_limit(limit),
        None => StateHistory::new(),
    }
}

impl Default for RequestLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLifecycle")
            .field("label", &self.config.label)
            .field("status", &self.status)
            .field("request_id", &self.request_id())
            .field("direction", &self.direction())
            .field("sequence", &self.sequence)
            .field("history_len", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
