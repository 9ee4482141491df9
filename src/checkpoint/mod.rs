//! Snapshots of a request slot.
//!
//! A snapshot captures status, request identity and history so a controller
//! can persist a slot and rebuild it after a restart with
//! [`RequestLifecycle::restore`](crate::lifecycle::RequestLifecycle::restore).
//! Where the bytes are stored is up to the controller. Observers are not
//! captured.

use crate::core::{RequestStatus, StateHistory, TrackDirection};
use crate::lifecycle::table;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the snapshot format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable state of one request slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifecycleSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Label of the slot the snapshot came from
    pub label: String,

    /// Status at snapshot time
    pub status: RequestStatus,

    /// Bound request, absent while idle
    pub request_id: Option<Uuid>,

    /// Direction the bound request was readied against
    pub direction: TrackDirection,

    /// Last sequence number handed out
    pub sequence: u64,

    /// Retained transition history
    pub history: StateHistory,
}

impl LifecycleSnapshot {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate a binary snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the snapshot is one a slot could actually have produced.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if let Some(last) = self.history.last() {
            if last.to != self.status {
                return Err(CheckpointError::inconsistent(format!(
                    "status '{}' does not match last recorded transition to '{}'",
                    self.status, last.to
                )));
            }
            if last.sequence > self.sequence {
                return Err(CheckpointError::inconsistent(format!(
                    "history sequence {} is ahead of slot sequence {}",
                    last.sequence, self.sequence
                )));
            }
        }

        self.check_request_identity()?;
        self.check_last_transition()
    }

    fn check_request_identity(&self) -> Result<(), CheckpointError> {
        match (self.status, self.request_id) {
            (RequestStatus::None, Some(id)) => Err(CheckpointError::inconsistent(format!(
                "idle slot still carries request {id}"
            ))),
            (RequestStatus::None, None) if self.direction.is_assigned() => {
                Err(CheckpointError::inconsistent(format!(
                    "idle slot still carries direction '{}'",
                    self.direction
                )))
            }
            (status, None) if status != RequestStatus::None => Err(
                CheckpointError::inconsistent(format!("status '{status}' has no request id")),
            ),
            (status, Some(_)) if !self.direction.is_assigned() => {
                Err(CheckpointError::inconsistent(format!(
                    "status '{status}' has no assigned direction"
                )))
            }
            _ => Ok(()),
        }
    }

    /// An active or finished slot must have recorded the transition that put
    /// it there, by its own request along a legal edge.
    fn check_last_transition(&self) -> Result<(), CheckpointError> {
        let Some(last) = self.history.last() else {
            if self.status.is_idle() {
                return Ok(());
            }
            return Err(CheckpointError::inconsistent(format!(
                "status '{}' has no recorded transition",
                self.status
            )));
        };

        if table::next_status(last.from, last.operation) != Ok(last.to) {
            return Err(CheckpointError::inconsistent(format!(
                "recorded transition '{}' -> '{}' by {} is not legal",
                last.from, last.to, last.operation
            )));
        }

        if let Some(id) = self.request_id {
            if last.request_id != id || last.direction != self.direction {
                return Err(CheckpointError::inconsistent(format!(
                    "last recorded transition belongs to request {} on '{}', not {id} on '{}'",
                    last.request_id, last.direction, self.direction
                )));
            }
        }
        Ok(())
    }
}
