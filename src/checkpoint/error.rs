//! Errors raised while encoding or restoring a slot snapshot.

use crate::builder::BuildError;
use crate::core::TrackDirection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckpointError {
    /// JSON encoding or decoding failed.
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding or decoding failed.
    #[error("snapshot bytes: {0}")]
    Binary(#[from] bincode::Error),

    #[error("snapshot format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot describes a slot no sequence of operations could produce.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),

    /// The bound request was readied against a direction the restoring slot forbids.
    #[error("cannot restore into slot: request direction '{direction}' is not permitted")]
    DirectionNotPermitted { direction: TrackDirection },

    /// The configuration supplied for the restored slot was rejected.
    #[error("cannot restore into slot: {0}")]
    Config(#[from] BuildError),
}

impl CheckpointError {
    pub(crate) fn inconsistent(reason: impl Into<String>) -> Self {
        Self::Inconsistent(reason.into())
    }
}
