//! Movement authority: the lifecycle of a track movement request.
//!
//! A request slot moves through `None -> Ready -> InProgress -> Complete`,
//! with an emergency stop that can interrupt it at any active point. The
//! track direction a request is readied against comes from the topology
//! collaborator and is only ever read here.
//!
//! # Core Concepts
//!
//! - **Status**: [`RequestStatus`], the lifecycle position of one request
//! - **Direction**: [`TrackDirection`], the input constraint checked on submit
//! - **Lifecycle**: [`RequestLifecycle`], which owns a slot and enforces the
//!   transition table
//! - **Sharing**: [`SharedLifecycle`], one lock around a slot so a control
//!   loop and a safety interrupt can both drive it
//! - **History**: [`StateHistory`], the ordered record of applied transitions
//!
//! # Example
//!
//! ```rust
//! use movement_authority::{LifecycleError, RequestLifecycle, RequestStatus, TrackDirection};
//!
//! let mut slot = RequestLifecycle::new();
//!
//! // A request cannot be readied against an unassigned direction.
//! assert_eq!(
//!     slot.submit(TrackDirection::None),
//!     Err(LifecycleError::InvalidDirection { direction: TrackDirection::None })
//! );
//!
//! slot.submit(TrackDirection::One).unwrap();
//! slot.begin().unwrap();
//! slot.finish().unwrap();
//! slot.reset().unwrap();
//!
//! assert_eq!(slot.current_status(), RequestStatus::None);
//! assert_eq!(slot.history().len(), 4);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod lifecycle;
mod macros;

// Re-export commonly used types
pub use builder::{BuildError, LifecycleBuilder};
pub use checkpoint::{CheckpointError, LifecycleSnapshot};
pub use config::LifecycleConfig;
pub use crate::core::{
    DirectionSource, Operation, RequestStatus, State, StateHistory, TrackDirection,
    TransitionRecord,
};
pub use lifecycle::{LifecycleError, RequestLifecycle, SharedLifecycle, TransitionObserver};
