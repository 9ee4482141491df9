//! Core lifecycle types.
//!
//! - [`RequestStatus`] and [`TrackDirection`], the two enumerations the
//!   lifecycle is built on
//! - [`Operation`], the verbs a controller applies to a slot
//! - [`StateHistory`], the record of applied transitions
//!
//! Nothing in this module mutates shared state or performs I/O.

mod direction;
mod history;
mod operation;
mod state;
mod status;

pub use direction::{DirectionSource, TrackDirection};
pub use history::{StateHistory, TransitionRecord};
pub use operation::Operation;
pub use state::State;
pub use status::RequestStatus;
