//! Request lifecycle: the mutable shell around the core types.
//!
//! [`RequestLifecycle`] owns one slot and is driven through `&mut self` by a
//! single controlling authority. [`SharedLifecycle`] wraps it in a lock when
//! a normal control path and an asynchronous safety interrupt both need it.
//!
//! Legal transitions live in [`table`] as data.

mod error;
mod machine;
mod observer;
mod shared;
pub mod table;

pub use error::LifecycleError;
pub use machine::RequestLifecycle;
pub use observer::TransitionObserver;
pub use shared::SharedLifecycle;
pub use table::{legal_operations, next_status, TransitionRule, TRANSITIONS};
