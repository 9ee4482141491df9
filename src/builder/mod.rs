//! Builder API for configuring request slots.
//!
//! [`LifecycleBuilder`] assembles a [`RequestLifecycle`](crate::lifecycle::RequestLifecycle)
//! from a [`LifecycleConfig`](crate::config::LifecycleConfig) and a set of
//! observers, validating the configuration before anything is built.

pub mod error;
pub mod lifecycle;

pub use error::{BuildError, ConfigViolation};
pub use lifecycle::LifecycleBuilder;
