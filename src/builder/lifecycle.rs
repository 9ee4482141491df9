//! Builder for constructing request slots.

use crate::builder::error::BuildError;
use crate::config::LifecycleConfig;
use crate::core::TrackDirection;
use crate::lifecycle::{RequestLifecycle, SharedLifecycle, TransitionObserver};
use std::sync::Arc;

/// Fluent builder for a [`RequestLifecycle`].
///
/// Starts from [`LifecycleConfig::default`]. The configuration is validated
/// once, in [`build`](Self::build), and every violation is reported together.
///
/// ```rust
/// use movement_authority::builder::LifecycleBuilder;
/// use movement_authority::core::TrackDirection;
///
/// let slot = LifecycleBuilder::new()
///     .label("siding-east")
///     .permitted_directions([TrackDirection::One])
///     .history_limit(32)
///     .build()
///     .unwrap();
///
/// assert_eq!(slot.config().label, "siding-east");
/// ```
pub struct LifecycleBuilder {
    config: LifecycleConfig,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl LifecycleBuilder {
    pub fn new() -> Self {
        Self {
            config: LifecycleConfig::default(),
            observers: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Restrict submissions to these directions.
    pub fn permitted_directions(
        mut self,
        directions: impl IntoIterator<Item = TrackDirection>,
    ) -> Self {
        self.config.permitted_directions = directions.into_iter().collect();
        self
    }

    /// Retain at most `limit` history records.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = Some(limit);
        self
    }

    /// Keep every history record for the life of the slot.
    pub fn unbounded_history(mut self) -> Self {
        self.config.history_limit = None;
        self
    }

    /// Register an observer; observers run in registration order.
    pub fn observer(mut self, observer: impl TransitionObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    pub fn build(self) -> Result<RequestLifecycle, BuildError> {
        self.config.check()?;
        Ok(RequestLifecycle::from_parts(self.config, self.observers))
    }

    /// Build and wrap in a [`SharedLifecycle`].
    pub fn build_shared(self) -> Result<SharedLifecycle, BuildError> {
        self.build().map(SharedLifecycle::new)
    }
}

impl Default for LifecycleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
