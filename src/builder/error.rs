//! Errors raised while configuring and building a lifecycle.

use thiserror::Error;

/// A single problem found in a [`LifecycleConfig`](crate::config::LifecycleConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("label must not be empty")]
    EmptyLabel,

    #[error("at least one track direction must be permitted")]
    NoPermittedDirections,

    #[error("the unassigned direction 'None' cannot be permitted")]
    UnassignedDirectionPermitted,

    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,
}

/// Errors that can occur when building a lifecycle.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid lifecycle configuration: {}", join(.0))]
    InvalidConfig(Vec<ConfigViolation>),

    #[error("failed to parse lifecycle configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BuildError {
    /// Violations carried by [`BuildError::InvalidConfig`]; empty otherwise.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            BuildError::InvalidConfig(violations) => violations,
            BuildError::Parse(_) => &[],
        }
    }
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
