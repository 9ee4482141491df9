//! Per-slot lifecycle configuration.
//!
//! Configuration is plain data: it derives serde so a controller can load it
//! from JSON alongside the rest of its settings. Validation collects every
//! violation in one pass instead of stopping at the first.

use crate::builder::{BuildError, ConfigViolation};
use crate::core::TrackDirection;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const DEFAULT_LABEL: &str = "request-slot";

/// Records a slot retains unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Settings for one request slot.
///
/// ```rust
/// use movement_authority::config::{LifecycleConfig, DEFAULT_HISTORY_LIMIT};
/// use movement_authority::core::TrackDirection;
///
/// let config = LifecycleConfig::from_json(
///     r#"{ "label": "platform-3", "permitted_directions": ["Two"] }"#,
/// )
/// .unwrap();
///
/// assert!(config.permits(TrackDirection::Two));
/// assert!(!config.permits(TrackDirection::One));
/// assert_eq!(config.history_limit, Some(DEFAULT_HISTORY_LIMIT));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Name of the slot in logs and snapshots.
    pub label: String,
    /// Directions a request may be readied against.
    pub permitted_directions: Vec<TrackDirection>,
    /// Maximum retained history records; unbounded when `None`.
    ///
    /// A recycled slot keeps appending, so an unbounded history grows for
    /// the life of the slot.
    pub history_limit: Option<usize>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            permitted_directions: vec![TrackDirection::One, TrackDirection::Two],
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl LifecycleConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Whether a request may be readied against `direction`.
    ///
    /// The unassigned direction is never permitted.
    pub fn permits(&self, direction: TrackDirection) -> bool {
        direction.is_assigned() && self.permitted_directions.contains(&direction)
    }

    /// Check every rule, accumulating all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks = vec![
            rule(!self.label.trim().is_empty(), ConfigViolation::EmptyLabel),
            rule(
                !self.permitted_directions.is_empty(),
                ConfigViolation::NoPermittedDirections,
            ),
            rule(
                self.permitted_directions.iter().all(|d| d.is_assigned()),
                ConfigViolation::UnassignedDirectionPermitted,
            ),
            rule(
                self.history_limit != Some(0),
                ConfigViolation::ZeroHistoryLimit,
            ),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn check(&self) -> Result<(), BuildError> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(BuildError::InvalidConfig(
                violations.iter().copied().collect(),
            )),
        }
    }
}

fn rule(holds: bool, violation: ConfigViolation) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LifecycleConfig::default();
        assert!(config.validate().is_success());
        assert!(config.check().is_ok());
        assert_eq!(config.label, DEFAULT_LABEL);
    }

    #[test]
    fn default_permits_both_assigned_directions() {
        let config = LifecycleConfig::default();
        assert!(config.permits(TrackDirection::One));
        assert!(config.permits(TrackDirection::Two));
        assert!(!config.permits(TrackDirection::None));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = LifecycleConfig {
            label: "  ".to_string(),
            permitted_directions: vec![TrackDirection::None],
            history_limit: Some(0),
        };

        match config.validate() {
            Validation::Failure(violations) => {
                assert_eq!(violations.len(), 3);
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ConfigViolation::EmptyLabel)));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ConfigViolation::UnassignedDirectionPermitted)));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ConfigViolation::ZeroHistoryLimit)));
            }
            Validation::Success(_) => panic!("Expected violations, got success"),
        }
    }

    #[test]
    fn empty_direction_list_is_rejected() {
        let config = LifecycleConfig {
            permitted_directions: Vec::new(),
            ..LifecycleConfig::default()
        };

        let err = config.check().unwrap_err();
        assert_eq!(err.violations(), &[ConfigViolation::NoPermittedDirections]);
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = LifecycleConfig::from_json(r#"{ "history_limit": 16 }"#).unwrap();
        assert_eq!(config.label, DEFAULT_LABEL);
        assert_eq!(config.history_limit, Some(16));
        assert_eq!(config.permitted_directions.len(), 2);
    }

    #[test]
    fn default_history_is_bounded_and_null_lifts_the_bound() {
        let defaulted = LifecycleConfig::from_json("{}").unwrap();
        assert_eq!(defaulted.history_limit, Some(DEFAULT_HISTORY_LIMIT));

        let unbounded = LifecycleConfig::from_json(r#"{ "history_limit": null }"#).unwrap();
        assert_eq!(unbounded.history_limit, None);
    }

    #[test]
    fn from_json_rejects_invalid_config() {
        let err = LifecycleConfig::from_json(r#"{ "permitted_directions": [] }"#).unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfig(_)));
        assert!(err.to_string().contains("at least one track direction"));
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let err = LifecycleConfig::from_json(r#"{ "permitted_directions": ["Three"] }"#)
            .unwrap_err();
        assert!(matches!(err, BuildError::Parse(_)));
    }
}
