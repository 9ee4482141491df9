//! The `State` trait shared by lifecycle status enums.
//!
//! A state is a plain value. Inspecting it never has side effects, so the
//! transition table and the logging layer can ask questions of it freely.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states.
///
/// Implementors are small `Copy` values. Most are declared with
/// [`state_enum!`](crate::state_enum), which derives everything required
/// here and generates the three methods from the variant lists.
///
/// # Example
///
/// ```rust
/// use movement_authority::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
/// enum PointPosition {
///     Normal,
///     Reverse,
///     Failed,
/// }
///
/// impl State for PointPosition {
///     fn name(&self) -> &str {
///         match self {
///             Self::Normal => "Normal",
///             Self::Reverse => "Reverse",
///             Self::Failed => "Failed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Failed)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Failed)
///     }
/// }
///
/// assert_eq!(PointPosition::Reverse.name(), "Reverse");
/// assert!(PointPosition::Failed.is_error());
/// ```
pub trait State:
    Copy + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Whether the state is terminal.
    ///
    /// A terminal state accepts no further progress; only an explicit reset
    /// leaves it. Defaults to `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether the state signals an abnormal outcome. Defaults to `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
    enum Block {
        Clear,
        Occupied,
        Failed,
    }

    impl State for Block {
        fn name(&self) -> &str {
            match self {
                Self::Clear => "Clear",
                Self::Occupied => "Occupied",
                Self::Failed => "Failed",
            }
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Failed)
        }
    }

    #[test]
    fn defaults_are_not_final() {
        assert!(!Block::Clear.is_final());
        assert!(!Block::Failed.is_final());
    }

    #[test]
    fn overridden_methods_are_used() {
        assert_eq!(Block::Occupied.name(), "Occupied");
        assert!(Block::Failed.is_error());
        assert!(!Block::Clear.is_error());
    }

    #[test]
    fn state_serializes_as_variant() {
        let json = serde_json::to_string(&Block::Occupied).unwrap();
        assert_eq!(json, "\"Occupied\"");
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Block::Occupied);
    }
}
