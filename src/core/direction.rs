//! Track direction, an input the lifecycle reads but never owns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permitted direction of travel on a track segment.
///
/// A segment has exactly one value at any instant. `None` means no direction
/// has been assigned yet; a request cannot be readied against it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum TrackDirection {
    /// Unassigned or not yet configured.
    #[default]
    None,
    /// First direction of travel on a bidirectional segment.
    One,
    /// Second direction of travel on a bidirectional segment.
    Two,
}

impl TrackDirection {
    /// Every direction value, in declaration order.
    pub const ALL: [TrackDirection; 3] = [Self::None, Self::One, Self::Two];

    /// Whether a direction of travel has been assigned.
    pub fn is_assigned(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The reverse direction. `None` has no reverse.
    pub fn opposite(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::One => "One",
            Self::Two => "Two",
        }
    }
}

impl fmt::Display for TrackDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Supplies the current direction of the segment a request runs on.
///
/// Implemented by the track/topology collaborator. The lifecycle queries it
/// once per submission.
///
/// ```rust
/// use movement_authority::core::{DirectionSource, TrackDirection};
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// let reversed = AtomicBool::new(false);
/// let segment = || {
///     if reversed.load(Ordering::SeqCst) {
///         TrackDirection::Two
///     } else {
///         TrackDirection::One
///     }
/// };
///
/// assert_eq!(segment.current_direction(), TrackDirection::One);
/// reversed.store(true, Ordering::SeqCst);
/// assert_eq!(segment.current_direction(), TrackDirection::Two);
/// ```
pub trait DirectionSource {
    fn current_direction(&self) -> TrackDirection;
}

impl DirectionSource for TrackDirection {
    fn current_direction(&self) -> TrackDirection {
        *self
    }
}

impl<F> DirectionSource for F
where
    F: Fn() -> TrackDirection,
{
    fn current_direction(&self) -> TrackDirection {
        self()
    }
}
