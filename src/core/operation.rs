//! Operations a controller can invoke on a request slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A lifecycle operation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Initialize,
    Submit,
    Begin,
    Finish,
    EmergencyStop,
    Reset,
}

impl Operation {
    /// Every operation, in the order a normal request uses them.
    pub const ALL: [Operation; 6] = [
        Self::Initialize,
        Self::Submit,
        Self::Begin,
        Self::Finish,
        Self::EmergencyStop,
        Self::Reset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Submit => "submit",
            Self::Begin => "begin",
            Self::Finish => "finish",
            Self::EmergencyStop => "emergency_stop",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
