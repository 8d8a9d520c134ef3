//! Turn phases
//!
//! Each turn walks start → refresh → draw → main. Main is where the active
//! side acts; it lasts until the side ends its turn.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Start,
    Refresh,
    Draw,
    Main,
}

impl Phase {
    /// Get the next phase in turn order
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Start => Some(Phase::Refresh),
            Phase::Refresh => Some(Phase::Draw),
            Phase::Draw => Some(Phase::Main),
            Phase::Main => None, // Waits for the player
        }
    }

    /// Can the active side play cards and attack?
    pub fn is_action_phase(&self) -> bool {
        matches!(self, Phase::Main)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::Refresh => "refresh",
            Phase::Draw => "draw",
            Phase::Main => "main",
        };
        f.write_str(name)
    }
}
