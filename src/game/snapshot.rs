//! Game snapshots for stop-and-resume play
//!
//! A snapshot is the whole game state (queue included) plus whichever sides
//! were on autopilot, written as pretty JSON. Resuming is just loading it and
//! handing the state back to a game loop.

use crate::core::Sided;
use crate::game::ai_controller::Strategy;
use crate::game::state::GameState;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The complete game state, pending effects included
    pub game_state: GameState,

    /// Turn number when this snapshot was created
    pub turn_number: u32,

    /// Strategies the loop was playing with for each side
    #[serde(default)]
    pub autopilot: Sided<Option<Strategy>>,
}

impl GameSnapshot {
    pub fn new(game_state: GameState) -> Self {
        GameSnapshot {
            turn_number: game_state.turn,
            game_state,
            autopilot: Sided::default(),
        }
    }

    pub fn with_autopilot(mut self, autopilot: Sided<Option<Strategy>>) -> Self {
        self.autopilot = autopilot;
        self
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Is there anything left for a loop to resolve?
    pub fn has_pending_effects(&self) -> bool {
        !self.game_state.queue.is_empty()
    }
}
