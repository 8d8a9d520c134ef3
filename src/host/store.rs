//! Game persistence boundary
//!
//! A store hands out exclusive leases on stored games. Leasing never waits:
//! if another invocation holds the game, the caller gets
//! [`DuelError::GameLocked`] at once and is expected to try again later.

use crate::core::{Side, Sided};
use crate::game::{GameState, Strategy};
use crate::{DuelError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::ops::DerefMut;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::{Mutex, OwnedMutexGuard};

pub type GameId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Active,
    Finished {
        winner: Side,
    },
}

/// Everything persisted for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredGame {
    /// Game state, pending effect queue included
    pub state: GameState,
    pub status: GameStatus,
    /// Sides the engine plays for itself
    #[serde(default)]
    pub autopilot: Sided<Option<Strategy>>,
}

impl StoredGame {
    pub fn new(state: GameState) -> Self {
        StoredGame {
            state,
            status: GameStatus::Active,
            autopilot: Sided::default(),
        }
    }

    pub fn with_autopilot(mut self, autopilot: Sided<Option<Strategy>>) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }
}

pub trait GameStore: Send + Sync {
    /// Exclusive access to one game; dropping it releases the game
    type Lease: DerefMut<Target = StoredGame> + Send;

    /// Store a new game under `id`
    fn create(&self, id: GameId, game: StoredGame) -> Result<()>;

    /// Lease a game, failing fast when it is held elsewhere
    fn try_lease(&self, id: GameId) -> Result<Self::Lease>;

    fn contains(&self, id: GameId) -> bool;
}

/// In-memory store with one async mutex per game
#[derive(Default, Clone)]
pub struct MemoryStore {
    games: Arc<RwLock<FxHashMap<GameId, Arc<Mutex<StoredGame>>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameStore for MemoryStore {
    type Lease = OwnedMutexGuard<StoredGame>;

    fn create(&self, id: GameId, game: StoredGame) -> Result<()> {
        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        if games.contains_key(&id) {
            return Err(DuelError::GameExists(id));
        }
        games.insert(id, Arc::new(Mutex::new(game)));
        Ok(())
    }

    fn try_lease(&self, id: GameId) -> Result<Self::Lease> {
        let slot = self
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(DuelError::GameNotFound(id))?;
        slot.try_lock_owned().map_err(|_| DuelError::GameLocked(id))
    }

    fn contains(&self, id: GameId) -> bool {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }
}
