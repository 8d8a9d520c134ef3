//! Error types for the duel engine

use crate::core::Side;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("{kind} not found: {id}")]
    EntityNotFound { kind: &'static str, id: u32 },

    #[error("Handler for {expected} received a {found} effect")]
    HandlerMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("It is not {issuer}'s turn ({active} is active)")]
    NotYourTurn { issuer: Side, active: Side },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Game {0} is locked by another invocation")]
    GameLocked(u64),

    #[error("Game {0} not found")]
    GameNotFound(u64),

    #[error("Game {0} already exists")]
    GameExists(u64),

    #[error("Invocation limit of {0} reached before the game settled")]
    InvocationLimit(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DuelError {
    /// Stable identifier reported in engine faults
    pub fn error_id(&self) -> &'static str {
        match self {
            DuelError::EntityNotFound { .. } => "entity_not_found",
            DuelError::HandlerMismatch { .. } => "handler_mismatch",
            DuelError::InvariantViolation(_) => "invariant_violation",
            DuelError::NotYourTurn { .. } => "not_your_turn",
            DuelError::InvalidCommand(_) => "invalid_command",
            DuelError::InvalidDeck(_) => "invalid_deck",
            DuelError::UnknownTemplate(_) => "unknown_template",
            DuelError::GameLocked(_) => "game_locked",
            DuelError::GameNotFound(_) => "game_not_found",
            DuelError::GameExists(_) => "game_exists",
            DuelError::InvocationLimit(_) => "invocation_limit",
            DuelError::IoError(_) => "io_error",
            DuelError::SerializationError(_) => "serialization_error",
        }
    }

    /// Errors a player caused and should see verbatim
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DuelError::NotYourTurn { .. } | DuelError::InvalidCommand(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DuelError>;
