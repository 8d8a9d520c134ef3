//! Duel Engine - a turn-based two-sided card game engine
//!
//! Every state change is an effect resolved against a private copy of the
//! game state and committed only when it succeeds. Cards carry declarative
//! traits that react to the resulting events with further effects.

pub mod core;
pub mod error;
pub mod game;
pub mod host;
pub mod loader;
pub mod notify;
pub mod tournament;
pub mod zones;

pub use error::{DuelError, Result};
