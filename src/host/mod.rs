//! Hosting boundaries: persistence, transport, command intake, scheduling

pub mod scheduler;
pub mod service;
pub mod store;
pub mod transport;

pub use scheduler::drive;
pub use service::{Advance, Command, GameService, ServiceConfig};
pub use store::{GameId, GameStatus, GameStore, MemoryStore, StoredGame};
pub use transport::{ChannelTransport, Transport};
