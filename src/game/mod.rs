//! Game rules: state, effects, resolution and the driver loop

pub mod actions;
pub mod ai_controller;
pub mod controller;
pub mod dispatcher;
pub mod effect;
pub mod event;
pub mod game_loop;
pub mod handlers;
pub mod logger;
pub mod phase;
pub mod resolution;
pub mod snapshot;
pub mod state;
pub mod triggers;

pub use ai_controller::{choose_move, Strategy};
pub use controller::GameStateView;
pub use dispatcher::{Dispatcher, Handler};
pub use effect::{ClearScope, DamageType, Effect, EffectKind, Source, Target, Unit};
pub use event::{Event, GameOverReason};
pub use game_loop::{
    BatchReport, FaultReport, GameEndReason, GameLoop, GameResult, Rejection, VerbosityLevel,
    DEFAULT_BATCH_CAP,
};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode};
pub use phase::Phase;
pub use resolution::Resolution;
pub use snapshot::GameSnapshot;
pub use state::{GameState, RuleConfig};
