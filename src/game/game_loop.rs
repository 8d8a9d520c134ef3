//! Game loop implementation
//!
//! Drains the effect queue in bounded batches: every effect is resolved on a
//! working copy, and only successful resolutions are committed back.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating all formatting work on the hot resolution path.
macro_rules! log_if_verbose {
    ($self:expr, $category:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self
                .logger
                .log_fmt(VerbosityLevel::Verbose, $category, format_args!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self;
        }
    };
}

use crate::core::{Side, Sided};
use crate::game::ai_controller::{choose_move, Strategy};
use crate::game::logger::GameLogger;
use crate::game::{
    triggers, Dispatcher, Effect, EffectKind, Event, GameOverReason, GameState, Phase, Resolution,
};
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};

/// Effects resolved per invocation unless configured otherwise
pub const DEFAULT_BATCH_CAP: usize = 10;

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - faults and game outcome
    Minimal = 1,
    /// Normal - rejections and prevented effects too (default)
    #[default]
    Normal = 2,
    /// Verbose - every resolution and event
    Verbose = 3,
}

/// An effect refused for breaking a rule, addressed to its issuer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub side: Side,
    pub effect: EffectKind,
    pub reason: String,
    pub details: String,
}

/// An engine defect met while resolving an effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultReport {
    pub side: Side,
    pub effect: EffectKind,
    pub error_id: String,
    pub reason: String,
    pub retryable: bool,
}

/// What one call to [`GameLoop::run_batch`] did
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Effects taken off the queue (or issued by autopilot)
    pub processed: usize,
    /// Events from Success and Prevented resolutions, in order
    pub events: Vec<Event>,
    pub rejections: Vec<Rejection>,
    pub faults: Vec<FaultReport>,
    /// A non-retryable fault stopped the batch early
    pub halted: bool,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.processed == 0
    }

    /// Reason the game ended during this batch, if it did
    pub fn game_over(&self) -> Option<(Side, GameOverReason)> {
        self.events.iter().find_map(|event| match event {
            Event::GameOver { winner, reason } => Some((*winner, *reason)),
            _ => None,
        })
    }
}

/// Result of running a game to completion
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Winner of the game (None if the game didn't finish)
    pub winner: Option<Side>,
    /// Total number of turns started
    pub turns_played: u32,
    /// Reason the game ended
    pub end_reason: GameEndReason,
}

/// Reason [`GameLoop::run_game`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// The game reached a winner
    Finished(GameOverReason),
    /// Game reached maximum turn limit
    TurnLimit,
    /// Nothing left to resolve and nobody on autopilot to act
    AwaitingInput,
    /// A non-retryable fault stopped processing
    Halted,
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    dispatcher: &'a Dispatcher,
    batch_cap: usize,
    /// Maximum turns before [`GameLoop::run_game`] gives up
    max_turns: u32,
    /// Sides the loop plays for when they have nothing queued
    autopilot: Sided<Option<Strategy>>,
    pub logger: GameLogger,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state
    pub fn new(game: &'a mut GameState, dispatcher: &'a Dispatcher) -> Self {
        GameLoop {
            game,
            dispatcher,
            batch_cap: DEFAULT_BATCH_CAP,
            max_turns: 200,
            autopilot: Sided::default(),
            logger: GameLogger::new(),
        }
    }

    pub fn with_batch_cap(mut self, batch_cap: usize) -> Self {
        self.batch_cap = batch_cap.max(1);
        self
    }

    /// Set maximum turns before forcing a stop
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    /// Let the loop choose moves for `side` using `strategy`
    pub fn with_autopilot(mut self, side: Side, strategy: Strategy) -> Self {
        self.autopilot[side] = Some(strategy);
        self
    }

    pub fn with_autopilots(mut self, autopilot: Sided<Option<Strategy>>) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Resolve up to `batch_cap` effects
    ///
    /// Stops early on a non-retryable fault or once the game has a winner, in
    /// which case whatever is still queued is discarded.
    pub fn run_batch(&mut self) -> BatchReport {
        let mut report = BatchReport::default();

        while report.processed < self.batch_cap {
            if self.game.is_game_over() {
                break;
            }
            let (effect, from_autopilot) = match self.game.queue.pop_front() {
                Some(effect) => (effect, false),
                None => match self.autopilot_move() {
                    Some(effect) => (effect, true),
                    None => break,
                },
            };
            report.processed += 1;

            match self.resolve_guarded(&effect) {
                Resolution::Success {
                    state,
                    events,
                    effects,
                } => {
                    if let Err(fault) = self.commit(*state, &events, effects) {
                        self.record_fault(&mut report, &effect, fault);
                        break;
                    }
                    log_if_verbose!(self, "resolution", "{} by {}: success", effect.kind(), effect.side());
                    for event in &events {
                        log_if_verbose!(self, "event", "{event}");
                    }
                    report.events.extend(events);
                }
                Resolution::Prevented { reason, events } => {
                    self.logger.log_fmt(
                        VerbosityLevel::Normal,
                        "prevented",
                        format_args!("{} by {} prevented: {reason}", effect.kind(), effect.side()),
                    );
                    // Nothing changed, so the AI would pick the same move again
                    if from_autopilot {
                        self.game.queue.push_back(Effect::EndTurn {
                            side: effect.side(),
                        });
                    }
                    report.events.extend(events);
                }
                Resolution::Rejected { reason, details } => {
                    self.logger.log_fmt(
                        VerbosityLevel::Normal,
                        "rejection",
                        format_args!(
                            "{} by {} rejected: {reason} ({details})",
                            effect.kind(),
                            effect.side()
                        ),
                    );
                    if from_autopilot {
                        self.game.queue.push_back(Effect::EndTurn {
                            side: effect.side(),
                        });
                    }
                    report.rejections.push(Rejection {
                        side: effect.side(),
                        effect: effect.kind(),
                        reason,
                        details,
                    });
                }
                fault @ Resolution::Fault { .. } => {
                    if self.record_fault(&mut report, &effect, fault) {
                        break;
                    }
                }
            }
        }

        if let Some(winner) = self.game.winner {
            if !self.game.queue.is_empty() {
                self.game.queue.clear();
            }
            if let Some((_, reason)) = report.game_over() {
                self.logger.log_fmt(
                    VerbosityLevel::Minimal,
                    "game_over",
                    format_args!("Game over: {winner} wins ({reason:?})"),
                );
            }
        }
        report
    }

    /// Run batches until the game ends, stalls, or hits the turn limit
    pub fn run_game(&mut self) -> GameResult {
        let end_reason = loop {
            if let Some(reason) = self.game.end_reason {
                break GameEndReason::Finished(reason);
            }
            if self.game.turn > self.max_turns {
                break GameEndReason::TurnLimit;
            }
            let report = self.run_batch();
            if let Some((_, reason)) = report.game_over() {
                break GameEndReason::Finished(reason);
            }
            if report.halted {
                break GameEndReason::Halted;
            }
            if report.is_empty() {
                break GameEndReason::AwaitingInput;
            }
        };

        GameResult {
            winner: self.game.winner,
            turns_played: self.game.turn,
            end_reason,
        }
    }

    /// Next move for an autopiloted active side waiting in its main phase
    fn autopilot_move(&self) -> Option<Effect> {
        let side = self.game.active;
        let strategy = self.autopilot[side]?;
        if self.game.phase != Phase::Main || self.game.is_game_over() {
            return None;
        }
        Some(choose_move(self.game, side, strategy).unwrap_or(Effect::EndTurn { side }))
    }

    /// Resolve with handler panics turned into faults
    fn resolve_guarded(&self, effect: &Effect) -> Resolution {
        let dispatcher = self.dispatcher;
        let game: &GameState = self.game;
        panic::catch_unwind(AssertUnwindSafe(|| dispatcher.resolve(effect, game))).unwrap_or_else(
            |payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Resolution::fault("handler_panic", message, false)
            },
        )
    }

    /// Fire triggers, check invariants, then replace the live state
    fn commit(
        &mut self,
        mut state: GameState,
        events: &[Event],
        children: Vec<Effect>,
    ) -> Result<(), Resolution> {
        let mut front = triggers::on_events(&mut state, events);
        front.extend(children);

        if let Err(err) = state.check_invariants() {
            return Err(Resolution::fault(err.error_id(), err.to_string(), false));
        }
        for effect in front.into_iter().rev() {
            state.queue.push_front(effect);
        }
        *self.game = state;
        Ok(())
    }

    /// Record a fault; true when it halts the batch
    fn record_fault(&mut self, report: &mut BatchReport, effect: &Effect, fault: Resolution) -> bool {
        let Resolution::Fault {
            error_id,
            reason,
            retryable,
        } = fault
        else {
            return false;
        };
        self.logger.log_fmt(
            VerbosityLevel::Minimal,
            "fault",
            format_args!(
                "{} by {} faulted [{error_id}]: {reason}",
                effect.kind(),
                effect.side()
            ),
        );
        report.faults.push(FaultReport {
            side: effect.side(),
            effect: effect.kind(),
            error_id,
            reason,
            retryable,
        });
        if !retryable {
            report.halted = true;
        }
        !retryable
    }
}
