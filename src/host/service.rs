//! Game service: command intake and batch advancement
//!
//! `submit` queues a player's command; `advance` runs one bounded batch,
//! saves the result and sends each side its filtered update. Neither ever
//! waits for a game held by another invocation.

use crate::core::{CardId, CreatureId, Side, Sided};
use crate::game::{
    Dispatcher, Effect, GameLogger, GameLoop, GameState, OutputFormat, Phase, RuleConfig,
    Strategy, Target, VerbosityLevel, DEFAULT_BATCH_CAP,
};
use crate::host::store::{GameId, GameStatus, GameStore, StoredGame};
use crate::host::transport::Transport;
use crate::loader::{DeckList, GameInitializer, TemplateLibrary};
use crate::notify::{side_update, RevealPolicy};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Effects resolved per `advance`
    pub batch_cap: usize,
    /// Delay the scheduler should wait before the next `advance`
    pub continue_delay: Duration,
    pub reveal: RevealPolicy,
    pub verbosity: VerbosityLevel,
    /// Text or JSON lines for the driver's log output
    pub log_format: OutputFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            batch_cap: DEFAULT_BATCH_CAP,
            continue_delay: Duration::from_millis(50),
            reveal: RevealPolicy::default(),
            verbosity: VerbosityLevel::Minimal,
            log_format: OutputFormat::Text,
        }
    }
}

/// A player command as it arrives from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    StartGame,
    Play {
        card_id: CardId,
        #[serde(default)]
        position: usize,
        #[serde(default)]
        target: Option<Target>,
    },
    Attack {
        attacker: CreatureId,
        target: Target,
    },
    UseHeroPower {
        #[serde(default)]
        target: Option<Target>,
    },
    EndTurn,
    Concede,
}

impl Command {
    pub fn into_effect(self, side: Side) -> Effect {
        match self {
            Command::StartGame => Effect::StartGame { side },
            Command::Play {
                card_id,
                position,
                target,
            } => Effect::Play {
                side,
                card_id,
                position,
                target,
            },
            Command::Attack { attacker, target } => Effect::Attack {
                side,
                attacker,
                target,
            },
            Command::UseHeroPower { target } => Effect::UseHeroPower { side, target },
            Command::EndTurn => Effect::EndTurn { side },
            Command::Concede => Effect::Concede { side },
        }
    }

    /// Commands any side may send at any time
    fn ignores_turn(&self) -> bool {
        matches!(self, Command::Concede)
    }
}

/// What the scheduler should do after an `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another invocation holds the game; nothing was done
    Busy,
    /// Nothing to resolve until a player acts
    Idle,
    /// More work is pending; invoke again after the delay
    Continue { after: Duration },
    Finished { winner: Side },
}

pub struct GameService<S: GameStore, T: Transport> {
    store: S,
    transport: T,
    dispatcher: Dispatcher,
    library: TemplateLibrary,
    config: ServiceConfig,
    next_id: AtomicU64,
}

impl<S: GameStore, T: Transport> GameService<S, T> {
    pub fn new(store: S, transport: T, library: TemplateLibrary) -> Self {
        GameService {
            store,
            transport,
            dispatcher: Dispatcher::standard(),
            library,
            config: ServiceConfig::default(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Set up a new game; its `StartGame` is queued but not yet resolved
    pub fn create_game(
        &self,
        deck_a: &DeckList,
        deck_b: &DeckList,
        rules: RuleConfig,
        seed: u64,
        autopilot: Sided<Option<Strategy>>,
    ) -> Result<GameId> {
        let state = GameInitializer::new(&self.library).init_game(deck_a, deck_b, rules, seed)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.store
            .create(id, StoredGame::new(state).with_autopilot(autopilot))?;
        Ok(id)
    }

    /// Queue a command from `issuer`
    ///
    /// Only the active side may act, except that anyone may concede.
    pub fn submit(&self, game_id: GameId, command: Command, issuer: Side) -> Result<()> {
        let mut lease = self.store.try_lease(game_id)?;
        if lease.is_finished() {
            return Err(DuelError::InvalidCommand("the game is over".to_string()));
        }
        let active = lease.state.active;
        if issuer != active && !command.ignores_turn() {
            return Err(DuelError::NotYourTurn { issuer, active });
        }
        lease.state.queue.push_back(command.into_effect(issuer));
        Ok(())
    }

    /// Parse a JSON command and queue it
    pub fn submit_raw(&self, game_id: GameId, raw: &str, issuer: Side) -> Result<()> {
        let command: Command = serde_json::from_str(raw)
            .map_err(|e| DuelError::InvalidCommand(format!("malformed command: {e}")))?;
        self.submit(game_id, command, issuer)
    }

    /// Run one batch, save it and notify both sides
    pub fn advance(&self, game_id: GameId) -> Result<Advance> {
        let mut lease = match self.store.try_lease(game_id) {
            Ok(lease) => lease,
            Err(DuelError::GameLocked(_)) => return Ok(Advance::Busy),
            Err(err) => return Err(err),
        };
        if let GameStatus::Finished { winner } = lease.status {
            return Ok(Advance::Finished { winner });
        }

        let mut state = lease.state.clone();
        let report = GameLoop::new(&mut state, &self.dispatcher)
            .with_batch_cap(self.config.batch_cap)
            .with_autopilots(lease.autopilot.clone())
            .with_logger(self.logger())
            .run_batch();
        if report.is_empty() {
            return Ok(Advance::Idle);
        }

        if let Some(winner) = state.winner {
            lease.status = GameStatus::Finished { winner };
        }
        lease.state = state;

        for side in Side::ALL {
            let update = side_update(&lease.state, &report, side, self.config.reveal);
            self.transport.broadcast(game_id, side, update);
        }

        Ok(match lease.status {
            GameStatus::Finished { winner } => Advance::Finished { winner },
            GameStatus::Active if has_work(&lease.state, &lease.autopilot) => Advance::Continue {
                after: self.config.continue_delay,
            },
            GameStatus::Active => Advance::Idle,
        })
    }

    /// A fresh logger for one batch, as configured
    pub fn logger(&self) -> GameLogger {
        let mut logger = GameLogger::with_verbosity(self.config.verbosity);
        logger.set_output_format(self.config.log_format);
        logger
    }

    /// Copy of a game's state, if it is not leased elsewhere
    pub fn peek(&self, game_id: GameId) -> Result<GameState> {
        Ok(self.store.try_lease(game_id)?.state.clone())
    }
}

/// Will the next batch have anything to do?
fn has_work(state: &GameState, autopilot: &Sided<Option<Strategy>>) -> bool {
    !state.queue.is_empty() || (state.phase == Phase::Main && autopilot[state.active].is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::store::MemoryStore;
    use crate::host::transport::ChannelTransport;
    use crate::loader::{starter_deck, starter_library};
    use crate::notify::{ClientError, Update};

    type TestService = GameService<MemoryStore, ChannelTransport>;

    fn service() -> TestService {
        let config = ServiceConfig {
            verbosity: VerbosityLevel::Silent,
            ..ServiceConfig::default()
        };
        GameService::new(MemoryStore::new(), ChannelTransport::new(), starter_library())
            .with_config(config)
    }

    fn human_game(service: &TestService) -> GameId {
        service
            .create_game(
                &starter_deck("Pyromancer"),
                &starter_deck("Cleric"),
                RuleConfig::default(),
                11,
                Sided::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_command_json() {
        let command: Command =
            serde_json::from_str(r#"{"type":"attack","attacker":4,"target":{"type":"hero","id":"side_b"}}"#)
                .unwrap();
        assert_eq!(
            command.into_effect(Side::SideA),
            Effect::Attack {
                side: Side::SideA,
                attacker: CreatureId::new(4),
                target: Target::Hero(Side::SideB),
            }
        );
    }

    #[test]
    fn test_log_format_from_config() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"verbosity":"verbose","log_format":"json"}"#).unwrap();
        assert_eq!(config.batch_cap, DEFAULT_BATCH_CAP);

        let logger = service().with_config(config).logger();
        assert_eq!(logger.output_format(), OutputFormat::Json);
        assert_eq!(logger.verbosity(), VerbosityLevel::Verbose);
        assert_eq!(service().logger().output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_start_then_idle() {
        let service = service();
        let id = human_game(&service);

        assert_eq!(service.advance(id).unwrap(), Advance::Idle);
        let state = service.peek(id).unwrap();
        assert_eq!(state.phase, Phase::Main);
        // Nothing queued, nobody on autopilot
        assert_eq!(service.advance(id).unwrap(), Advance::Idle);
    }

    #[test]
    fn test_submit_checks_turn() {
        let service = service();
        let id = human_game(&service);
        service.advance(id).unwrap();

        let err = service.submit(id, Command::EndTurn, Side::SideB).unwrap_err();
        assert!(err.is_user_facing());
        assert!(matches!(err, DuelError::NotYourTurn { .. }));

        // Conceding is allowed off-turn
        service.submit(id, Command::Concede, Side::SideB).unwrap();
        assert_eq!(
            service.advance(id).unwrap(),
            Advance::Finished {
                winner: Side::SideA
            }
        );
        let err = service.submit(id, Command::EndTurn, Side::SideA).unwrap_err();
        assert!(matches!(err, DuelError::InvalidCommand(_)));
    }

    #[test]
    fn test_submit_raw_rejects_garbage() {
        let service = service();
        let id = human_game(&service);
        let err = service.submit_raw(id, "{\"type\":\"fly\"}", Side::SideA).unwrap_err();
        assert!(err.is_user_facing());

        service.submit_raw(id, r#"{"type":"end_turn"}"#, Side::SideA).unwrap();
        assert_eq!(service.peek(id).unwrap().queue.len(), 2);
    }

    #[test]
    fn test_busy_game_is_left_alone() {
        let service = service();
        let id = human_game(&service);
        let lease = service.store().try_lease(id).unwrap();

        assert_eq!(service.advance(id).unwrap(), Advance::Busy);
        assert!(matches!(
            service.submit(id, Command::EndTurn, Side::SideA),
            Err(DuelError::GameLocked(_))
        ));
        assert_eq!(lease.state.turn, 0);
    }

    #[tokio::test]
    async fn test_each_side_gets_one_update_per_batch() {
        let service = service();
        let id = human_game(&service);
        let mut rx_a = service.transport().subscribe(id, Side::SideA);
        let mut rx_b = service.transport().subscribe(id, Side::SideB);

        service.advance(id).unwrap();

        let for_a = rx_a.recv().await.unwrap();
        let for_b = rx_b.recv().await.unwrap();
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_err());

        // Side A sees its own draws and only a count for side B's
        assert!(for_a
            .updates
            .iter()
            .any(|u| matches!(u, Update::CardsDrawn { side: Side::SideB, count: 3 })));
        assert!(!for_b
            .updates
            .iter()
            .any(|u| matches!(u, Update::Event(crate::game::Event::Draw { side: Side::SideA, .. }))));
    }

    #[tokio::test]
    async fn test_rejection_reported_to_issuer() {
        let service = service();
        let id = human_game(&service);
        let mut rx_a = service.transport().subscribe(id, Side::SideA);
        let mut rx_b = service.transport().subscribe(id, Side::SideB);
        service.advance(id).unwrap();
        rx_a.recv().await.unwrap();
        rx_b.recv().await.unwrap();

        service
            .submit(
                id,
                Command::Attack {
                    attacker: CreatureId::new(99),
                    target: Target::Hero(Side::SideB),
                },
                Side::SideA,
            )
            .unwrap();
        service.advance(id).unwrap();

        let for_a = rx_a.recv().await.unwrap();
        let for_b = rx_b.recv().await.unwrap();
        assert!(matches!(&for_a.errors[..], [ClientError::Rejected { .. }]));
        assert!(for_b.errors.is_empty());
        assert!(for_b.updates.is_empty());
    }
}
