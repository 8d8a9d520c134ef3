//! Stand-in job runner that keeps invoking `advance`

use crate::host::service::{Advance, GameService};
use crate::host::store::{GameId, GameStore};
use crate::host::transport::Transport;
use crate::{DuelError, Result};
use tokio::time::sleep;

/// Invoke `advance` until the game finishes or goes idle
///
/// Returns the last [`Advance`] (`Finished` or `Idle`). A busy game is
/// retried after the configured continue delay.
pub async fn drive<S, T>(
    service: &GameService<S, T>,
    game_id: GameId,
    max_invocations: usize,
) -> Result<Advance>
where
    S: GameStore,
    T: Transport,
{
    for _ in 0..max_invocations {
        match service.advance(game_id)? {
            done @ (Advance::Finished { .. } | Advance::Idle) => return Ok(done),
            Advance::Continue { after } => sleep(after).await,
            Advance::Busy => sleep(service.config().continue_delay).await,
        }
    }
    Err(DuelError::InvocationLimit(max_invocations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Side, Sided};
    use crate::game::{RuleConfig, Strategy, VerbosityLevel};
    use crate::host::service::ServiceConfig;
    use crate::host::store::MemoryStore;
    use crate::host::transport::ChannelTransport;
    use crate::loader::{starter_deck, starter_library};

    fn ai_service() -> GameService<MemoryStore, ChannelTransport> {
        let config = ServiceConfig {
            verbosity: VerbosityLevel::Silent,
            ..ServiceConfig::default()
        };
        GameService::new(MemoryStore::new(), ChannelTransport::new(), starter_library())
            .with_config(config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_ai_game_to_the_end() {
        let service = ai_service();
        let autopilot = Sided::new(Some(Strategy::Rush), Some(Strategy::Balanced));
        let id = service
            .create_game(
                &starter_deck("Pyromancer"),
                &starter_deck("Warden"),
                RuleConfig::default(),
                5,
                autopilot,
            )
            .unwrap();

        let outcome = drive(&service, id, 10_000).await.unwrap();
        assert!(matches!(outcome, Advance::Finished { .. }));
        assert!(service.peek(id).unwrap().winner.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_stops_at_limit() {
        let service = ai_service();
        let autopilot = Sided::new(Some(Strategy::Control), Some(Strategy::Control));
        let id = service
            .create_game(
                &starter_deck("Cleric"),
                &starter_deck("Cleric"),
                RuleConfig::default(),
                1,
                autopilot,
            )
            .unwrap();

        let err = drive(&service, id, 2).await.unwrap_err();
        assert!(matches!(err, DuelError::InvocationLimit(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_returns_idle_for_human_turn() {
        let service = ai_service();
        let autopilot = Sided::new(None, Some(Strategy::Rush));
        let id = service
            .create_game(
                &starter_deck("Cleric"),
                &starter_deck("Warden"),
                RuleConfig::default(),
                3,
                autopilot,
            )
            .unwrap();

        assert_eq!(drive(&service, id, 100).await.unwrap(), Advance::Idle);
        let state = service.peek(id).unwrap();
        assert_eq!(state.active, Side::SideA);
    }
}
