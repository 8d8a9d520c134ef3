//! Effect dispatcher
//!
//! A fixed table from effect kind to handler, built once. The dispatcher
//! holds no rules of its own: it hands each handler a private copy of the
//! state and returns whatever the handler decides.

use crate::game::handlers::{board, cards, combat, damage, hero_power, play, restore, turn};
use crate::game::{Effect, EffectKind, GameState, Resolution};
use crate::Result;
use rustc_hash::FxHashMap;

/// Resolves one effect against an owned working copy of the state
pub type Handler = fn(&Effect, GameState) -> Result<Resolution>;

#[derive(Clone)]
pub struct Dispatcher {
    handlers: FxHashMap<EffectKind, Handler>,
}

impl Dispatcher {
    /// A dispatcher with no handlers registered
    pub fn empty() -> Self {
        Dispatcher {
            handlers: FxHashMap::default(),
        }
    }

    /// The full rule set: one handler per effect kind
    pub fn standard() -> Self {
        let mut dispatcher = Dispatcher::empty();
        dispatcher.register(EffectKind::StartGame, turn::handle_start_game);
        dispatcher.register(EffectKind::Play, play::handle_play);
        dispatcher.register(EffectKind::Attack, combat::handle_attack);
        dispatcher.register(EffectKind::Damage, damage::handle_damage);
        dispatcher.register(EffectKind::Heal, restore::handle_heal);
        dispatcher.register(EffectKind::Buff, restore::handle_buff);
        dispatcher.register(EffectKind::Draw, cards::handle_draw);
        dispatcher.register(EffectKind::Summon, cards::handle_summon);
        dispatcher.register(EffectKind::Clear, board::handle_clear);
        dispatcher.register(EffectKind::Remove, board::handle_remove);
        dispatcher.register(EffectKind::UseHeroPower, hero_power::handle_use_hero_power);
        dispatcher.register(EffectKind::EndTurn, turn::handle_end_turn);
        dispatcher.register(EffectKind::NewPhase, turn::handle_new_phase);
        dispatcher.register(EffectKind::Concede, turn::handle_concede);
        dispatcher.register(EffectKind::MarkExhausted, turn::handle_mark_exhausted);
        dispatcher.register(EffectKind::TempManaBoost, turn::handle_temp_mana_boost);
        dispatcher
    }

    /// Install or replace the handler for a kind
    pub fn register(&mut self, kind: EffectKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    pub fn handles(&self, kind: EffectKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Resolve an effect; `state` itself is never touched
    pub fn resolve(&self, effect: &Effect, state: &GameState) -> Resolution {
        let kind = effect.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            return Resolution::fault(
                "unknown_effect",
                format!("no handler registered for {kind}"),
                false,
            );
        };
        match handler(effect, state.clone()) {
            Ok(resolution) => resolution,
            Err(err) => err.into(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;
    use crate::game::state::tests::empty_game;

    #[test]
    fn test_standard_covers_every_kind() {
        let dispatcher = Dispatcher::standard();
        for kind in EffectKind::ALL {
            assert!(dispatcher.handles(kind), "no handler for {kind}");
        }
    }

    #[test]
    fn test_unknown_effect_faults() {
        let dispatcher = Dispatcher::empty();
        let resolution = dispatcher.resolve(&Effect::Concede { side: Side::SideA }, &empty_game());
        let Resolution::Fault {
            error_id,
            retryable,
            ..
        } = resolution
        else {
            panic!("expected fault");
        };
        assert_eq!(error_id, "unknown_effect");
        assert!(!retryable);
    }

    #[test]
    fn test_handler_errors_become_faults() {
        let mut dispatcher = Dispatcher::empty();
        // Wrong handler for the kind
        dispatcher.register(EffectKind::Concede, turn::handle_end_turn);
        let resolution = dispatcher.resolve(&Effect::Concede { side: Side::SideA }, &empty_game());
        assert!(matches!(
            resolution,
            Resolution::Fault { ref error_id, .. } if error_id == "handler_mismatch"
        ));
    }

    #[test]
    fn test_resolve_leaves_input_untouched() {
        let dispatcher = Dispatcher::standard();
        let game = empty_game();
        let resolution = dispatcher.resolve(&Effect::Concede { side: Side::SideA }, &game);
        assert!(resolution.is_success());
        assert!(game.winner.is_none());
    }
}
