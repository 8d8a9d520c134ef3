//! Effect handlers
//!
//! One function per effect kind. Every handler receives its own working copy
//! of the state and returns a `Resolution`; only `Success` hands the copy
//! back. Rule violations are `Rejected`, never `Err`. An `Err` means the
//! engine itself is broken and becomes a fault.

pub mod board;
pub mod cards;
pub mod combat;
pub mod damage;
pub mod hero_power;
pub mod play;
pub mod restore;
pub mod turn;

use crate::core::{Action, Allegiance, Side};
use crate::game::{Effect, EffectKind, Event, GameState, Resolution, Target};
use crate::DuelError;

/// Error for an effect routed to the wrong handler
pub(crate) fn mismatch(expected: EffectKind, effect: &Effect) -> DuelError {
    DuelError::HandlerMismatch {
        expected: expected.as_str(),
        found: effect.kind().as_str(),
    }
}

/// Rejects actions from a side that isn't active or outside the main phase
pub(crate) fn check_action_window(state: &GameState, side: Side) -> Option<Resolution> {
    if state.is_game_over() {
        return Some(Resolution::rejected("game is over", ""));
    }
    if state.active != side {
        let err = DuelError::NotYourTurn {
            issuer: side,
            active: state.active,
        };
        return Some(Resolution::rejected("not your turn", err.to_string()));
    }
    if !state.phase.is_action_phase() {
        return Some(Resolution::rejected(
            "wrong phase",
            format!("actions are only allowed in the main phase, not {}", state.phase),
        ));
    }
    None
}

/// Checks a player-chosen target against a chosen-scope action
///
/// The target must be a hero or a creature on a board, pass the allegiance
/// filter, and not be an enemy hidden by stealth.
pub(crate) fn validate_chosen(
    state: &GameState,
    side: Side,
    allegiance: Allegiance,
    creatures_only: bool,
    target: Target,
) -> Result<(), String> {
    let Some(owner) = state.target_owner(target) else {
        return Err(format!("target {target:?} is not in play"));
    };
    if creatures_only && matches!(target, Target::Hero(_)) {
        return Err("this action can only target creatures".to_string());
    }
    if !allegiance.admits(side, owner) {
        return Err(format!("target must be {allegiance:?}").to_lowercase());
    }
    if state.is_stealthed_enemy(side, target) {
        return Err("target is stealthed".to_string());
    }
    Ok(())
}

/// Validates a target for every chosen-scope action in a list
pub(crate) fn validate_actions_target<'a>(
    state: &GameState,
    side: Side,
    actions: impl IntoIterator<Item = &'a Action>,
    target: Option<Target>,
) -> Result<(), String> {
    for action in actions {
        let crate::core::ActionTarget::Chosen(allegiance) = action.target else {
            continue;
        };
        let Some(target) = target else {
            return Err("a target is required".to_string());
        };
        validate_chosen(state, side, allegiance, action.targets_creatures_only(), target)?;
    }
    Ok(())
}

/// Prevented resolution carrying a matching fizzle event
pub(crate) fn fizzle(side: Side, reason: impl Into<String>) -> Resolution {
    let reason = reason.into();
    Resolution::prevented(
        reason.clone(),
        vec![Event::Fizzle {
            side,
            reason,
        }],
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::CreatureId;
    use crate::game::state::tests::{creature_template, empty_game};
    use crate::game::Phase;
    use crate::loader::CardTemplate;
    use crate::zones::Zone;

    /// A started game in side A's main phase with some mana
    pub(crate) fn main_phase_game(mana: u32) -> GameState {
        let mut game = empty_game();
        game.turn = 1;
        game.phase = Phase::Main;
        game.mana_pool[Side::SideA] = mana;
        game.mana_pool[Side::SideB] = mana;
        game
    }

    /// Put a ready-to-act creature on a side's board
    pub(crate) fn put_on_board(game: &mut GameState, side: Side, template: &CardTemplate) -> CreatureId {
        let card_id = game.add_card(side, template, Zone::Board);
        let position = game.board(side).len();
        let id = game.spawn_creature(card_id, position).unwrap();
        game.creatures.get_mut(id).unwrap().exhausted = false;
        id
    }

    pub(crate) fn bear(game: &mut GameState, side: Side) -> CreatureId {
        put_on_board(game, side, &creature_template("Bear", 2, 2))
    }

    #[test]
    fn test_action_window() {
        let mut game = main_phase_game(1);
        assert!(check_action_window(&game, Side::SideA).is_none());
        assert!(check_action_window(&game, Side::SideB).is_some_and(|r| r.is_rejected()));

        game.phase = Phase::Draw;
        assert!(check_action_window(&game, Side::SideA).is_some());
    }

    #[test]
    fn test_validate_chosen() {
        let mut game = main_phase_game(1);
        let own = bear(&mut game, Side::SideA);
        let enemy = bear(&mut game, Side::SideB);

        let friendly = Allegiance::Friendly;
        assert!(validate_chosen(&game, Side::SideA, friendly, false, Target::Creature(own)).is_ok());
        assert!(validate_chosen(&game, Side::SideA, friendly, false, Target::Creature(enemy)).is_err());
        assert!(validate_chosen(&game, Side::SideA, friendly, true, Target::Hero(Side::SideA)).is_err());
        assert!(validate_chosen(
            &game,
            Side::SideA,
            Allegiance::Any,
            false,
            Target::Creature(CreatureId::new(99))
        )
        .is_err());
    }
}
