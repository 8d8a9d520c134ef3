//! Playing a card from hand

use crate::core::TraitKind;
use crate::game::handlers::{check_action_window, mismatch, validate_actions_target};
use crate::game::{Effect, EffectKind, Event, GameState, Resolution};
use crate::Result;

pub fn handle_play(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Play {
        side,
        card_id,
        position,
        target,
    } = *effect
    else {
        return Err(mismatch(EffectKind::Play, effect));
    };

    if let Some(rejection) = check_action_window(&state, side) {
        return Ok(rejection);
    }

    let Some(card) = state.cards.find(card_id) else {
        return Ok(Resolution::rejected("unknown card", format!("card {card_id} does not exist")));
    };
    if card.owner != side || !state.hand(side).contains(card_id) {
        return Ok(Resolution::rejected("card not in hand", format!("card {card_id}")));
    }

    let available = state.mana_available(side);
    if card.cost > available {
        return Ok(Resolution::rejected(
            "not enough energy",
            format!("cost {}, available {available}", card.cost),
        ));
    }

    let battlecry_actions = card
        .traits
        .iter()
        .filter(|t| t.kind == TraitKind::Battlecry)
        .flat_map(|t| t.actions.iter());
    if let Err(details) = validate_actions_target(&state, side, battlecry_actions, target) {
        return Ok(Resolution::rejected("invalid target", details));
    }
    // A target only matters when an action asks for one
    let target = if card.requires_target() { target } else { None };

    if card.is_creature() {
        let board = state.board(side);
        if board.len() >= state.config.board_limit {
            return Ok(Resolution::rejected(
                "board is full",
                format!("{} creatures already in play", board.len()),
            ));
        }
        if card.has_trait(TraitKind::Unique) {
            let duplicate = board.iter().any(|id| {
                state
                    .creatures
                    .find(id)
                    .is_some_and(|c| c.template == card.template)
            });
            if duplicate {
                return Ok(Resolution::rejected(
                    "unique creature already in play",
                    card.template.clone(),
                ));
            }
        }
    }

    let cost = card.cost;
    let is_creature = card.is_creature();
    let template = card.template.clone();

    state.zones[side].hand.remove(card_id);
    state.mana_used[side] += cost;
    let creature_id = if is_creature {
        Some(state.spawn_creature(card_id, position)?)
    } else {
        state.zones[side].graveyard.add(card_id);
        None
    };

    let events = vec![Event::Play {
        side,
        card_id,
        template,
        creature_id,
        target,
    }];
    Ok(Resolution::success(state, events, Vec::new()))
}
