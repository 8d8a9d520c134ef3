//! Drawing and summoning

use crate::core::CardType;
use crate::game::handlers::{fizzle, mismatch};
use crate::game::{Effect, EffectKind, Event, GameOverReason, GameState, Resolution};
use crate::zones::Zone;
use crate::Result;

/// Draw from the top of the deck
///
/// An empty deck loses the game for the drawing side. Cards drawn into a
/// full hand are burned.
pub fn handle_draw(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Draw { side, amount } = *effect else {
        return Err(mismatch(EffectKind::Draw, effect));
    };

    let mut events = Vec::new();
    for _ in 0..amount {
        let zones = &mut state.zones[side];
        let Some(card_id) = zones.deck.draw_top() else {
            if state.winner.is_none() {
                events.push(state.declare_winner(side.opponent(), GameOverReason::DeckedOut));
            }
            break;
        };

        if zones.hand.len() >= state.config.hand_limit {
            zones.graveyard.add(card_id);
            events.push(Event::Burn { side, card_id });
        } else {
            zones.hand.add(card_id);
            events.push(Event::Draw { side, card_id });
        }
    }

    Ok(Resolution::success(state, events, Vec::new()))
}

/// Create a creature from the summonable table at the front of the board
pub fn handle_summon(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Summon { side, ref template } = *effect else {
        return Err(mismatch(EffectKind::Summon, effect));
    };

    let Some(card_template) = state.summonable.get(template).cloned() else {
        return Ok(Resolution::rejected(
            "unknown summon",
            format!("{template} is not summonable"),
        ));
    };
    if card_template.card_type != CardType::Creature {
        return Ok(Resolution::rejected(
            "unknown summon",
            format!("{template} is not a creature"),
        ));
    }
    if state.board(side).len() >= state.config.board_limit {
        return Ok(fizzle(side, format!("no room on {side}'s board for {template}")));
    }

    let card_id = state.add_card(side, &card_template, Zone::Board);
    let creature_id = state.spawn_creature(card_id, 0)?;

    let events = vec![Event::Summon {
        side,
        card_id,
        creature_id,
    }];
    Ok(Resolution::success(state, events, Vec::new()))
}
