//! Clearing and removing creatures
//!
//! Both take creatures out of play without killing them, so no
//! `CreatureDeath` is emitted and deathrattles stay silent.

use crate::game::handlers::{fizzle, mismatch};
use crate::game::{Effect, EffectKind, Event, GameState, Resolution};
use crate::Result;

pub fn handle_clear(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Clear { side, scope } = *effect else {
        return Err(mismatch(EffectKind::Clear, effect));
    };

    let mut removed = Vec::new();
    for board_side in scope.sides(side) {
        let ids: Vec<_> = state.board(board_side).iter().collect();
        for id in ids {
            state.destroy_creature(id);
            removed.push(id);
        }
    }

    let events = vec![Event::Clear {
        side,
        scope,
        removed,
    }];
    Ok(Resolution::success(state, events, Vec::new()))
}

pub fn handle_remove(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Remove { side, target } = *effect else {
        return Err(mismatch(EffectKind::Remove, effect));
    };

    let Some(creature) = state.destroy_creature(target) else {
        return Ok(fizzle(side, format!("creature {target} is no longer in play")));
    };

    let events = vec![Event::Remove {
        side: creature.owner,
        creature_id: target,
    }];
    Ok(Resolution::success(state, events, Vec::new()))
}
