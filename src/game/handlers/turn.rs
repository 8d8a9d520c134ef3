//! Turn structure: game start, phases, turn end, concession
//!
//! Also home to the small bookkeeping effects (exhaustion, temporary mana)
//! that other handlers emit as children.

use crate::game::handlers::{fizzle, mismatch};
use crate::game::{
    Effect, EffectKind, Event, GameOverReason, GameState, Phase, Resolution, Unit,
};
use crate::{DuelError, Result};

/// Deal opening hands, then start the issuer's first turn
pub fn handle_start_game(effect: &Effect, state: GameState) -> Result<Resolution> {
    let Effect::StartGame { side } = *effect else {
        return Err(mismatch(EffectKind::StartGame, effect));
    };

    if state.has_started() {
        return Ok(Resolution::rejected(
            "game already started",
            format!("turn {}", state.turn),
        ));
    }

    let hand_size = state.config.hand_start_size;
    let effects = vec![
        Effect::Draw {
            side,
            amount: hand_size,
        },
        Effect::Draw {
            side: side.opponent(),
            amount: hand_size,
        },
        Effect::NewPhase {
            side,
            phase: Phase::Start,
        },
    ];
    Ok(Resolution::success(state, Vec::new(), effects))
}

/// Ready the ending side's units and pass the turn
pub fn handle_end_turn(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::EndTurn { side } = *effect else {
        return Err(mismatch(EffectKind::EndTurn, effect));
    };

    if state.active != side {
        let err = DuelError::NotYourTurn {
            issuer: side,
            active: state.active,
        };
        return Ok(Resolution::rejected("not your turn", err.to_string()));
    }

    let board: Vec<_> = state.board(side).iter().collect();
    for id in board {
        state.creatures.get_mut(id)?.exhausted = false;
    }
    state.heroes[side].exhausted = false;

    let next = side.opponent();
    state.active = next;

    let events = vec![Event::EndTurn { side }];
    let effects = vec![Effect::NewPhase {
        side: next,
        phase: Phase::Start,
    }];
    Ok(Resolution::success(state, events, effects))
}

/// Walk the phase machine: start, refresh, draw, main
pub fn handle_new_phase(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::NewPhase { side, phase } = *effect else {
        return Err(mismatch(EffectKind::NewPhase, effect));
    };

    let mut effects = Vec::new();
    match phase {
        Phase::Start => {
            state.active = side;
            state.turn += 1;
        }
        Phase::Refresh => {
            state.mana_pool[side] = state.turn.min(state.config.max_mana);
            state.mana_used[side] = 0;
        }
        Phase::Draw => effects.push(Effect::Draw { side, amount: 1 }),
        Phase::Main => {}
    }
    state.phase = phase;
    if let Some(next) = phase.next() {
        effects.push(Effect::NewPhase { side, phase: next });
    }

    let events = vec![Event::NewPhase {
        side,
        phase,
        turn: state.turn,
    }];
    Ok(Resolution::success(state, events, effects))
}

/// Either side may concede at any time
pub fn handle_concede(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Concede { side } = *effect else {
        return Err(mismatch(EffectKind::Concede, effect));
    };

    if state.is_game_over() {
        return Ok(Resolution::rejected("game is over", ""));
    }

    let events = vec![state.declare_winner(side.opponent(), GameOverReason::Conceded)];
    Ok(Resolution::success(state, events, Vec::new()))
}

pub fn handle_mark_exhausted(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::MarkExhausted { side, unit } = *effect else {
        return Err(mismatch(EffectKind::MarkExhausted, effect));
    };

    match unit {
        Unit::Hero(hero_side) => state.heroes[hero_side].exhausted = true,
        Unit::Creature(id) => {
            if !state.creatures.contains(id) {
                return Ok(fizzle(side, format!("creature {id} is no longer in play")));
            }
            state.creatures.get_mut(id)?.exhausted = true;
        }
    }
    Ok(Resolution::success(state, Vec::new(), Vec::new()))
}

/// Extra mana for the current turn; the next refresh resets it
pub fn handle_temp_mana_boost(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::TempManaBoost { side, amount } = *effect else {
        return Err(mismatch(EffectKind::TempManaBoost, effect));
    };

    state.mana_pool[side] += amount;
    let events = vec![Event::TempManaBoost {
        side,
        amount,
        mana_pool: state.mana_pool[side],
    }];
    Ok(Resolution::success(state, events, Vec::new()))
}
