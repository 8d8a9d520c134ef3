//! Declaring attacks
//!
//! An attack only validates and exhausts; the blow itself is a physical
//! `Damage` child effect so retaliation and deaths follow the damage rules.

use crate::game::handlers::{check_action_window, mismatch};
use crate::game::{
    DamageType, Effect, EffectKind, Event, GameState, Resolution, Source, Target, Unit,
};
use crate::Result;

pub fn handle_attack(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Attack {
        side,
        attacker,
        target,
    } = *effect
    else {
        return Err(mismatch(EffectKind::Attack, effect));
    };

    if let Some(rejection) = check_action_window(&state, side) {
        return Ok(rejection);
    }

    let Some(creature) = state
        .creatures
        .find(attacker)
        .filter(|c| c.owner == side && state.board(side).contains(attacker))
    else {
        return Ok(Resolution::rejected(
            "invalid attacker",
            format!("creature {attacker} is not on your board"),
        ));
    };
    if creature.exhausted {
        return Ok(Resolution::rejected("attacker is exhausted", creature.template.clone()));
    }
    if creature.attack <= 0 {
        return Ok(Resolution::rejected("attacker has no attack", creature.template.clone()));
    }
    let amount = creature.attack;

    let opponent = side.opponent();
    let on_enemy_side = match target {
        Target::Hero(s) => s == opponent,
        Target::Creature(id) => state.board(opponent).contains(id),
    };
    if !on_enemy_side {
        return Ok(Resolution::rejected(
            "invalid target",
            format!("{target:?} is not an enemy in play"),
        ));
    }
    if state.is_stealthed_enemy(side, target) {
        return Ok(Resolution::rejected("invalid target", "target is stealthed"));
    }

    let taunts = state.taunts(opponent);
    if !taunts.is_empty() && !matches!(target, Target::Creature(id) if taunts.contains(&id)) {
        return Ok(Resolution::rejected(
            "must attack a taunt creature",
            format!("{} taunt creature(s) guard {opponent}", taunts.len()),
        ));
    }

    state.creatures.get_mut(attacker)?.remove_stealth();

    let events = vec![Event::Attack {
        side,
        attacker,
        target,
    }];
    let effects = vec![
        Effect::MarkExhausted {
            side,
            unit: Unit::Creature(attacker),
        },
        Effect::Damage {
            side,
            damage_type: DamageType::Physical,
            source: Source::Creature(attacker),
            target,
            amount,
            retaliate: true,
        },
    ];
    Ok(Resolution::success(state, events, effects))
}
