//! Healing and buffs

use crate::core::Attribute;
use crate::game::handlers::{fizzle, mismatch};
use crate::game::{Effect, EffectKind, Event, GameState, Resolution, Target};
use crate::Result;

/// Heal a hero or creature, clamped at its max health
pub fn handle_heal(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Heal {
        side,
        target,
        amount,
        ..
    } = *effect
    else {
        return Err(mismatch(EffectKind::Heal, effect));
    };

    let (health, health_max) = match target {
        Target::Hero(hero_side) => {
            let hero = &mut state.heroes[hero_side];
            (&mut hero.health, hero.health_max)
        }
        Target::Creature(id) => {
            if !state.creatures.contains(id) {
                return Ok(fizzle(side, format!("creature {id} is no longer in play")));
            }
            let creature = state.creatures.get_mut(id)?;
            (&mut creature.health, creature.health_max)
        }
    };

    let healed = amount.max(0).min((health_max - *health).max(0));
    *health += healed;
    let health_after = *health;

    let events = vec![Event::Heal {
        side,
        target,
        amount: healed,
        health_after,
    }];
    Ok(Resolution::success(state, events, Vec::new()))
}

/// Permanently raise a creature's attack or health, max included
pub fn handle_buff(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Buff {
        side,
        target,
        attribute,
        amount,
        ..
    } = *effect
    else {
        return Err(mismatch(EffectKind::Buff, effect));
    };

    let Target::Creature(id) = target else {
        return Ok(Resolution::rejected(
            "invalid target",
            "buffs can only target creatures",
        ));
    };
    if !state.creatures.contains(id) {
        return Ok(fizzle(side, format!("creature {id} is no longer in play")));
    }

    let creature = state.creatures.get_mut(id)?;
    match attribute {
        Attribute::Attack => {
            creature.attack += amount;
            creature.attack_max += amount;
        }
        Attribute::Health => {
            creature.health += amount;
            creature.health_max += amount;
        }
    }

    let events = vec![Event::Buff {
        side,
        creature_id: id,
        attribute,
        amount,
    }];
    Ok(Resolution::success(state, events, Vec::new()))
}
