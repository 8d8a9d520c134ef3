//! Hero powers

use crate::core::{HeroPower, Orientation, Side};
use crate::game::actions::{compile_all, ActionContext};
use crate::game::handlers::{check_action_window, mismatch};
use crate::game::{Effect, EffectKind, Event, GameState, Resolution, Source, Target, Unit};
use crate::Result;

pub fn handle_use_hero_power(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::UseHeroPower { side, target } = *effect else {
        return Err(mismatch(EffectKind::UseHeroPower, effect));
    };

    if let Some(rejection) = check_action_window(&state, side) {
        return Ok(rejection);
    }

    let hero = &state.heroes[side];
    if hero.exhausted {
        return Ok(Resolution::rejected(
            "hero power already used",
            hero.power.name.clone(),
        ));
    }
    let power = hero.power.clone();

    let available = state.mana_available(side);
    if power.cost > available {
        return Ok(Resolution::rejected(
            "not enough energy",
            format!("cost {}, available {available}", power.cost),
        ));
    }

    let chosen = if power.target_self {
        Some(Target::Hero(side))
    } else if power.requires_target() {
        let Some(target) = target else {
            return Ok(Resolution::rejected("invalid target", "a target is required"));
        };
        if let Err(details) = validate_power_target(&state, side, &power, target) {
            return Ok(Resolution::rejected("invalid target", details));
        }
        Some(target)
    } else {
        None
    };

    state.mana_used[side] += power.cost;

    let ctx = ActionContext::new(side, Source::HeroPower(side)).with_chosen(chosen);
    let mut effects = compile_all(power.actions.iter(), &ctx, &state);
    effects.push(Effect::MarkExhausted {
        side,
        unit: Unit::Hero(side),
    });

    let events = vec![Event::UseHeroPower {
        side,
        target: chosen,
    }];
    Ok(Resolution::success(state, events, effects))
}

/// Friendly powers aim at their own side, the rest at the opponent
pub(crate) fn validate_power_target(
    state: &GameState,
    side: Side,
    power: &HeroPower,
    target: Target,
) -> std::result::Result<(), String> {
    let Some(owner) = state.target_owner(target) else {
        return Err(format!("target {target:?} is not in play"));
    };
    match power.orientation() {
        Orientation::Friendly if owner != side => {
            return Err(format!("{} must target your own side", power.name));
        }
        Orientation::Enemy if owner == side => {
            return Err(format!("{} must target the opponent", power.name));
        }
        _ => {}
    }
    if state.is_stealthed_enemy(side, target) {
        return Err("target is stealthed".to_string());
    }
    if matches!(target, Target::Hero(_)) && power.actions.iter().any(|a| a.targets_creatures_only())
    {
        return Err("this power can only target creatures".to_string());
    }
    Ok(())
}
