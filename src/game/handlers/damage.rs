//! Damage, deaths and retaliation

use crate::core::TraitKind;
use crate::game::handlers::{fizzle, mismatch};
use crate::game::{
    DamageType, Effect, EffectKind, Event, GameOverReason, GameState, Resolution, Source, Target,
};
use crate::Result;

pub fn handle_damage(effect: &Effect, mut state: GameState) -> Result<Resolution> {
    let Effect::Damage {
        side,
        damage_type,
        source,
        target,
        amount,
        retaliate,
    } = *effect
    else {
        return Err(mismatch(EffectKind::Damage, effect));
    };

    if amount <= 0 {
        return Ok(fizzle(side, "no damage to deal"));
    }

    let mut events = Vec::new();
    let mut effects = Vec::new();

    match target {
        Target::Hero(hero_side) => {
            let hero = &mut state.heroes[hero_side];
            hero.health -= amount;
            events.push(Event::Damage {
                side,
                source,
                target,
                amount,
                health_after: hero.health,
            });
            if hero.is_destroyed() && state.winner.is_none() {
                let winner = hero_side.opponent();
                events.push(state.declare_winner(winner, GameOverReason::HeroDestroyed));
            }
        }
        Target::Creature(id) => {
            let Some(defender) = state.creatures.find(id) else {
                return Ok(fizzle(side, format!("creature {id} is no longer in play")));
            };
            let mut defender = defender.clone();
            defender.health -= amount;
            events.push(Event::Damage {
                side,
                source,
                target,
                amount,
                health_after: defender.health,
            });

            let died = !defender.is_alive();
            if died {
                state.destroy_creature(id);
                events.push(Event::CreatureDeath {
                    side: defender.owner,
                    creature: Box::new(defender.clone()),
                });
            } else {
                state.creatures.get_mut(id)?.health = defender.health;
            }

            let strikes_back = retaliate
                && damage_type == DamageType::Physical
                && !source.is_spell_like()
                && (!died || state.config.death_retaliation)
                && !defender.has_trait(TraitKind::Ranged)
                && defender.attack > 0;
            let attacker = match source {
                Source::Creature(attacker) => Some(Target::Creature(attacker)),
                Source::Hero(attacker) => Some(Target::Hero(attacker)),
                Source::Card(_) | Source::HeroPower(_) => None,
            };
            if let (true, Some(attacker)) = (strikes_back, attacker) {
                effects.push(Effect::Damage {
                    side: defender.owner,
                    damage_type: DamageType::Physical,
                    source: Source::Creature(id),
                    target: attacker,
                    amount: defender.attack,
                    retaliate: false,
                });
            }
        }
    }

    Ok(Resolution::success(state, events, effects))
}
