//! AI move chooser
//!
//! A pure function from a game state and a strategy to the next effect the
//! AI wants to issue. Priority order:
//!
//! 1. Use the hero power when it's ready, affordable and has a target
//! 2. Play an affordable spell, targeted spells first
//! 3. Play an affordable creature
//! 4. Attack, honouring taunt first and the strategy otherwise
//!
//! `None` means nothing is left to do and the turn should end. Coin flips
//! come from a `ChaCha12Rng` seeded from the state, so the same state
//! always gets the same answer.

use crate::core::{CardInPlay, Side, TraitKind};
use crate::game::controller::GameStateView;
use crate::game::{Effect, GameState, Target};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the AI picks attack targets once taunt is out of the way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Always go for the hero
    Rush,
    /// Trade with enemy creatures
    Control,
    /// Coin flip between the two
    #[default]
    Balanced,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Rush => "rush",
            Strategy::Control => "control",
            Strategy::Balanced => "balanced",
        };
        f.write_str(name)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rush" => Ok(Strategy::Rush),
            "control" => Ok(Strategy::Control),
            "balanced" => Ok(Strategy::Balanced),
            _ => Err(format!(
                "invalid strategy '{s}' (expected: rush, control, balanced)"
            )),
        }
    }
}

/// Pick the next effect for `side`, or `None` to end the turn
pub fn choose_move(state: &GameState, side: Side, strategy: Strategy) -> Option<Effect> {
    let view = GameStateView::new(state, side);
    hero_power_move(&view)
        .or_else(|| spell_move(&view))
        .or_else(|| creature_move(&view))
        .or_else(|| attack_move(&view, strategy))
}

fn hero_power_move(view: &GameStateView) -> Option<Effect> {
    let hero = view.hero();
    if hero.exhausted || hero.power.cost > view.mana_available() {
        return None;
    }
    let target = if hero.power.requires_target() {
        Some(view.target_for_power()?)
    } else {
        None
    };
    Some(Effect::UseHeroPower {
        side: view.side(),
        target,
    })
}

fn battlecry_target(view: &GameStateView, card: &CardInPlay) -> Option<Target> {
    let actions = card
        .traits
        .iter()
        .filter(|t| t.kind == TraitKind::Battlecry)
        .flat_map(|t| t.actions.iter());
    view.target_for_actions(actions)
}

fn play(view: &GameStateView, card: &CardInPlay, target: Option<Target>) -> Effect {
    Effect::Play {
        side: view.side(),
        card_id: card.id,
        position: view.game().board(view.side()).len(),
        target,
    }
}

fn spell_move(view: &GameStateView) -> Option<Effect> {
    let spells: Vec<_> = view
        .affordable()
        .into_iter()
        .filter(|card| card.is_spell())
        .collect();

    let targeted = spells.iter().filter(|card| card.requires_target()).find_map(|card| {
        battlecry_target(view, card).map(|target| play(view, card, Some(target)))
    });
    targeted.or_else(|| {
        spells
            .iter()
            .find(|card| !card.requires_target())
            .map(|card| play(view, card, None))
    })
}

fn creature_move(view: &GameStateView) -> Option<Effect> {
    if view.board_is_full() {
        return None;
    }
    view.affordable()
        .into_iter()
        .filter(|card| card.is_creature())
        .filter(|card| !(card.has_trait(TraitKind::Unique) && view.has_on_board(&card.template)))
        .find_map(|card| {
            if card.requires_target() {
                battlecry_target(view, card).map(|target| play(view, card, Some(target)))
            } else {
                Some(play(view, card, None))
            }
        })
}

fn attack_move(view: &GameStateView, strategy: Strategy) -> Option<Effect> {
    let attacker = *view.ready_attackers().first()?;
    let mut rng = rng_for(view.game());

    let taunts = view.enemy_taunts();
    let target = if let Some(&taunt) = taunts.choose(&mut rng) {
        Target::Creature(taunt)
    } else {
        let enemy_hero = Target::Hero(view.opponent());
        let go_face = match strategy {
            Strategy::Rush => true,
            Strategy::Control => false,
            Strategy::Balanced => rng.gen_bool(0.5),
        };
        if go_face {
            enemy_hero
        } else {
            view.visible_enemies()
                .choose(&mut rng)
                .map(|&id| Target::Creature(id))
                .unwrap_or(enemy_hero)
        }
    };

    Some(Effect::Attack {
        side: view.side(),
        attacker,
        target,
    })
}

/// Deterministic generator for this exact point in the game
fn rng_for(state: &GameState) -> ChaCha12Rng {
    let mixed = state.seed
        ^ (u64::from(state.turn) << 32)
        ^ (u64::from(state.mana_used[state.active]) << 16)
        ^ (state.board(Side::SideA).len() as u64) << 8
        ^ state.board(Side::SideB).len() as u64;
    ChaCha12Rng::seed_from_u64(mixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, ActionKind, ActionTarget, Allegiance, CardType, Trait};
    use crate::game::handlers::tests::{bear, main_phase_game, put_on_board};
    use crate::game::state::tests::creature_template;
    use crate::loader::CardTemplate;
    use crate::zones::Zone;
    use smallvec::smallvec;

    fn bolt() -> CardTemplate {
        CardTemplate {
            name: "Bolt".to_string(),
            card_type: CardType::Spell,
            cost: 1,
            attack: 0,
            health: 0,
            traits: smallvec![Trait::with_actions(
                TraitKind::Battlecry,
                [Action::new(
                    ActionKind::Damage { amount: 2 },
                    ActionTarget::Chosen(Allegiance::Enemy)
                )]
            )],
        }
    }

    /// Side A in main phase with its (free, untargeted) power already used
    fn quiet_game(mana: u32) -> GameState {
        let mut game = main_phase_game(mana);
        game.heroes[Side::SideA].exhausted = true;
        game
    }

    #[test]
    fn test_nothing_to_do() {
        let game = quiet_game(0);
        assert_eq!(choose_move(&game, Side::SideA, Strategy::Rush), None);
    }

    #[test]
    fn test_hero_power_first() {
        let game = main_phase_game(0);
        assert_eq!(
            choose_move(&game, Side::SideA, Strategy::Rush),
            Some(Effect::UseHeroPower {
                side: Side::SideA,
                target: None
            })
        );
    }

    #[test]
    fn test_spell_before_creature() {
        let mut game = quiet_game(3);
        game.add_card(Side::SideA, &creature_template("Imp", 1, 1), Zone::Hand);
        let spell = game.add_card(Side::SideA, &bolt(), Zone::Hand);

        let Some(Effect::Play {
            card_id, target, ..
        }) = choose_move(&game, Side::SideA, Strategy::Rush)
        else {
            panic!("expected a play");
        };
        assert_eq!(card_id, spell);
        assert_eq!(target, Some(Target::Hero(Side::SideB)));
    }

    #[test]
    fn test_creature_when_no_spell() {
        let mut game = quiet_game(1);
        let imp = game.add_card(Side::SideA, &creature_template("Imp", 1, 1), Zone::Hand);
        assert!(matches!(
            choose_move(&game, Side::SideA, Strategy::Rush),
            Some(Effect::Play { card_id, target: None, .. }) if card_id == imp
        ));
    }

    #[test]
    fn test_attack_respects_taunt() {
        let mut game = quiet_game(0);
        bear(&mut game, Side::SideA);
        bear(&mut game, Side::SideB);
        let mut guard = creature_template("Guard", 0, 5);
        guard.traits.push(Trait::keyword(TraitKind::Taunt));
        let taunt = put_on_board(&mut game, Side::SideB, &guard);

        for strategy in [Strategy::Rush, Strategy::Control, Strategy::Balanced] {
            assert!(matches!(
                choose_move(&game, Side::SideA, strategy),
                Some(Effect::Attack { target: Target::Creature(id), .. }) if id == taunt
            ));
        }
    }

    #[test]
    fn test_rush_goes_face_and_control_trades() {
        let mut game = quiet_game(0);
        bear(&mut game, Side::SideA);
        let enemy = bear(&mut game, Side::SideB);

        assert!(matches!(
            choose_move(&game, Side::SideA, Strategy::Rush),
            Some(Effect::Attack { target: Target::Hero(Side::SideB), .. })
        ));
        assert!(matches!(
            choose_move(&game, Side::SideA, Strategy::Control),
            Some(Effect::Attack { target: Target::Creature(id), .. }) if id == enemy
        ));
    }

    #[test]
    fn test_choice_is_deterministic() {
        let mut game = quiet_game(0);
        bear(&mut game, Side::SideA);
        bear(&mut game, Side::SideB);
        bear(&mut game, Side::SideB);
        let first = choose_move(&game, Side::SideA, Strategy::Balanced);
        let second = choose_move(&game, Side::SideA, Strategy::Balanced);
        assert_eq!(first, second);
    }

    #[test]
    fn test_balanced_flips_between_face_and_trade() {
        let mut game = quiet_game(0);
        bear(&mut game, Side::SideA);
        bear(&mut game, Side::SideB);

        let (mut face, mut trade) = (0, 0);
        for seed in 0..200 {
            game.seed = seed;
            match choose_move(&game, Side::SideA, Strategy::Balanced) {
                Some(Effect::Attack {
                    target: Target::Hero(Side::SideB),
                    ..
                }) => face += 1,
                Some(Effect::Attack {
                    target: Target::Creature(_),
                    ..
                }) => trade += 1,
                other => panic!("expected an attack, got {other:?}"),
            }
        }
        assert!(face > 0, "never went face");
        assert!(trade > 0, "never traded");
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Rush".parse::<Strategy>().unwrap(), Strategy::Rush);
        assert!("zerg".parse::<Strategy>().is_err());
    }
}
