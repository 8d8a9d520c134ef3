//! Rule scenarios resolved through the public dispatcher
//!
//! Each test builds a small game by hand, resolves one effect, and checks the
//! outcome the way a client would observe it.

use duel_engine::core::{
    CardType, CreatureId, HeroInPlay, HeroPower, Side, Sided, Trait, TraitKind,
};
use duel_engine::game::{
    ClearScope, DamageType, Dispatcher, Effect, Event, GameOverReason, GameState, Phase,
    Resolution, RuleConfig, Source, Target,
};
use duel_engine::loader::CardTemplate;
use duel_engine::zones::Zone;
use similar_asserts::assert_eq;
use smallvec::SmallVec;

fn rest() -> HeroPower {
    HeroPower {
        name: "Rest".to_string(),
        cost: 0,
        actions: SmallVec::new(),
        target_self: true,
    }
}

/// Turn one, side A's main phase, both pools at `mana`
fn game(mana: u32) -> GameState {
    let heroes = Sided::from_fn(|side| HeroInPlay::new(side, "Hero", 30, rest()));
    let mut game = GameState::new(heroes, RuleConfig::default());
    game.turn = 1;
    game.phase = Phase::Main;
    game.mana_pool = Sided::new(mana, mana);
    game
}

fn template(name: &str, cost: u32, attack: i32, health: i32, traits: &[TraitKind]) -> CardTemplate {
    CardTemplate {
        name: name.to_string(),
        card_type: CardType::Creature,
        cost,
        attack,
        health,
        traits: traits.iter().map(|&kind| Trait::keyword(kind)).collect(),
    }
}

fn summon(game: &mut GameState, side: Side, card: &CardTemplate) -> CreatureId {
    let card_id = game.add_card(side, card, Zone::Board);
    let id = game.spawn_creature(card_id, game.board(side).len()).unwrap();
    game.creatures.get_mut(id).unwrap().exhausted = false;
    id
}

fn success(resolution: Resolution) -> (GameState, Vec<Event>, Vec<Effect>) {
    match resolution {
        Resolution::Success {
            state,
            events,
            effects,
        } => (*state, events, effects),
        other => panic!("expected success, got {other:?}"),
    }
}

fn attack(attacker: CreatureId, target: Target) -> Effect {
    Effect::Attack {
        side: Side::SideA,
        attacker,
        target,
    }
}

#[test]
fn test_empty_deck_draw_ends_game() {
    let dispatcher = Dispatcher::standard();
    let state = game(0);
    assert!(state.deck(Side::SideA).is_empty());

    let (state, events, _) = success(dispatcher.resolve(
        &Effect::Draw {
            side: Side::SideA,
            amount: 1,
        },
        &state,
    ));

    assert_eq!(
        events,
        vec![Event::GameOver {
            winner: Side::SideB,
            reason: GameOverReason::DeckedOut
        }]
    );
    assert_eq!(state.winner, Some(Side::SideB));
}

#[test]
fn test_mutual_combat() {
    let dispatcher = Dispatcher::standard();
    let mut state = game(0);
    let attacker = summon(&mut state, Side::SideA, &template("Pup", 1, 1, 1, &[]));
    let defender = summon(&mut state, Side::SideB, &template("Ox", 4, 2, 10, &[]));

    let blow = Effect::Damage {
        side: Side::SideA,
        damage_type: DamageType::Physical,
        source: Source::Creature(attacker),
        target: Target::Creature(defender),
        amount: 1,
        retaliate: true,
    };
    let (state, _, children) = success(dispatcher.resolve(&blow, &state));
    assert_eq!(state.creatures.get(defender).unwrap().health, 9);

    let retaliation = Effect::Damage {
        side: Side::SideB,
        damage_type: DamageType::Physical,
        source: Source::Creature(defender),
        target: Target::Creature(attacker),
        amount: 2,
        retaliate: false,
    };
    assert_eq!(children, vec![retaliation.clone()]);

    let (state, events, children) = success(dispatcher.resolve(&retaliation, &state));
    assert!(children.is_empty());
    assert!(!state.board(Side::SideA).contains(attacker));
    assert!(matches!(
        &events[..],
        [
            Event::Damage { health_after: -1, .. },
            Event::CreatureDeath { creature, .. }
        ] if creature.id == attacker
    ));
}

#[test]
fn test_play_without_energy_is_rejected() {
    let dispatcher = Dispatcher::standard();
    let mut state = game(1);
    let card = state.add_card(Side::SideA, &template("Ogre", 3, 3, 3, &[]), Zone::Hand);

    let resolution = dispatcher.resolve(
        &Effect::Play {
            side: Side::SideA,
            card_id: card,
            position: 0,
            target: None,
        },
        &state,
    );
    let Resolution::Rejected { reason, .. } = resolution else {
        panic!("expected rejection");
    };
    assert!(reason.contains("energy"));
    assert!(state.hand(Side::SideA).contains(card));
}

#[test]
fn test_taunt_forces_targeting() {
    let dispatcher = Dispatcher::standard();
    let mut state = game(0);
    let attacker = summon(&mut state, Side::SideA, &template("Bear", 2, 2, 2, &[]));
    let plain = summon(&mut state, Side::SideB, &template("Bear", 2, 2, 2, &[]));
    let guard = summon(
        &mut state,
        Side::SideB,
        &template("Guard", 2, 1, 4, &[TraitKind::Taunt]),
    );

    for target in [Target::Hero(Side::SideB), Target::Creature(plain)] {
        assert!(dispatcher.resolve(&attack(attacker, target), &state).is_rejected());
    }
    assert!(dispatcher
        .resolve(&attack(attacker, Target::Creature(guard)), &state)
        .is_success());
}

#[test]
fn test_stealth_hides_until_it_attacks() {
    let dispatcher = Dispatcher::standard();
    let mut state = game(0);
    let attacker = summon(&mut state, Side::SideA, &template("Bear", 2, 2, 2, &[]));
    let prowler = summon(
        &mut state,
        Side::SideB,
        &template("Prowler", 2, 2, 2, &[TraitKind::Stealth]),
    );

    assert!(dispatcher
        .resolve(&attack(attacker, Target::Creature(prowler)), &state)
        .is_rejected());

    // Side B's turn: the prowler attacks and loses stealth
    state.active = Side::SideB;
    let (state, _, _) = success(dispatcher.resolve(
        &Effect::Attack {
            side: Side::SideB,
            attacker: prowler,
            target: Target::Hero(Side::SideA),
        },
        &state,
    ));
    assert!(!state.creatures.get(prowler).unwrap().is_stealthed());
}

#[test]
fn test_clear_and_remove_skip_death_events() {
    let dispatcher = Dispatcher::standard();
    let mut state = game(0);
    let ours = summon(&mut state, Side::SideA, &template("Bear", 2, 2, 2, &[]));
    summon(&mut state, Side::SideB, &template("Bear", 2, 2, 2, &[]));
    summon(&mut state, Side::SideB, &template("Bear", 2, 2, 2, &[]));

    let (cleared, events, _) = success(dispatcher.resolve(
        &Effect::Clear {
            side: Side::SideA,
            scope: ClearScope::Opponent,
        },
        &state,
    ));
    assert!(cleared.board(Side::SideB).is_empty());
    assert_eq!(cleared.board(Side::SideA).len(), 1);
    assert!(!events.iter().any(|e| matches!(e, Event::CreatureDeath { .. })));

    let (removed, events, _) = success(dispatcher.resolve(
        &Effect::Remove {
            side: Side::SideB,
            target: ours,
        },
        &state,
    ));
    assert!(removed.board(Side::SideA).is_empty());
    assert!(!events.iter().any(|e| matches!(e, Event::CreatureDeath { .. })));
}

#[test]
fn test_ranged_defender_does_not_strike_back() {
    let dispatcher = Dispatcher::standard();
    let mut state = game(0);
    let attacker = summon(&mut state, Side::SideA, &template("Bear", 2, 2, 2, &[]));
    let archer = summon(
        &mut state,
        Side::SideB,
        &template("Archer", 2, 2, 5, &[TraitKind::Ranged]),
    );

    let (_, _, children) = success(dispatcher.resolve(
        &Effect::Damage {
            side: Side::SideA,
            damage_type: DamageType::Physical,
            source: Source::Creature(attacker),
            target: Target::Creature(archer),
            amount: 2,
            retaliate: true,
        },
        &state,
    ));
    assert!(children.is_empty());
}
