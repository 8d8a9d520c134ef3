//! Built-in starter templates
//!
//! A small, balanced set used by the CLI when no library file is given and
//! by tests that want realistic cards.

use crate::core::{
    Action, ActionKind, ActionTarget, Allegiance, Attribute, CardType, HeroPower, Trait,
    TraitKind,
};
use crate::loader::{CardTemplate, DeckList, HeroTemplate, TemplateLibrary};
use smallvec::{smallvec, SmallVec};

fn creature(name: &str, cost: u32, attack: i32, health: i32, traits: Vec<Trait>) -> CardTemplate {
    CardTemplate {
        name: name.to_string(),
        card_type: CardType::Creature,
        cost,
        attack,
        health,
        traits: traits.into_iter().collect(),
    }
}

fn spell(name: &str, cost: u32, actions: Vec<Action>) -> CardTemplate {
    CardTemplate {
        name: name.to_string(),
        card_type: CardType::Spell,
        cost,
        attack: 0,
        health: 0,
        traits: smallvec![Trait::with_actions(TraitKind::Battlecry, actions)],
    }
}

fn keyword(kind: TraitKind) -> Trait {
    Trait::keyword(kind)
}

pub fn starter_library() -> TemplateLibrary {
    let mut library = TemplateLibrary::new();

    for card in [
        creature("Squire", 1, 1, 2, vec![]),
        creature("Whelp", 1, 1, 1, vec![]),
        creature("Shieldbearer", 2, 1, 4, vec![keyword(TraitKind::Taunt)]),
        creature("Raider", 2, 3, 1, vec![keyword(TraitKind::Charge)]),
        creature("Prowler", 2, 2, 2, vec![keyword(TraitKind::Stealth)]),
        creature("Archer", 2, 2, 2, vec![keyword(TraitKind::Ranged)]),
        creature(
            "Scholar",
            3,
            2,
            3,
            vec![Trait::with_actions(
                TraitKind::Battlecry,
                [Action::new(ActionKind::Draw { amount: 1 }, ActionTarget::OwnSide)],
            )],
        ),
        creature(
            "Marksman",
            3,
            3,
            2,
            vec![Trait::with_actions(
                TraitKind::Battlecry,
                [Action::new(
                    ActionKind::Damage { amount: 1 },
                    ActionTarget::Chosen(Allegiance::Enemy),
                )],
            )],
        ),
        creature(
            "Bomber",
            3,
            2,
            2,
            vec![Trait::with_actions(
                TraitKind::Deathrattle,
                [Action::new(ActionKind::Damage { amount: 2 }, ActionTarget::EnemyHero)],
            )],
        ),
        creature(
            "Broodmother",
            4,
            3,
            3,
            vec![Trait::with_actions(
                TraitKind::Deathrattle,
                [Action::new(
                    ActionKind::Summon {
                        template: "Whelp".to_string(),
                    },
                    ActionTarget::OwnSide,
                )],
            )],
        ),
        creature(
            "Warlord",
            5,
            5,
            5,
            vec![keyword(TraitKind::Unique), keyword(TraitKind::Taunt)],
        ),
        spell(
            "Fire Bolt",
            2,
            vec![Action::new(
                ActionKind::Damage { amount: 3 },
                ActionTarget::Chosen(Allegiance::Enemy),
            )],
        ),
        spell(
            "Mending Light",
            1,
            vec![Action::new(
                ActionKind::Heal { amount: 4 },
                ActionTarget::Chosen(Allegiance::Friendly),
            )],
        ),
        spell(
            "Battle Hymn",
            2,
            vec![Action::new(
                ActionKind::Buff {
                    attribute: Attribute::Attack,
                    amount: 2,
                },
                ActionTarget::Chosen(Allegiance::Friendly),
            )],
        ),
        spell(
            "Insight",
            2,
            vec![Action::new(ActionKind::Draw { amount: 2 }, ActionTarget::OwnSide)],
        ),
        spell(
            "Surge",
            0,
            vec![Action::new(
                ActionKind::TempManaBoost { amount: 2 },
                ActionTarget::OwnSide,
            )],
        ),
        spell(
            "Banish",
            4,
            vec![Action::new(ActionKind::Remove, ActionTarget::Chosen(Allegiance::Enemy))],
        ),
        spell(
            "Cataclysm",
            6,
            vec![Action::new(ActionKind::Clear, ActionTarget::BothSides)],
        ),
    ] {
        library.add_card(card);
    }

    library.add_hero(HeroTemplate {
        name: "Pyromancer".to_string(),
        health: None,
        power: HeroPower {
            name: "Ember".to_string(),
            cost: 2,
            actions: smallvec![Action::new(
                ActionKind::Damage { amount: 1 },
                ActionTarget::Chosen(Allegiance::Enemy),
            )],
            target_self: false,
        },
    });
    library.add_hero(HeroTemplate {
        name: "Cleric".to_string(),
        health: None,
        power: HeroPower {
            name: "Renew".to_string(),
            cost: 2,
            actions: smallvec![Action::new(
                ActionKind::Heal { amount: 2 },
                ActionTarget::Chosen(Allegiance::Friendly),
            )],
            target_self: false,
        },
    });
    library.add_hero(HeroTemplate {
        name: "Warden".to_string(),
        health: None,
        power: HeroPower {
            name: "Bulwark".to_string(),
            cost: 2,
            actions: SmallVec::from_vec(vec![Action::new(
                ActionKind::Heal { amount: 2 },
                ActionTarget::OwnHero,
            )]),
            target_self: true,
        },
    });

    library.summonable = vec!["Whelp".to_string(), "Squire".to_string()];
    library
}

/// A 20-card starter deck for the given hero
pub fn starter_deck(hero: &str) -> DeckList {
    let cards = [
        ("Squire", 2),
        ("Shieldbearer", 2),
        ("Raider", 2),
        ("Prowler", 1),
        ("Archer", 2),
        ("Scholar", 1),
        ("Marksman", 2),
        ("Bomber", 1),
        ("Broodmother", 1),
        ("Warlord", 1),
        ("Fire Bolt", 2),
        ("Mending Light", 1),
        ("Battle Hymn", 1),
        ("Insight", 1),
    ];
    DeckList {
        hero: hero.to_string(),
        cards: cards
            .iter()
            .flat_map(|(name, copies)| std::iter::repeat(name.to_string()).take(*copies))
            .collect(),
    }
}
