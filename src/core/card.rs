//! Cards and the creatures they spawn
//!
//! A `CardInPlay` is the template-shaped copy living in a deck, hand or
//! graveyard. Playing a creature card spawns a separate `Creature` with its
//! own ID, so stat changes on the board never touch the card.

use crate::core::traits::{has_trait, TraitKind, TraitList};
use crate::core::{EntityId, GameEntity, Side};
use serde::{Deserialize, Serialize};

pub type CardId = EntityId<CardInPlay>;
pub type CreatureId = EntityId<Creature>;

/// Card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Creature,
    Spell,
}

/// A physical card instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInPlay {
    pub id: CardId,

    /// Template name (e.g., "Fire Bolt")
    pub template: String,

    pub owner: Side,
    pub card_type: CardType,
    pub cost: u32,

    /// Printed stats (creatures only)
    pub attack: i32,
    pub health: i32,

    pub traits: TraitList,
}

impl CardInPlay {
    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }

    pub fn is_spell(&self) -> bool {
        self.card_type == CardType::Spell
    }

    pub fn has_trait(&self, kind: TraitKind) -> bool {
        has_trait(&self.traits, kind)
    }

    /// Does playing this card need a chosen target?
    pub fn requires_target(&self) -> bool {
        self.traits
            .iter()
            .filter(|t| t.kind == TraitKind::Battlecry)
            .flat_map(|t| t.actions.iter())
            .any(|a| a.requires_target())
    }
}

impl GameEntity<CardInPlay> for CardInPlay {
    fn id(&self) -> CardId {
        self.id
    }

    fn name(&self) -> &str {
        &self.template
    }
}

/// A board-resident combat unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,

    /// Card this creature was spawned from
    pub card_id: CardId,
    pub template: String,
    pub owner: Side,

    pub attack: i32,
    pub attack_max: i32,
    pub health: i32,
    pub health_max: i32,

    pub traits: TraitList,

    /// Has already acted this turn (or just arrived)
    pub exhausted: bool,
}

impl Creature {
    /// Spawn a fresh creature from a card; it arrives exhausted
    pub fn spawn(id: CreatureId, card: &CardInPlay) -> Self {
        Creature {
            id,
            card_id: card.id,
            template: card.template.clone(),
            owner: card.owner,
            attack: card.attack,
            attack_max: card.attack,
            health: card.health,
            health_max: card.health,
            traits: card.traits.clone(),
            exhausted: true,
        }
    }

    pub fn has_trait(&self, kind: TraitKind) -> bool {
        has_trait(&self.traits, kind)
    }

    pub fn is_stealthed(&self) -> bool {
        self.has_trait(TraitKind::Stealth)
    }

    /// Taunt only binds while the creature can actually be targeted
    pub fn is_taunting(&self) -> bool {
        self.has_trait(TraitKind::Taunt) && !self.is_stealthed()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn remove_stealth(&mut self) {
        self.traits.retain(|t| t.kind != TraitKind::Stealth);
    }
}

impl GameEntity<Creature> for Creature {
    fn id(&self) -> CreatureId {
        self.id
    }

    fn name(&self) -> &str {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{Action, ActionKind, ActionTarget, Allegiance, Trait};
    use smallvec::smallvec;

    fn wolf(id: u32) -> CardInPlay {
        CardInPlay {
            id: CardId::new(id),
            template: "Wolf".to_string(),
            owner: Side::SideA,
            card_type: CardType::Creature,
            cost: 2,
            attack: 2,
            health: 3,
            traits: smallvec![Trait::keyword(TraitKind::Stealth), Trait::keyword(TraitKind::Taunt)],
        }
    }

    #[test]
    fn test_spawn_copies_stats() {
        let card = wolf(4);
        let creature = Creature::spawn(CreatureId::new(1), &card);

        assert_eq!(creature.card_id, card.id);
        assert_eq!(creature.attack_max, 2);
        assert_eq!(creature.health_max, 3);
        assert!(creature.exhausted);
        assert_eq!(creature.name(), "Wolf");
    }

    #[test]
    fn test_stealthed_taunt_does_not_bind() {
        let mut creature = Creature::spawn(CreatureId::new(1), &wolf(4));
        assert!(creature.is_stealthed());
        assert!(!creature.is_taunting());

        creature.remove_stealth();
        assert!(!creature.is_stealthed());
        assert!(creature.is_taunting());
    }

    #[test]
    fn test_requires_target_only_for_chosen_battlecry() {
        let mut card = wolf(4);
        assert!(!card.requires_target());

        card.traits.push(Trait::with_actions(
            TraitKind::Battlecry,
            [Action::new(
                ActionKind::Damage { amount: 1 },
                ActionTarget::Chosen(Allegiance::Any),
            )],
        ));
        assert!(card.requires_target());
    }
}
