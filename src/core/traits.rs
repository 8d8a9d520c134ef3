//! Card traits and their declarative actions
//!
//! A trait is a keyword attached to a card or creature. Passive keywords
//! (taunt, stealth, ranged, unique) only change how rules treat the holder;
//! triggered keywords (battlecry, deathrattle) carry a list of actions that
//! the trigger engine compiles into effects.

use crate::core::Side;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Keyword carried by a trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    /// Can attack the turn it enters play
    Charge,
    /// Runs its actions when the card is played
    Battlecry,
    /// Runs its actions when the creature dies from damage
    Deathrattle,
    /// Enemy attacks must target a taunt creature
    Taunt,
    /// Can't be targeted by the enemy until it attacks
    Stealth,
    /// Doesn't strike back when attacked
    Ranged,
    /// Only one copy may be on its owner's board
    Unique,
}

/// Friend/foe filter for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allegiance {
    Friendly,
    Enemy,
    Any,
}

impl Allegiance {
    /// Does a unit controlled by `owner` satisfy this filter for `controller`?
    pub fn admits(self, controller: Side, owner: Side) -> bool {
        match self {
            Allegiance::Friendly => controller == owner,
            Allegiance::Enemy => controller != owner,
            Allegiance::Any => true,
        }
    }
}

/// Creature statistic raised by a buff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Attack,
    Health,
}

/// What an action does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    Draw { amount: u32 },
    Damage { amount: i32 },
    Heal { amount: i32 },
    Buff { attribute: Attribute, amount: i32 },
    Summon { template: String },
    Clear,
    Remove,
    TempManaBoost { amount: u32 },
}

/// Whom an action applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "allegiance", rename_all = "snake_case")]
pub enum ActionTarget {
    /// A single target picked by the player
    Chosen(Allegiance),
    /// The creature holding the trait
    This,
    OwnHero,
    EnemyHero,
    AllCreatures(Allegiance),
    OwnSide,
    EnemySide,
    BothSides,
}

/// A declarative action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub target: ActionTarget,
}

impl Action {
    pub fn new(kind: ActionKind, target: ActionTarget) -> Self {
        Action { kind, target }
    }

    /// Single-scope actions need a target picked by the player
    pub fn requires_target(&self) -> bool {
        matches!(self.target, ActionTarget::Chosen(_))
    }

    /// Heals and buffs help their target
    pub fn is_beneficial(&self) -> bool {
        matches!(self.kind, ActionKind::Heal { .. } | ActionKind::Buff { .. })
    }

    /// Buffs and removals can't aim at a hero
    pub fn targets_creatures_only(&self) -> bool {
        matches!(self.kind, ActionKind::Buff { .. } | ActionKind::Remove)
    }
}

/// A keyword plus the actions it runs when triggered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    pub kind: TraitKind,
    #[serde(default)]
    pub actions: SmallVec<[Action; 2]>,
}

impl Trait {
    /// A passive keyword with no actions
    pub fn keyword(kind: TraitKind) -> Self {
        Trait {
            kind,
            actions: SmallVec::new(),
        }
    }

    pub fn with_actions(kind: TraitKind, actions: impl IntoIterator<Item = Action>) -> Self {
        Trait {
            kind,
            actions: actions.into_iter().collect(),
        }
    }
}

/// Trait list shared by cards and creatures
pub type TraitList = SmallVec<[Trait; 2]>;

/// Does the list carry a trait of this kind?
pub fn has_trait(traits: &[Trait], kind: TraitKind) -> bool {
    traits.iter().any(|t| t.kind == kind)
}
