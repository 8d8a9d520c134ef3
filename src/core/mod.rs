//! Core game types and entities

pub mod card;
pub mod entity;
pub mod hero;
pub mod traits;
pub mod types;

pub use card::{CardId, CardInPlay, CardType, Creature, CreatureId};
pub use entity::{EntityId, EntityStore, GameEntity};
pub use hero::{HeroInPlay, HeroPower, Orientation};
pub use traits::{
    Action, ActionKind, ActionTarget, Allegiance, Attribute, Trait, TraitKind, TraitList,
};
pub use types::{Side, Sided};
