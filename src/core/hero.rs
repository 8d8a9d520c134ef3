//! Heroes and hero powers

use crate::core::traits::Action;
use crate::core::Side;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which side a hero power aims at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Friendly,
    Enemy,
}

/// A once-per-turn hero ability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPower {
    pub name: String,
    #[serde(default)]
    pub cost: u32,
    pub actions: SmallVec<[Action; 2]>,
    /// Always aims at its own hero, no target needed
    #[serde(default)]
    pub target_self: bool,
}

impl HeroPower {
    /// Powers that heal or buff aim at their own side
    pub fn orientation(&self) -> Orientation {
        if self.actions.iter().any(|a| a.is_beneficial()) {
            Orientation::Friendly
        } else {
            Orientation::Enemy
        }
    }

    pub fn requires_target(&self) -> bool {
        !self.target_self && self.actions.iter().any(|a| a.requires_target())
    }
}

/// A hero in play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroInPlay {
    pub side: Side,
    pub name: String,
    pub health: i32,
    pub health_max: i32,
    pub power: HeroPower,
    /// Hero power already used this turn
    pub exhausted: bool,
}

impl HeroInPlay {
    pub fn new(side: Side, name: impl Into<String>, health: i32, power: HeroPower) -> Self {
        HeroInPlay {
            side,
            name: name.into(),
            health,
            health_max: health,
            power,
            exhausted: false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{ActionKind, ActionTarget, Allegiance};
    use smallvec::smallvec;

    #[test]
    fn test_power_orientation() {
        let mut power = HeroPower {
            name: "Ember".to_string(),
            cost: 2,
            actions: smallvec![Action::new(
                ActionKind::Damage { amount: 1 },
                ActionTarget::Chosen(Allegiance::Any),
            )],
            target_self: false,
        };
        assert_eq!(power.orientation(), Orientation::Enemy);
        assert!(power.requires_target());

        power.actions.push(Action::new(
            ActionKind::Heal { amount: 2 },
            ActionTarget::OwnHero,
        ));
        assert_eq!(power.orientation(), Orientation::Friendly);

        power.target_self = true;
        assert!(!power.requires_target());
    }

    #[test]
    fn test_hero_destroyed() {
        let power = HeroPower {
            name: "Nothing".to_string(),
            cost: 0,
            actions: SmallVec::new(),
            target_self: true,
        };
        let mut hero = HeroInPlay::new(Side::SideA, "Ada", 30, power);
        assert!(!hero.is_destroyed());
        hero.health = 0;
        assert!(hero.is_destroyed());
    }
}
