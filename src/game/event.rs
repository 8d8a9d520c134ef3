//! Events: facts recorded by successfully applied effects

use crate::core::{Attribute, CardId, Creature, CreatureId, Side};
use crate::game::effect::{ClearScope, Source, Target};
use crate::game::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    HeroDestroyed,
    DeckedOut,
    Conceded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Play {
        side: Side,
        card_id: CardId,
        template: String,
        creature_id: Option<CreatureId>,
        target: Option<Target>,
    },
    Attack {
        side: Side,
        attacker: CreatureId,
        target: Target,
    },
    Damage {
        side: Side,
        source: Source,
        target: Target,
        amount: i32,
        health_after: i32,
    },
    Heal {
        side: Side,
        target: Target,
        amount: i32,
        health_after: i32,
    },
    Buff {
        side: Side,
        creature_id: CreatureId,
        attribute: Attribute,
        amount: i32,
    },
    /// A card moved from deck to hand; only its owner may learn which
    Draw {
        side: Side,
        card_id: CardId,
    },
    /// A card drawn into a full hand went straight to the graveyard
    Burn {
        side: Side,
        card_id: CardId,
    },
    UseHeroPower {
        side: Side,
        target: Option<Target>,
    },
    /// Carries the creature as it was when it died
    CreatureDeath {
        side: Side,
        creature: Box<Creature>,
    },
    Remove {
        side: Side,
        creature_id: CreatureId,
    },
    Summon {
        side: Side,
        card_id: CardId,
        creature_id: CreatureId,
    },
    Clear {
        side: Side,
        scope: ClearScope,
        removed: Vec<CreatureId>,
    },
    TempManaBoost {
        side: Side,
        amount: u32,
        mana_pool: u32,
    },
    EndTurn {
        side: Side,
    },
    NewPhase {
        side: Side,
        phase: Phase,
        turn: u32,
    },
    /// An effect was cancelled before it changed anything
    Fizzle {
        side: Side,
        reason: String,
    },
    GameOver {
        winner: Side,
        reason: GameOverReason,
    },
}

impl Event {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Event::GameOver { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Play { .. } => "play",
            Event::Attack { .. } => "attack",
            Event::Damage { .. } => "damage",
            Event::Heal { .. } => "heal",
            Event::Buff { .. } => "buff",
            Event::Draw { .. } => "draw",
            Event::Burn { .. } => "burn",
            Event::UseHeroPower { .. } => "use_hero_power",
            Event::CreatureDeath { .. } => "creature_death",
            Event::Remove { .. } => "remove",
            Event::Summon { .. } => "summon",
            Event::Clear { .. } => "clear",
            Event::TempManaBoost { .. } => "temp_mana_boost",
            Event::EndTurn { .. } => "end_turn",
            Event::NewPhase { .. } => "new_phase",
            Event::Fizzle { .. } => "fizzle",
            Event::GameOver { .. } => "game_over",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Play {
                side,
                template,
                target,
                ..
            } => match target {
                Some(target) => write!(f, "{side} plays {template} at {target}"),
                None => write!(f, "{side} plays {template}"),
            },
            Event::Attack {
                side,
                attacker,
                target,
            } => write!(f, "{side}: creature {attacker} attacks {target}"),
            Event::Damage {
                source,
                target,
                amount,
                health_after,
                ..
            } => write!(f, "{source} deals {amount} to {target} ({health_after} left)"),
            Event::Heal {
                target,
                amount,
                health_after,
                ..
            } => write!(f, "{target} healed for {amount} ({health_after})"),
            Event::Buff {
                creature_id,
                attribute,
                amount,
                ..
            } => write!(f, "creature {creature_id} gains {amount} {attribute:?}"),
            Event::Draw { side, .. } => write!(f, "{side} draws a card"),
            Event::Burn { side, card_id } => write!(f, "{side} burns card {card_id}"),
            Event::UseHeroPower { side, target } => match target {
                Some(target) => write!(f, "{side} uses hero power on {target}"),
                None => write!(f, "{side} uses hero power"),
            },
            Event::CreatureDeath { creature, .. } => {
                write!(f, "{} ({}) dies", creature.template, creature.id)
            }
            Event::Remove { creature_id, .. } => write!(f, "creature {creature_id} removed"),
            Event::Summon {
                side, creature_id, ..
            } => write!(f, "{side} summons creature {creature_id}"),
            Event::Clear { removed, .. } => write!(f, "board cleared ({} removed)", removed.len()),
            Event::TempManaBoost {
                side, mana_pool, ..
            } => write!(f, "{side} mana boosted to {mana_pool}"),
            Event::EndTurn { side } => write!(f, "{side} ends turn"),
            Event::NewPhase { side, phase, turn } => write!(f, "turn {turn}: {side} {phase}"),
            Event::Fizzle { side, reason } => write!(f, "{side}: fizzled ({reason})"),
            Event::GameOver { winner, reason } => write!(f, "{winner} wins ({reason:?})"),
        }
    }
}
