//! Effects: requested state changes
//!
//! An effect sits in the game queue until the driver hands it to the
//! dispatcher. Every variant names the side it acts for.

use crate::core::{Attribute, CardId, CreatureId, Side};
use crate::game::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that can be damaged, healed or attacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Target {
    Hero(Side),
    Creature(CreatureId),
}

/// Where an effect came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Source {
    Hero(Side),
    HeroPower(Side),
    /// A spell card
    Card(CardId),
    Creature(CreatureId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Hero(side) => write!(f, "{side} hero"),
            Target::Creature(id) => write!(f, "creature {id}"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Hero(side) => write!(f, "{side} hero"),
            Source::HeroPower(side) => write!(f, "{side} hero power"),
            Source::Card(id) => write!(f, "card {id}"),
            Source::Creature(id) => write!(f, "creature {id}"),
        }
    }
}

impl Source {
    /// Spells and hero powers never take retaliation
    pub fn is_spell_like(&self) -> bool {
        matches!(self, Source::Card(_) | Source::HeroPower(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Combat damage, eligible for retaliation
    Physical,
    Spell,
}

/// Boards affected by a clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearScope {
    Own,
    Opponent,
    Both,
}

impl ClearScope {
    /// Sides affected when `side` issues the clear
    pub fn sides(self, side: Side) -> Vec<Side> {
        match self {
            ClearScope::Own => vec![side],
            ClearScope::Opponent => vec![side.opponent()],
            ClearScope::Both => vec![side, side.opponent()],
        }
    }
}

/// A unit that can be exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Unit {
    Hero(Side),
    Creature(CreatureId),
}

/// A requested state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    StartGame {
        side: Side,
    },
    Play {
        side: Side,
        card_id: CardId,
        #[serde(default)]
        position: usize,
        #[serde(default)]
        target: Option<Target>,
    },
    Attack {
        side: Side,
        attacker: CreatureId,
        target: Target,
    },
    Damage {
        side: Side,
        damage_type: DamageType,
        source: Source,
        target: Target,
        amount: i32,
        retaliate: bool,
    },
    Heal {
        side: Side,
        source: Source,
        target: Target,
        amount: i32,
    },
    Buff {
        side: Side,
        source: Source,
        target: Target,
        attribute: Attribute,
        amount: i32,
    },
    Draw {
        side: Side,
        amount: u32,
    },
    Summon {
        side: Side,
        template: String,
    },
    Clear {
        side: Side,
        scope: ClearScope,
    },
    Remove {
        side: Side,
        target: CreatureId,
    },
    UseHeroPower {
        side: Side,
        #[serde(default)]
        target: Option<Target>,
    },
    EndTurn {
        side: Side,
    },
    NewPhase {
        side: Side,
        phase: Phase,
    },
    Concede {
        side: Side,
    },
    MarkExhausted {
        side: Side,
        unit: Unit,
    },
    TempManaBoost {
        side: Side,
        amount: u32,
    },
}

/// Tag of an effect, used as the dispatcher key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    StartGame,
    Play,
    Attack,
    Damage,
    Heal,
    Buff,
    Draw,
    Summon,
    Clear,
    Remove,
    UseHeroPower,
    EndTurn,
    NewPhase,
    Concede,
    MarkExhausted,
    TempManaBoost,
}

impl EffectKind {
    pub const ALL: [EffectKind; 16] = [
        EffectKind::StartGame,
        EffectKind::Play,
        EffectKind::Attack,
        EffectKind::Damage,
        EffectKind::Heal,
        EffectKind::Buff,
        EffectKind::Draw,
        EffectKind::Summon,
        EffectKind::Clear,
        EffectKind::Remove,
        EffectKind::UseHeroPower,
        EffectKind::EndTurn,
        EffectKind::NewPhase,
        EffectKind::Concede,
        EffectKind::MarkExhausted,
        EffectKind::TempManaBoost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::StartGame => "start_game",
            EffectKind::Play => "play",
            EffectKind::Attack => "attack",
            EffectKind::Damage => "damage",
            EffectKind::Heal => "heal",
            EffectKind::Buff => "buff",
            EffectKind::Draw => "draw",
            EffectKind::Summon => "summon",
            EffectKind::Clear => "clear",
            EffectKind::Remove => "remove",
            EffectKind::UseHeroPower => "use_hero_power",
            EffectKind::EndTurn => "end_turn",
            EffectKind::NewPhase => "new_phase",
            EffectKind::Concede => "concede",
            EffectKind::MarkExhausted => "mark_exhausted",
            EffectKind::TempManaBoost => "temp_mana_boost",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::StartGame { .. } => EffectKind::StartGame,
            Effect::Play { .. } => EffectKind::Play,
            Effect::Attack { .. } => EffectKind::Attack,
            Effect::Damage { .. } => EffectKind::Damage,
            Effect::Heal { .. } => EffectKind::Heal,
            Effect::Buff { .. } => EffectKind::Buff,
            Effect::Draw { .. } => EffectKind::Draw,
            Effect::Summon { .. } => EffectKind::Summon,
            Effect::Clear { .. } => EffectKind::Clear,
            Effect::Remove { .. } => EffectKind::Remove,
            Effect::UseHeroPower { .. } => EffectKind::UseHeroPower,
            Effect::EndTurn { .. } => EffectKind::EndTurn,
            Effect::NewPhase { .. } => EffectKind::NewPhase,
            Effect::Concede { .. } => EffectKind::Concede,
            Effect::MarkExhausted { .. } => EffectKind::MarkExhausted,
            Effect::TempManaBoost { .. } => EffectKind::TempManaBoost,
        }
    }

    /// The side this effect acts for
    pub fn side(&self) -> Side {
        match self {
            Effect::StartGame { side }
            | Effect::Play { side, .. }
            | Effect::Attack { side, .. }
            | Effect::Damage { side, .. }
            | Effect::Heal { side, .. }
            | Effect::Buff { side, .. }
            | Effect::Draw { side, .. }
            | Effect::Summon { side, .. }
            | Effect::Clear { side, .. }
            | Effect::Remove { side, .. }
            | Effect::UseHeroPower { side, .. }
            | Effect::EndTurn { side }
            | Effect::NewPhase { side, .. }
            | Effect::Concede { side }
            | Effect::MarkExhausted { side, .. }
            | Effect::TempManaBoost { side, .. } => *side,
        }
    }
}
