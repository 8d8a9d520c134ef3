//! Card and hero templates
//!
//! Templates arrive already validated from the authoring pipeline; this
//! module only deserializes them and turns them into in-game instances.

use crate::core::{CardId, CardInPlay, CardType, HeroInPlay, HeroPower, Side, TraitList};
use crate::{DuelError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Printed definition of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    pub card_type: CardType,
    pub cost: u32,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub traits: TraitList,
}

impl CardTemplate {
    /// Create a card instance owned by `owner`
    pub fn instantiate(&self, id: CardId, owner: Side) -> CardInPlay {
        CardInPlay {
            id,
            template: self.name.clone(),
            owner,
            card_type: self.card_type,
            cost: self.cost,
            attack: self.attack,
            health: self.health,
            traits: self.traits.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroTemplate {
    pub name: String,
    /// Falls back to the ruleset's hero health
    #[serde(default)]
    pub health: Option<i32>,
    pub power: HeroPower,
}

impl HeroTemplate {
    pub fn instantiate(&self, side: Side, default_health: i32) -> HeroInPlay {
        HeroInPlay::new(
            side,
            self.name.clone(),
            self.health.unwrap_or(default_health),
            self.power.clone(),
        )
    }
}

/// A hero plus the card names making up a deck (one entry per copy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub hero: String,
    pub cards: Vec<String>,
}

impl DeckList {
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Every template a game can draw on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateLibrary {
    pub cards: FxHashMap<String, CardTemplate>,
    pub heroes: FxHashMap<String, HeroTemplate>,
    /// Names of card templates that summon effects may create
    #[serde(default)]
    pub summonable: Vec<String>,
}

/// On-disk shape: plain lists are easier to author than maps
#[derive(Deserialize)]
struct LibraryFile {
    cards: Vec<CardTemplate>,
    heroes: Vec<HeroTemplate>,
    #[serde(default)]
    summonable: Vec<String>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(&mut self, template: CardTemplate) {
        self.cards.insert(template.name.clone(), template);
    }

    pub fn add_hero(&mut self, template: HeroTemplate) {
        self.heroes.insert(template.name.clone(), template);
    }

    pub fn card(&self, name: &str) -> Result<&CardTemplate> {
        self.cards
            .get(name)
            .ok_or_else(|| DuelError::UnknownTemplate(name.to_string()))
    }

    pub fn hero(&self, name: &str) -> Result<&HeroTemplate> {
        self.heroes
            .get(name)
            .ok_or_else(|| DuelError::UnknownTemplate(name.to_string()))
    }

    /// The summon table installed into each game
    pub fn summon_table(&self) -> Result<BTreeMap<String, CardTemplate>> {
        self.summonable
            .iter()
            .map(|name| Ok((name.clone(), self.card(name)?.clone())))
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: LibraryFile = serde_json::from_str(json)?;
        let mut library = TemplateLibrary::new();
        for card in file.cards {
            library.add_card(card);
        }
        for hero in file.heroes {
            library.add_hero(hero);
        }
        library.summonable = file.summonable;
        Ok(library)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"{
        "cards": [
            {"name": "Squire", "card_type": "creature", "cost": 1, "attack": 1, "health": 2},
            {"name": "Spark", "card_type": "spell", "cost": 1, "traits": [
                {"kind": "battlecry", "actions": [
                    {"kind": {"type": "damage", "amount": 1},
                     "target": {"scope": "chosen", "allegiance": "enemy"}}
                ]}
            ]}
        ],
        "heroes": [
            {"name": "Warden", "power": {"name": "Mend", "cost": 2, "actions": [
                {"kind": {"type": "heal", "amount": 2}, "target": {"scope": "own_hero"}}
            ]}}
        ],
        "summonable": ["Squire"]
    }"#;

    #[test]
    fn test_library_from_json() {
        let library = TemplateLibrary::from_json(LIBRARY).unwrap();
        assert_eq!(library.cards.len(), 2);

        let spark = library.card("Spark").unwrap();
        assert_eq!(spark.card_type, CardType::Spell);
        assert_eq!(spark.traits.len(), 1);

        let warden = library.hero("Warden").unwrap();
        assert_eq!(warden.power.cost, 2);
        assert!(!warden.power.target_self);
        assert_eq!(warden.instantiate(Side::SideA, 30).health, 30);

        let table = library.summon_table().unwrap();
        assert!(table.contains_key("Squire"));
    }

    #[test]
    fn test_unknown_template() {
        let library = TemplateLibrary::from_json(LIBRARY).unwrap();
        let err = library.card("Dragon").unwrap_err();
        assert_eq!(err.error_id(), "unknown_template");
    }
}
