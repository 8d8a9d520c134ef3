//! Main game state structure

use crate::core::{
    CardId, CardInPlay, Creature, CreatureId, EntityStore, HeroInPlay, Side, Sided,
};
use crate::game::{Effect, Event, GameOverReason, Phase, Target};
use crate::loader::CardTemplate;
use crate::zones::{SideZones, Zone, ZoneList};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Ruleset knobs that vary between game modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub deck_min: usize,
    pub deck_max: usize,
    pub hand_start_size: u32,
    /// Cards drawn past this are burned
    pub hand_limit: usize,
    pub board_limit: usize,
    pub max_mana: u32,
    pub hero_health: i32,
    /// Dying defenders still strike back
    pub death_retaliation: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            deck_min: 10,
            deck_max: 30,
            hand_start_size: 3,
            hand_limit: 10,
            board_limit: 7,
            max_mana: 10,
            hero_health: 30,
            death_retaliation: false,
        }
    }
}

/// Complete game state
///
/// The single aggregate mutated by the engine. Handlers work on a clone and
/// the driver only keeps it when resolution succeeds, so it must stay cheap
/// enough to clone once per effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Number of turns started so far (0 before the game starts)
    pub turn: u32,
    pub active: Side,
    pub phase: Phase,

    /// Pending effects, front resolves first
    pub queue: VecDeque<Effect>,

    /// Every card instance, wherever it lives
    pub cards: EntityStore<CardInPlay>,

    /// Creatures currently in play
    pub creatures: EntityStore<Creature>,

    pub heroes: Sided<HeroInPlay>,
    pub zones: Sided<SideZones>,
    pub mana_pool: Sided<u32>,
    pub mana_used: Sided<u32>,
    pub winner: Option<Side>,
    /// Set together with `winner`
    #[serde(default)]
    pub end_reason: Option<GameOverReason>,
    pub config: RuleConfig,

    /// Templates that summon effects may create, by name
    #[serde(default)]
    pub summonable: BTreeMap<String, CardTemplate>,

    /// Seed for deterministic choices made from this state
    #[serde(default)]
    pub seed: u64,
}

impl GameState {
    /// Create an empty two-sided game
    pub fn new(heroes: Sided<HeroInPlay>, config: RuleConfig) -> Self {
        GameState {
            turn: 0,
            active: Side::SideA,
            phase: Phase::Start,
            queue: VecDeque::new(),
            cards: EntityStore::new("card"),
            creatures: EntityStore::new("creature"),
            heroes,
            zones: Sided::default(),
            mana_pool: Sided::default(),
            mana_used: Sided::default(),
            winner: None,
            end_reason: None,
            config,
            summonable: BTreeMap::new(),
            seed: 0,
        }
    }

    pub fn has_started(&self) -> bool {
        self.turn > 0
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// End the game, returning the event announcing it
    pub fn declare_winner(&mut self, winner: Side, reason: GameOverReason) -> Event {
        self.winner = Some(winner);
        self.end_reason = Some(reason);
        Event::GameOver { winner, reason }
    }

    pub fn board(&self, side: Side) -> &ZoneList<Creature> {
        &self.zones[side].board
    }

    pub fn hand(&self, side: Side) -> &ZoneList<CardInPlay> {
        &self.zones[side].hand
    }

    pub fn deck(&self, side: Side) -> &ZoneList<CardInPlay> {
        &self.zones[side].deck
    }

    pub fn graveyard(&self, side: Side) -> &ZoneList<CardInPlay> {
        &self.zones[side].graveyard
    }

    pub fn mana_available(&self, side: Side) -> u32 {
        self.mana_pool[side].saturating_sub(self.mana_used[side])
    }

    /// Create a card from a template and put it into one of the owner's zones
    ///
    /// `Zone::Board` leaves the card outside every card zone; the caller is
    /// expected to spawn its creature.
    pub fn add_card(&mut self, owner: Side, template: &CardTemplate, zone: Zone) -> CardId {
        let id = self.cards.next_id();
        self.cards.insert(id, template.instantiate(id, owner));
        let zones = &mut self.zones[owner];
        match zone {
            Zone::Deck => zones.deck.add(id),
            Zone::Hand => zones.hand.add(id),
            Zone::Graveyard => zones.graveyard.add(id),
            Zone::Board => {}
        }
        id
    }

    /// Spawn a creature from a card onto its owner's board
    pub fn spawn_creature(&mut self, card_id: CardId, position: usize) -> Result<CreatureId> {
        let card = self.cards.get(card_id)?;
        let id = self.creatures.next_id();
        let creature = Creature::spawn(id, card);
        let owner = creature.owner;
        self.creatures.insert(id, creature);
        self.zones[owner].board.insert_at(position, id);
        Ok(id)
    }

    /// Take a creature out of play; its card goes to the graveyard
    pub fn destroy_creature(&mut self, id: CreatureId) -> Option<Creature> {
        let creature = self.creatures.remove(id)?;
        let zones = &mut self.zones[creature.owner];
        zones.board.remove(id);
        if !zones.graveyard.contains(creature.card_id) {
            zones.graveyard.add(creature.card_id);
        }
        Some(creature)
    }

    /// Taunting creatures on a side's board
    pub fn taunts(&self, side: Side) -> Vec<CreatureId> {
        self.board(side)
            .iter()
            .filter(|&id| self.creatures.find(id).is_some_and(|c| c.is_taunting()))
            .collect()
    }

    /// Side controlling a target, if the target is still in play
    pub fn target_owner(&self, target: Target) -> Option<Side> {
        match target {
            Target::Hero(side) => Some(side),
            Target::Creature(id) => self.creatures.find(id).map(|c| c.owner),
        }
    }

    /// Is this target an enemy creature hidden by stealth?
    pub fn is_stealthed_enemy(&self, viewer: Side, target: Target) -> bool {
        match target {
            Target::Hero(_) => false,
            Target::Creature(id) => self
                .creatures
                .find(id)
                .is_some_and(|c| c.owner != viewer && c.is_stealthed()),
        }
    }

    /// Check the structural invariants that every committed state must keep
    pub fn check_invariants(&self) -> Result<()> {
        for side in Side::ALL {
            if self.mana_used[side] > self.mana_pool[side] {
                return Err(DuelError::InvariantViolation(format!(
                    "{side} used {} mana out of {}",
                    self.mana_used[side], self.mana_pool[side]
                )));
            }
            for id in self.board(side).iter() {
                let creature = self.creatures.find(id).ok_or_else(|| {
                    DuelError::InvariantViolation(format!(
                        "creature {id} on {side}'s board does not exist"
                    ))
                })?;
                if creature.owner != side {
                    return Err(DuelError::InvariantViolation(format!(
                        "creature {id} owned by {} sits on {side}'s board",
                        creature.owner
                    )));
                }
                if creature.health > creature.health_max {
                    return Err(DuelError::InvariantViolation(format!(
                        "creature {id} has {} health over a max of {}",
                        creature.health, creature.health_max
                    )));
                }
            }
            let hero = &self.heroes[side];
            if hero.health > hero.health_max {
                return Err(DuelError::InvariantViolation(format!(
                    "{side}'s hero has {} health over a max of {}",
                    hero.health, hero.health_max
                )));
            }
        }

        if self.winner.is_some() != self.end_reason.is_some() {
            return Err(DuelError::InvariantViolation(
                "winner and end reason must be set together".to_string(),
            ));
        }

        let on_boards = self.board(Side::SideA).len() + self.board(Side::SideB).len();
        if on_boards != self.creatures.len() {
            return Err(DuelError::InvariantViolation(format!(
                "{} creatures exist but {on_boards} are on a board",
                self.creatures.len()
            )));
        }
        Ok(())
    }
}
