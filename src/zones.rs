//! Game zones (Deck, Hand, Board, Graveyard)

use crate::core::{CardId, CardInPlay, Creature, CreatureId, EntityId};
use serde::{Deserialize, Serialize};

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Deck,
    Hand,
    Board,
    Graveyard,
}

/// An ordered list of entity IDs
///
/// Decks draw from the end (the top). Boards keep left-to-right order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneList<T> {
    ids: Vec<EntityId<T>>,
}

impl<T> ZoneList<T> {
    pub fn new() -> Self {
        ZoneList { ids: Vec::new() }
    }

    pub fn add(&mut self, id: EntityId<T>) {
        self.ids.push(id);
    }

    /// Insert at a position, clamped to the end
    pub fn insert_at(&mut self, position: usize, id: EntityId<T>) {
        let position = position.min(self.ids.len());
        self.ids.insert(position, id);
    }

    pub fn remove(&mut self, id: EntityId<T>) -> bool {
        if let Some(pos) = self.ids.iter().position(|&i| i == id) {
            // Keep order: boards are positional and AI iteration must stay deterministic
            self.ids.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: EntityId<T>) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Draw from top (for Deck)
    pub fn draw_top(&mut self) -> Option<EntityId<T>> {
        self.ids.pop()
    }

    pub fn peek_top(&self) -> Option<EntityId<T>> {
        self.ids.last().copied()
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.ids.shuffle(rng);
    }

    /// Remove and return every ID
    pub fn drain(&mut self) -> Vec<EntityId<T>> {
        std::mem::take(&mut self.ids)
    }

    pub fn as_slice(&self) -> &[EntityId<T>] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId<T>> + '_ {
        self.ids.iter().copied()
    }
}

impl<T> Default for ZoneList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<EntityId<T>> for ZoneList<T> {
    fn from_iter<I: IntoIterator<Item = EntityId<T>>>(iter: I) -> Self {
        ZoneList {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Collection of all zones for one side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideZones {
    pub deck: ZoneList<CardInPlay>,
    pub hand: ZoneList<CardInPlay>,
    pub board: ZoneList<Creature>,
    pub graveyard: ZoneList<CardInPlay>,
}

impl SideZones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card-holding zone by type (the board holds creatures, not cards)
    pub fn card_zone(&self, zone: Zone) -> Option<&ZoneList<CardInPlay>> {
        match zone {
            Zone::Deck => Some(&self.deck),
            Zone::Hand => Some(&self.hand),
            Zone::Graveyard => Some(&self.graveyard),
            Zone::Board => None,
        }
    }

    /// Which card zone currently holds this card?
    pub fn locate(&self, card_id: CardId) -> Option<Zone> {
        [Zone::Deck, Zone::Hand, Zone::Graveyard]
            .into_iter()
            .find(|&z| self.card_zone(z).is_some_and(|list| list.contains(card_id)))
    }

    pub fn on_board(&self, creature_id: CreatureId) -> bool {
        self.board.contains(creature_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_list() {
        let mut hand: ZoneList<CardInPlay> = ZoneList::new();
        assert!(hand.is_empty());

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);
        hand.add(card1);
        hand.add(card2);

        assert_eq!(hand.len(), 2);
        assert!(hand.contains(card1));
        assert!(hand.remove(card1));
        assert!(!hand.remove(card1));
        assert_eq!(hand.as_slice(), &[card2]);
    }

    #[test]
    fn test_deck_draws_from_top() {
        let mut deck: ZoneList<CardInPlay> =
            [1, 2, 3].into_iter().map(CardId::new).collect();

        assert_eq!(deck.peek_top(), Some(CardId::new(3)));
        assert_eq!(deck.draw_top(), Some(CardId::new(3)));
        assert_eq!(deck.draw_top(), Some(CardId::new(2)));
        assert_eq!(deck.draw_top(), Some(CardId::new(1)));
        assert_eq!(deck.draw_top(), None);
    }

    #[test]
    fn test_board_insert_clamps_position() {
        let mut board: ZoneList<Creature> = ZoneList::new();
        board.insert_at(5, CreatureId::new(1));
        board.insert_at(0, CreatureId::new(2));
        board.insert_at(1, CreatureId::new(3));
        assert_eq!(
            board.as_slice(),
            &[CreatureId::new(2), CreatureId::new(3), CreatureId::new(1)]
        );
    }

    #[test]
    fn test_locate_card() {
        let mut zones = SideZones::new();
        zones.deck.add(CardId::new(1));
        zones.hand.add(CardId::new(2));
        assert_eq!(zones.locate(CardId::new(1)), Some(Zone::Deck));
        assert_eq!(zones.locate(CardId::new(2)), Some(Zone::Hand));
        assert_eq!(zones.locate(CardId::new(3)), None);
    }
}
