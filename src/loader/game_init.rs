//! Game initialization from decks
//!
//! Creates games from deck lists and a template library

use crate::core::{Side, Sided};
use crate::game::{Effect, GameState, RuleConfig};
use crate::loader::{DeckList, TemplateLibrary};
use crate::zones::Zone;
use crate::{DuelError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Game builder for initializing games from decks
pub struct GameInitializer<'a> {
    library: &'a TemplateLibrary,
}

impl<'a> GameInitializer<'a> {
    pub fn new(library: &'a TemplateLibrary) -> Self {
        GameInitializer { library }
    }

    /// Initialize a two-sided game, ready for its `StartGame` effect
    pub fn init_game(
        &self,
        deck_a: &DeckList,
        deck_b: &DeckList,
        config: RuleConfig,
        seed: u64,
    ) -> Result<GameState> {
        let decks = Sided::new(deck_a, deck_b);
        for (side, deck) in decks.iter() {
            self.validate_deck(side, deck, &config)?;
        }

        let heroes = Sided::from_fn(|side| {
            self.library
                .hero(&decks[side].hero)
                .map(|hero| hero.instantiate(side, config.hero_health))
        });
        let heroes = Sided::new(heroes.side_a?, heroes.side_b?);

        let mut game = GameState::new(heroes, config);
        game.seed = seed;
        game.summonable = self.library.summon_table()?;

        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        for side in Side::ALL {
            self.load_deck_into_game(&mut game, side, decks[side])?;
            game.zones[side].deck.shuffle(&mut rng);
        }

        game.queue.push_back(Effect::StartGame { side: Side::SideA });
        Ok(game)
    }

    fn validate_deck(&self, side: Side, deck: &DeckList, config: &RuleConfig) -> Result<()> {
        let size = deck.total_cards();
        if size < config.deck_min || size > config.deck_max {
            return Err(DuelError::InvalidDeck(format!(
                "{side}'s deck has {size} cards, expected {} to {}",
                config.deck_min, config.deck_max
            )));
        }
        Ok(())
    }

    /// Create one card per copy in the side's deck
    fn load_deck_into_game(&self, game: &mut GameState, side: Side, deck: &DeckList) -> Result<()> {
        for name in &deck.cards {
            let template = self.library.card(name)?;
            game.add_card(side, template, Zone::Deck);
        }
        Ok(())
    }
}
