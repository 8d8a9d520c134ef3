//! Read-only game state view for move choosers
//!
//! The AI inspects the game through this view rather than the raw state.
//! It answers the questions a player asks while deciding: what can I
//! afford, what can I hit, what is ready to attack.

use crate::core::{Action, CardId, CardInPlay, Creature, CreatureId, HeroInPlay, Side};
use crate::game::handlers::{hero_power::validate_power_target, validate_actions_target};
use crate::game::{GameState, Target};

/// Read-only view of game state from one side's perspective
pub struct GameStateView<'a> {
    game: &'a GameState,
    side: Side,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, side: Side) -> Self {
        GameStateView { game, side }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn opponent(&self) -> Side {
        self.side.opponent()
    }

    pub fn game(&self) -> &'a GameState {
        self.game
    }

    pub fn hero(&self) -> &'a HeroInPlay {
        &self.game.heroes[self.side]
    }

    pub fn mana_available(&self) -> u32 {
        self.game.mana_available(self.side)
    }

    /// Cards in hand in hand order
    pub fn hand(&self) -> impl Iterator<Item = &'a CardInPlay> + 'a {
        let game = self.game;
        game.hand(self.side)
            .iter()
            .filter_map(move |id| game.cards.find(id))
    }

    /// Cards in hand that fit in the remaining mana
    pub fn affordable(&self) -> Vec<&'a CardInPlay> {
        let mana = self.mana_available();
        self.hand().filter(|card| card.cost <= mana).collect()
    }

    pub fn creature(&self, id: CreatureId) -> Option<&'a Creature> {
        self.game.creatures.find(id)
    }

    /// Own creatures able to attack right now
    pub fn ready_attackers(&self) -> Vec<CreatureId> {
        self.game
            .board(self.side)
            .iter()
            .filter(|&id| {
                self.creature(id)
                    .is_some_and(|c| !c.exhausted && c.attack > 0)
            })
            .collect()
    }

    pub fn board_is_full(&self) -> bool {
        self.game.board(self.side).len() >= self.game.config.board_limit
    }

    /// Is a unique creature with this template already on our board?
    pub fn has_on_board(&self, template: &str) -> bool {
        self.game
            .board(self.side)
            .iter()
            .any(|id| self.creature(id).is_some_and(|c| c.template == template))
    }

    pub fn enemy_taunts(&self) -> Vec<CreatureId> {
        self.game.taunts(self.opponent())
    }

    /// Enemy creatures not hidden by stealth
    pub fn visible_enemies(&self) -> Vec<CreatureId> {
        self.game
            .board(self.opponent())
            .iter()
            .filter(|&id| !self.game.is_stealthed_enemy(self.side, Target::Creature(id)))
            .collect()
    }

    /// Every unit in play, enemy hero first, then enemy creatures, then ours
    pub fn all_targets(&self) -> Vec<Target> {
        let opponent = self.opponent();
        let mut targets = vec![Target::Hero(opponent)];
        targets.extend(self.game.board(opponent).iter().map(Target::Creature));
        targets.push(Target::Hero(self.side));
        targets.extend(self.game.board(self.side).iter().map(Target::Creature));
        targets
    }

    /// First target the given actions would accept
    pub fn target_for_actions<'b>(
        &self,
        actions: impl IntoIterator<Item = &'b Action> + Clone,
    ) -> Option<Target> {
        self.all_targets().into_iter().find(|&target| {
            validate_actions_target(self.game, self.side, actions.clone(), Some(target)).is_ok()
        })
    }

    /// First target our hero power would accept
    pub fn target_for_power(&self) -> Option<Target> {
        let power = &self.hero().power;
        self.all_targets()
            .into_iter()
            .find(|&target| validate_power_target(self.game, self.side, power, target).is_ok())
    }

    pub fn card(&self, id: CardId) -> Option<&'a CardInPlay> {
        self.game.cards.find(id)
    }
}
