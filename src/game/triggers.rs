//! Trait trigger engine
//!
//! Looks at each event from a successful resolution and finds the traits
//! that react to it. Charge acts immediately on the working state; battlecry
//! and deathrattle compile their actions into effects for a later pass.
//! Events without a matching trait produce nothing.

use crate::core::{CreatureId, Trait, TraitKind};
use crate::game::actions::{compile_all, ActionContext};
use crate::game::{Effect, Event, GameState, Source};

/// Effects triggered by one event
pub fn on_event(state: &mut GameState, event: &Event) -> Vec<Effect> {
    match event {
        Event::Play {
            side,
            card_id,
            creature_id,
            target,
            ..
        } => {
            if let Some(id) = creature_id {
                apply_charge(state, *id);
            }
            let Some(card) = state.cards.find(*card_id) else {
                return Vec::new();
            };
            let source = match creature_id {
                Some(id) => Source::Creature(*id),
                None => Source::Card(*card_id),
            };
            let ctx = ActionContext::new(*side, source)
                .with_chosen(*target)
                .with_holder(*creature_id);
            compile_traits(&card.traits, TraitKind::Battlecry, &ctx, state)
        }
        Event::Summon { creature_id, .. } => {
            apply_charge(state, *creature_id);
            Vec::new()
        }
        Event::CreatureDeath { creature, .. } => {
            let ctx = ActionContext::new(creature.owner, Source::Creature(creature.id))
                .with_holder(Some(creature.id));
            compile_traits(&creature.traits, TraitKind::Deathrattle, &ctx, state)
        }
        _ => Vec::new(),
    }
}

/// Effects triggered by a batch of events, in event order
pub fn on_events(state: &mut GameState, events: &[Event]) -> Vec<Effect> {
    events
        .iter()
        .flat_map(|event| on_event(state, event))
        .collect()
}

fn apply_charge(state: &mut GameState, id: CreatureId) {
    if let Ok(creature) = state.creatures.get_mut(id) {
        if creature.has_trait(TraitKind::Charge) {
            creature.exhausted = false;
        }
    }
}

fn compile_traits(
    traits: &[Trait],
    kind: TraitKind,
    ctx: &ActionContext,
    state: &GameState,
) -> Vec<Effect> {
    let actions = traits
        .iter()
        .filter(|t| t.kind == kind)
        .flat_map(|t| t.actions.iter());
    compile_all(actions, ctx, state)
}
