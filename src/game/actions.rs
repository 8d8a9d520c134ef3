//! Compiling declarative actions into effects
//!
//! Trait and hero-power actions are data. When they fire, each one becomes
//! zero or more concrete effects relative to the controlling side.

use crate::core::{Action, ActionKind, ActionTarget, Allegiance, CreatureId, Side};
use crate::game::{ClearScope, DamageType, Effect, GameState, Source, Target};

/// Everything an action needs to know about why it fired
#[derive(Debug, Clone, Copy)]
pub struct ActionContext {
    /// Side controlling the action
    pub side: Side,
    pub source: Source,
    /// Target picked when the card or power was used
    pub chosen: Option<Target>,
    /// Creature carrying the trait, if any
    pub holder: Option<CreatureId>,
}

impl ActionContext {
    pub fn new(side: Side, source: Source) -> Self {
        ActionContext {
            side,
            source,
            chosen: None,
            holder: None,
        }
    }

    pub fn with_chosen(mut self, chosen: Option<Target>) -> Self {
        self.chosen = chosen;
        self
    }

    pub fn with_holder(mut self, holder: Option<CreatureId>) -> Self {
        self.holder = holder;
        self
    }
}

/// Turn one action into effects
///
/// A chosen-target action with nothing chosen yields no effects.
pub fn compile(action: &Action, ctx: &ActionContext, state: &GameState) -> Vec<Effect> {
    let side = ctx.side;
    match &action.kind {
        ActionKind::Draw { amount } => scope_sides(action.target, ctx, state)
            .into_iter()
            .map(|s| Effect::Draw {
                side: s,
                amount: *amount,
            })
            .collect(),
        ActionKind::Damage { amount } => unit_targets(action.target, ctx, state)
            .into_iter()
            .map(|target| Effect::Damage {
                side,
                damage_type: DamageType::Spell,
                source: ctx.source,
                target,
                amount: *amount,
                retaliate: false,
            })
            .collect(),
        ActionKind::Heal { amount } => unit_targets(action.target, ctx, state)
            .into_iter()
            .map(|target| Effect::Heal {
                side,
                source: ctx.source,
                target,
                amount: *amount,
            })
            .collect(),
        ActionKind::Buff { attribute, amount } => unit_targets(action.target, ctx, state)
            .into_iter()
            .filter(|t| matches!(t, Target::Creature(_)))
            .map(|target| Effect::Buff {
                side,
                source: ctx.source,
                target,
                attribute: *attribute,
                amount: *amount,
            })
            .collect(),
        ActionKind::Summon { template } => scope_sides(action.target, ctx, state)
            .into_iter()
            .map(|s| Effect::Summon {
                side: s,
                template: template.clone(),
            })
            .collect(),
        ActionKind::Clear => {
            let sides = scope_sides(action.target, ctx, state);
            let scope = match (sides.contains(&side), sides.contains(&side.opponent())) {
                (true, true) => ClearScope::Both,
                (true, false) => ClearScope::Own,
                (false, true) => ClearScope::Opponent,
                (false, false) => return Vec::new(),
            };
            vec![Effect::Clear { side, scope }]
        }
        ActionKind::Remove => unit_targets(action.target, ctx, state)
            .into_iter()
            .filter_map(|t| match t {
                Target::Creature(id) => Some(Effect::Remove { side, target: id }),
                Target::Hero(_) => None,
            })
            .collect(),
        ActionKind::TempManaBoost { amount } => scope_sides(action.target, ctx, state)
            .into_iter()
            .map(|s| Effect::TempManaBoost {
                side: s,
                amount: *amount,
            })
            .collect(),
    }
}

/// Compile a list of actions in order
pub fn compile_all<'a>(
    actions: impl IntoIterator<Item = &'a Action>,
    ctx: &ActionContext,
    state: &GameState,
) -> Vec<Effect> {
    actions
        .into_iter()
        .flat_map(|action| compile(action, ctx, state))
        .collect()
}

/// Sides touched by a side-level action (draw, summon, clear, mana)
fn scope_sides(target: ActionTarget, ctx: &ActionContext, state: &GameState) -> Vec<Side> {
    let side = ctx.side;
    match target {
        ActionTarget::OwnSide | ActionTarget::OwnHero | ActionTarget::This => vec![side],
        ActionTarget::EnemySide | ActionTarget::EnemyHero => vec![side.opponent()],
        ActionTarget::BothSides => vec![side, side.opponent()],
        ActionTarget::AllCreatures(allegiance) => admitted_sides(side, allegiance),
        ActionTarget::Chosen(_) => ctx
            .chosen
            .and_then(|t| state.target_owner(t))
            .into_iter()
            .collect(),
    }
}

/// Units hit by a unit-level action (damage, heal, buff, remove)
fn unit_targets(target: ActionTarget, ctx: &ActionContext, state: &GameState) -> Vec<Target> {
    let side = ctx.side;
    match target {
        ActionTarget::Chosen(_) => ctx.chosen.into_iter().collect(),
        ActionTarget::This => ctx.holder.map(Target::Creature).into_iter().collect(),
        ActionTarget::OwnHero => vec![Target::Hero(side)],
        ActionTarget::EnemyHero => vec![Target::Hero(side.opponent())],
        ActionTarget::AllCreatures(allegiance) => admitted_sides(side, allegiance)
            .into_iter()
            .flat_map(|s| state.board(s).iter().map(Target::Creature))
            .collect(),
        ActionTarget::OwnSide => side_units(state, side),
        ActionTarget::EnemySide => side_units(state, side.opponent()),
        ActionTarget::BothSides => {
            let mut units = side_units(state, side);
            units.extend(side_units(state, side.opponent()));
            units
        }
    }
}

fn admitted_sides(side: Side, allegiance: Allegiance) -> Vec<Side> {
    [side, side.opponent()]
        .into_iter()
        .filter(|&owner| allegiance.admits(side, owner))
        .collect()
}

/// A side's hero followed by its creatures in board order
fn side_units(state: &GameState, side: Side) -> Vec<Target> {
    std::iter::once(Target::Hero(side))
        .chain(state.board(side).iter().map(Target::Creature))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Attribute;
    use crate::game::state::tests::{creature_template, empty_game};
    use crate::zones::Zone;

    fn board_with_two() -> (GameState, CreatureId, CreatureId) {
        let mut game = empty_game();
        let template = creature_template("Bear", 2, 2);
        let own_card = game.add_card(Side::SideA, &template, Zone::Board);
        let own = game.spawn_creature(own_card, 0).unwrap();
        let enemy_card = game.add_card(Side::SideB, &template, Zone::Board);
        let enemy = game.spawn_creature(enemy_card, 0).unwrap();
        (game, own, enemy)
    }

    #[test]
    fn test_chosen_damage_is_spell_typed() {
        let (game, _, enemy) = board_with_two();
        let action = Action::new(
            ActionKind::Damage { amount: 3 },
            ActionTarget::Chosen(Allegiance::Enemy),
        );
        let ctx = ActionContext::new(Side::SideA, Source::HeroPower(Side::SideA))
            .with_chosen(Some(Target::Creature(enemy)));

        let effects = compile(&action, &ctx, &game);
        assert_eq!(
            effects,
            vec![Effect::Damage {
                side: Side::SideA,
                damage_type: DamageType::Spell,
                source: Source::HeroPower(Side::SideA),
                target: Target::Creature(enemy),
                amount: 3,
                retaliate: false,
            }]
        );
    }

    #[test]
    fn test_chosen_without_target_compiles_to_nothing() {
        let (game, own, _) = board_with_two();
        let action = Action::new(
            ActionKind::Heal { amount: 2 },
            ActionTarget::Chosen(Allegiance::Friendly),
        );
        let ctx = ActionContext::new(Side::SideA, Source::Creature(own)).with_holder(Some(own));
        assert!(compile(&action, &ctx, &game).is_empty());
    }

    #[test]
    fn test_all_enemy_creatures() {
        let (game, own, _) = board_with_two();
        let action = Action::new(
            ActionKind::Buff {
                attribute: Attribute::Health,
                amount: 1,
            },
            ActionTarget::AllCreatures(Allegiance::Enemy),
        );
        let ctx = ActionContext::new(Side::SideB, Source::Hero(Side::SideB));
        let effects = compile(&action, &ctx, &game);
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            Effect::Buff { target: Target::Creature(id), .. } if id == own
        ));
    }

    #[test]
    fn test_side_scopes() {
        let (game, _, _) = board_with_two();
        let ctx = ActionContext::new(Side::SideB, Source::Hero(Side::SideB));

        let draw = Action::new(ActionKind::Draw { amount: 2 }, ActionTarget::BothSides);
        assert_eq!(compile(&draw, &ctx, &game).len(), 2);

        let clear = Action::new(ActionKind::Clear, ActionTarget::EnemySide);
        assert_eq!(
            compile(&clear, &ctx, &game),
            vec![Effect::Clear {
                side: Side::SideB,
                scope: ClearScope::Opponent
            }]
        );

        // Hero plus one creature on side A
        let burn = Action::new(ActionKind::Damage { amount: 1 }, ActionTarget::EnemySide);
        assert_eq!(compile(&burn, &ctx, &game).len(), 2);
    }
}
