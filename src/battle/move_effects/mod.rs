// In: src/battle/move_effects/mod.rs

mod damage_effects;
mod special_effects;

use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleState, TurnRng};
use schema::{DamageClass, MoveMechanic};

use self::{damage_effects::*, special_effects::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectContext {
    pub attacker_index: usize,
    pub defender_index: usize,
    pub move_slot: usize,
}

impl EffectContext {
    pub fn new(attacker_index: usize, defender_index: usize, move_slot: usize) -> Self {
        Self {
            attacker_index,
            defender_index,
            move_slot,
        }
    }
}

/// Turns a move use into the commands that carry it out, dispatching on the
/// move's mechanic before falling through to a plain hit. Reads the state,
/// never writes it.
pub fn resolve_move(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let (Some(attacker), Some(defender)) = (
        state.players[context.attacker_index].active_pokemon(),
        state.players[context.defender_index].active_pokemon(),
    ) else {
        return Vec::new();
    };
    let Some(move_instance) = attacker.moves.get(context.move_slot) else {
        return Vec::new();
    };

    match move_instance.mechanic {
        MoveMechanic::Charge => apply_charge_effect(context, attacker, defender, rng),
        MoveMechanic::Recoil {
            percent,
            miss_recoil,
        } => apply_recoil_move(context, attacker, defender, percent, miss_recoil, rng),
        MoveMechanic::MultiHit { min, max } => {
            apply_multi_hit(context, attacker, defender, min, max, rng)
        }
        MoveMechanic::SleepSelf => {
            apply_rest_effect(context, attacker, state.rules.rest_sleep_turns)
        }
        MoveMechanic::DelayedDamage => {
            apply_delayed_damage_effect(context, attacker, state.rules.delayed_damage_turns)
        }
        MoveMechanic::Plain if move_instance.record.damage_class == DamageClass::Status => {
            apply_no_op_effect(context, attacker)
        }
        MoveMechanic::Plain => apply_standard_hit(context, attacker, defender, rng),
    }
}
