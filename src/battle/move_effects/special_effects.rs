use super::damage_effects::apply_standard_hit;
use super::EffectContext;
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::state::{BattleEvent, PendingDelayedEffect, TurnRng};
use crate::pokemon::{PokemonInst, StatusCondition};

/// First use marks the side as charging; the next action releases the hit and
/// clears the marker whether or not it lands.
pub(super) fn apply_charge_effect(
    context: &EffectContext,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let attacker_target = PlayerTarget::from_index(context.attacker_index);

    if attacker.charging_slot() == Some(context.move_slot) {
        let mut commands = vec![BattleCommand::SetPokemonStatus {
            target: attacker_target,
            status: None,
        }];
        commands.extend(apply_standard_hit(context, attacker, defender, rng));
        return commands;
    }

    vec![
        BattleCommand::SetPokemonStatus {
            target: attacker_target,
            status: Some(StatusCondition::Charging(context.move_slot)),
        },
        BattleCommand::EmitEvent(BattleEvent::ChargingStarted {
            pokemon: attacker.name.clone(),
            move_used: attacker.moves[context.move_slot].name().to_string(),
        }),
    ]
}

pub(super) fn apply_rest_effect(
    context: &EffectContext,
    attacker: &PokemonInst,
    sleep_turns: u8,
) -> Vec<BattleCommand> {
    let attacker_target = PlayerTarget::from_index(context.attacker_index);
    vec![
        BattleCommand::HealToFull {
            target: attacker_target,
        },
        BattleCommand::SetPokemonStatus {
            target: attacker_target,
            status: Some(StatusCondition::Asleep(sleep_turns)),
        },
        BattleCommand::EmitEvent(BattleEvent::RestUsed {
            pokemon: attacker.name.clone(),
        }),
    ]
}

pub(super) fn apply_delayed_damage_effect(
    context: &EffectContext,
    attacker: &PokemonInst,
    turns: u8,
) -> Vec<BattleCommand> {
    let move_instance = &attacker.moves[context.move_slot];
    vec![
        BattleCommand::QueueDelayedEffect(PendingDelayedEffect {
            target_player: context.defender_index,
            turns_remaining: turns,
            power: move_instance.power(),
            move_used: move_instance.name().to_string(),
            attacker_level: attacker.level,
            attacker_sp_attack: attacker.stats.sp_attack,
        }),
        BattleCommand::EmitEvent(BattleEvent::DelayedAttackForeseen {
            pokemon: attacker.name.clone(),
            move_used: move_instance.name().to_string(),
        }),
    ]
}

/// Status moves without a modelled mechanic.
pub(super) fn apply_no_op_effect(
    context: &EffectContext,
    attacker: &PokemonInst,
) -> Vec<BattleCommand> {
    vec![BattleCommand::EmitEvent(BattleEvent::NothingHappened {
        pokemon: attacker.name.clone(),
        move_used: attacker.moves[context.move_slot].name().to_string(),
    })]
}
