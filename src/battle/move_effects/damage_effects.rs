use super::EffectContext;
use crate::battle::calculators::{calculate_hit, resolve_multi_hit, HitOutcome};
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::state::{BattleEvent, TurnRng};
use crate::pokemon::PokemonInst;

pub(super) fn apply_standard_hit(
    context: &EffectContext,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let move_instance = &attacker.moves[context.move_slot];
    let outcome = calculate_hit(attacker, defender, move_instance, rng);
    hit_commands(context, attacker, &outcome)
}

/// Miss text, or hit text + effectiveness + the damage itself.
pub(super) fn hit_commands(
    context: &EffectContext,
    attacker: &PokemonInst,
    outcome: &HitOutcome,
) -> Vec<BattleCommand> {
    let move_used = attacker.moves[context.move_slot].name().to_string();
    if outcome.missed {
        return vec![BattleCommand::EmitEvent(BattleEvent::MoveMissed {
            attacker: attacker.name.clone(),
            move_used,
        })];
    }

    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::MoveHit {
        attacker: attacker.name.clone(),
        move_used,
        damage: outcome.damage,
        critical: outcome.critical,
    })];
    commands.extend(effectiveness_event(outcome.effectiveness));
    commands.push(BattleCommand::DealDamage {
        target: PlayerTarget::from_index(context.defender_index),
        amount: outcome.damage,
    });
    commands
}

fn effectiveness_event(multiplier: f32) -> Option<BattleCommand> {
    (multiplier != 1.0)
        .then_some(BattleCommand::EmitEvent(BattleEvent::AttackTypeEffectiveness { multiplier }))
}

pub(super) fn apply_recoil_move(
    context: &EffectContext,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    percent: u8,
    miss_recoil: bool,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let move_instance = &attacker.moves[context.move_slot];
    let outcome = calculate_hit(attacker, defender, move_instance, rng);
    let mut commands = hit_commands(context, attacker, &outcome);

    if !outcome.missed {
        commands.extend(apply_recoil_effect(percent, context, attacker, outcome.damage));
    } else if miss_recoil {
        commands.extend(apply_crash_effect(context, attacker));
    }
    commands
}

/// Self-damage of `percentage`% of the damage dealt, applied after the defender's HP drops.
pub(super) fn apply_recoil_effect(
    percentage: u8,
    context: &EffectContext,
    attacker: &PokemonInst,
    damage_dealt: u16,
) -> Vec<BattleCommand> {
    let mut commands = Vec::new();
    let recoil_damage = (damage_dealt as u32 * percentage as u32 / 100) as u16;

    if recoil_damage > 0 {
        commands.push(BattleCommand::EmitEvent(BattleEvent::RecoilDamage {
            pokemon: attacker.name.clone(),
            damage: recoil_damage,
        }));
        commands.push(BattleCommand::DealDamage {
            target: PlayerTarget::from_index(context.attacker_index),
            amount: recoil_damage,
        });
    }
    commands
}

/// A missed crash move costs half the user's max HP.
pub(super) fn apply_crash_effect(
    context: &EffectContext,
    attacker: &PokemonInst,
) -> Vec<BattleCommand> {
    let crash_damage = attacker.max_hp() / 2;
    if crash_damage == 0 {
        return Vec::new();
    }
    vec![
        BattleCommand::EmitEvent(BattleEvent::CrashDamage {
            pokemon: attacker.name.clone(),
            damage: crash_damage,
        }),
        BattleCommand::DealDamage {
            target: PlayerTarget::from_index(context.attacker_index),
            amount: crash_damage,
        },
    ]
}

pub(super) fn apply_multi_hit(
    context: &EffectContext,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    min: u8,
    max: u8,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let move_instance = &attacker.moves[context.move_slot];
    let outcome = resolve_multi_hit(attacker, defender, move_instance, min, max, rng);
    let move_used = move_instance.name().to_string();

    if outcome.missed {
        return vec![BattleCommand::EmitEvent(BattleEvent::MoveMissed {
            attacker: attacker.name.clone(),
            move_used,
        })];
    }

    let mut commands = if outcome.hits > 1 {
        vec![
            BattleCommand::EmitEvent(BattleEvent::MultiHitLanded {
                attacker: attacker.name.clone(),
                move_used,
                hits: outcome.hits,
            }),
            BattleCommand::EmitEvent(BattleEvent::MultiHitTotal {
                damage: outcome.total_damage,
            }),
        ]
    } else {
        vec![BattleCommand::EmitEvent(BattleEvent::MoveHit {
            attacker: attacker.name.clone(),
            move_used,
            damage: outcome.total_damage,
            critical: false,
        })]
    };
    commands.extend(effectiveness_event(outcome.effectiveness));
    commands.push(BattleCommand::DealDamage {
        target: PlayerTarget::from_index(context.defender_index),
        amount: outcome.total_damage,
    });
    commands
}
