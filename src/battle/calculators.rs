use crate::battle::state::{PendingDelayedEffect, TurnRng};
use crate::battle::stats::{
    effective_attack, effective_defense, get_type_effectiveness, is_stab, move_hits,
};
use crate::pokemon::{MoveInstance, PokemonInst};

pub const CRITICAL_HIT_CHANCE: f64 = 1.0 / 24.0;
pub const CRITICAL_HIT_MULTIPLIER: f64 = 1.5;
pub const STAB_MULTIPLIER: f64 = 1.5;
const SPREAD_MIN: f64 = 0.85;
const SPREAD_WIDTH: f64 = 0.15;

/// Result of resolving a single hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    pub damage: u16,
    pub missed: bool,
    pub critical: bool,
    pub stab: bool,
    pub effectiveness: f32,
}

impl HitOutcome {
    fn miss(effectiveness: f32) -> Self {
        Self {
            damage: 0,
            missed: true,
            critical: false,
            stab: false,
            effectiveness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiHitOutcome {
    pub hits: u8,
    pub total_damage: u16,
    pub missed: bool,
    pub effectiveness: f32,
}

/// `floor(floor(floor(2L/5 + 2) * power * atk / max(1, def)) / 50) + 2`
pub fn base_damage(level: u8, power: u16, attack: u16, defense: u16) -> u32 {
    let level_factor = (2 * level as u32) / 5 + 2;
    let scaled = level_factor * power as u32 * attack as u32 / defense.max(1) as u32;
    scaled / 50 + 2
}

/// Full single-hit resolution: accuracy, then critical, then random spread.
/// A miss consumes only the accuracy draw.
pub fn calculate_hit(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_instance: &MoveInstance,
    rng: &mut TurnRng,
) -> HitOutcome {
    let effectiveness = get_type_effectiveness(move_instance.record.move_type, &defender.types);
    if !move_hits(move_instance, rng) {
        return HitOutcome::miss(effectiveness);
    }
    roll_damage(attacker, defender, move_instance, rng)
}

/// Damage for a hit already known to connect.
pub fn roll_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_instance: &MoveInstance,
    rng: &mut TurnRng,
) -> HitOutcome {
    let base = base_damage(
        attacker.level,
        move_instance.power(),
        effective_attack(attacker, move_instance),
        effective_defense(defender, move_instance),
    );

    let stab = is_stab(attacker, move_instance.record.move_type);
    let effectiveness = get_type_effectiveness(move_instance.record.move_type, &defender.types);
    let critical = rng.next_outcome("critical hit") < CRITICAL_HIT_CHANCE;
    let spread = SPREAD_MIN + rng.next_outcome("damage spread") * SPREAD_WIDTH;

    let stab_multiplier = if stab { STAB_MULTIPLIER } else { 1.0 };
    let crit_multiplier = if critical { CRITICAL_HIT_MULTIPLIER } else { 1.0 };
    let damage =
        (base as f64 * stab_multiplier * effectiveness as f64 * crit_multiplier * spread).floor();

    HitOutcome {
        // A connecting hit always deals at least 1.
        damage: damage.clamp(1.0, u16::MAX as f64) as u16,
        missed: false,
        critical,
        stab,
        effectiveness,
    }
}

/// Weighted hit count over `{min, min+1, max-1, max}` at 3/8, 3/8, 1/8, 1/8.
/// A fixed count consumes no draw.
pub fn roll_hit_count(min: u8, max: u8, rng: &mut TurnRng) -> u8 {
    if min >= max {
        return min;
    }
    let outcome = rng.next_outcome("multi-hit count");
    let hits = if outcome < 0.375 {
        min
    } else if outcome < 0.75 {
        min + 1
    } else if outcome < 0.875 {
        max - 1
    } else {
        max
    };
    hits.clamp(min, max)
}

/// The first sub-hit's accuracy governs the whole move; later sub-hits only
/// re-roll critical and spread.
pub fn resolve_multi_hit(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_instance: &MoveInstance,
    min: u8,
    max: u8,
    rng: &mut TurnRng,
) -> MultiHitOutcome {
    let effectiveness = get_type_effectiveness(move_instance.record.move_type, &defender.types);
    let hit_count = roll_hit_count(min, max, rng);

    if !move_hits(move_instance, rng) {
        return MultiHitOutcome {
            hits: 0,
            total_damage: 0,
            missed: true,
            effectiveness,
        };
    }

    let total_damage = (0..hit_count)
        .map(|_| roll_damage(attacker, defender, move_instance, rng).damage as u32)
        .sum::<u32>();

    MultiHitOutcome {
        hits: hit_count,
        total_damage: total_damage.min(u16::MAX as u32) as u16,
        missed: false,
        effectiveness,
    }
}

/// Reduced rules for a landing delayed attack: base formula only, against the
/// target's current special defense.
pub fn calculate_delayed_damage(effect: &PendingDelayedEffect, defender: &PokemonInst) -> u16 {
    base_damage(
        effect.attacker_level,
        effect.power,
        effect.attacker_sp_attack,
        defender.stats.sp_defense,
    )
    .min(u16::MAX as u32) as u16
}
