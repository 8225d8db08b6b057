use crate::battle::state::TurnRng;
use crate::pokemon::{MoveInstance, PokemonInst};
use schema::{DamageClass, PokemonType};

/// Attacking stat for a move: physical uses attack, everything else special attack.
pub fn effective_attack(pokemon: &PokemonInst, move_instance: &MoveInstance) -> u16 {
    match move_instance.record.damage_class {
        DamageClass::Physical => pokemon.stats.attack,
        DamageClass::Special | DamageClass::Status => pokemon.stats.sp_attack,
    }
}

pub fn effective_defense(pokemon: &PokemonInst, move_instance: &MoveInstance) -> u16 {
    match move_instance.record.damage_class {
        DamageClass::Physical => pokemon.stats.defense,
        DamageClass::Special | DamageClass::Status => pokemon.stats.sp_defense,
    }
}

pub fn effective_speed(pokemon: &PokemonInst) -> u16 {
    pokemon.stats.speed
}

/// Accuracy roll: a draw in `[0, 100)` above the move's accuracy misses.
/// The draw is always consumed, even for moves that cannot miss.
pub fn move_hits(move_instance: &MoveInstance, rng: &mut TurnRng) -> bool {
    let draw = rng.next_outcome("accuracy") * 100.0;
    let accuracy = move_instance.record.accuracy.unwrap_or(100) as f64;
    draw <= accuracy
}

pub fn get_type_effectiveness(move_type: PokemonType, defender_types: &[PokemonType]) -> f32 {
    PokemonType::effectiveness_against(move_type, defender_types)
}

pub fn is_stab(attacker: &PokemonInst, move_type: PokemonType) -> bool {
    attacker.types.contains(&move_type)
}
