use schema::{BaseStats, DamageClass, MoveRecord, PokemonType, SpeciesRecord};

pub const FALLBACK_SPECIES_NAME: &str = "missingno";

/// Stand-in for a species whose lookup failed.
pub fn fallback_species() -> SpeciesRecord {
    SpeciesRecord {
        id: 0,
        name: FALLBACK_SPECIES_NAME.to_string(),
        types: vec![PokemonType::Normal],
        base_stats: BaseStats::uniform(50),
        moves: vec!["tackle".to_string()],
    }
}

/// The move every creature can fall back on when none of its candidates work.
pub fn fallback_move() -> MoveRecord {
    MoveRecord {
        name: "tackle".to_string(),
        move_type: PokemonType::Normal,
        damage_class: DamageClass::Physical,
        power: Some(40),
        accuracy: Some(100),
        max_pp: Some(35),
    }
}
