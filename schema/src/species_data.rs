use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub const fn uniform(value: u8) -> Self {
        Self {
            hp: value,
            attack: value,
            defense: value,
            sp_attack: value,
            sp_defense: value,
            speed: value,
        }
    }

    /// Base stat total, the coarse strength proxy used for opponent scaling.
    pub fn total(&self) -> u16 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
        .iter()
        .map(|stat| *stat as u16)
        .sum()
    }
}

/// Read-only species reference as supplied by a data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: u16,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    /// Candidate move names; the engine picks a random usable subset.
    #[serde(default)]
    pub moves: Vec<String>,
}

impl SpeciesRecord {
    pub fn bst(&self) -> u16 {
        self.base_stats.total()
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }
}

/// Key for a species lookup: national dex number or lowercase kebab-case name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesRef {
    Id(u16),
    Name(String),
}

impl From<u16> for SpeciesRef {
    fn from(id: u16) -> Self {
        SpeciesRef::Id(id)
    }
}

impl From<&str> for SpeciesRef {
    fn from(name: &str) -> Self {
        SpeciesRef::Name(name.to_lowercase())
    }
}

impl fmt::Display for SpeciesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesRef::Id(id) => write!(f, "#{}", id),
            SpeciesRef::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_total_sums_all_six_stats() {
        let stats = BaseStats {
            hp: 45,
            attack: 49,
            defense: 49,
            sp_attack: 65,
            sp_defense: 65,
            speed: 45,
        };
        assert_eq!(stats.total(), 318);
        assert_eq!(BaseStats::uniform(255).total(), 1530);
    }

    #[test]
    fn test_species_ref_display_and_conversion() {
        assert_eq!(SpeciesRef::from(25).to_string(), "#25");
        assert_eq!(SpeciesRef::from("Pikachu"), SpeciesRef::Name("pikachu".to_string()));
    }
}
