use super::DataProvider;
use crate::errors::{DataError, DataResult};
use async_trait::async_trait;
use schema::{MoveRecord, SpeciesRecord, SpeciesRef};
use std::collections::HashMap;
use std::path::Path;

const BUNDLED_SPECIES: &str = include_str!("../../data/species.ron");
const BUNDLED_MOVES: &str = include_str!("../../data/moves.ron");

/// In-memory dex parsed from RON species and move lists.
#[derive(Debug, Clone, Default)]
pub struct LocalDex {
    species: HashMap<u16, SpeciesRecord>,
    ids_by_name: HashMap<String, u16>,
    moves: HashMap<String, MoveRecord>,
}

impl LocalDex {
    pub fn from_records(species: Vec<SpeciesRecord>, moves: Vec<MoveRecord>) -> Self {
        let mut dex = Self::default();
        for record in species {
            dex.ids_by_name.insert(record.name.clone(), record.id);
            dex.species.insert(record.id, record);
        }
        for record in moves {
            dex.moves.insert(record.name.clone(), record);
        }
        dex
    }

    /// The dex compiled into the binary.
    pub fn bundled() -> DataResult<Self> {
        Self::from_ron_strs(BUNDLED_SPECIES, "species.ron", BUNDLED_MOVES, "moves.ron")
    }

    /// Loads `species.ron` and `moves.ron` from a directory.
    pub fn from_dir(data_path: &Path) -> DataResult<Self> {
        let read = |file: &str| {
            let path = data_path.join(file);
            std::fs::read_to_string(&path).map_err(|source| DataError::Io { path, source })
        };
        let species = read("species.ron")?;
        let moves = read("moves.ron")?;
        Self::from_ron_strs(&species, "species.ron", &moves, "moves.ron")
    }

    fn from_ron_strs(
        species: &str,
        species_origin: &str,
        moves: &str,
        moves_origin: &str,
    ) -> DataResult<Self> {
        let species: Vec<SpeciesRecord> =
            ron::from_str(species).map_err(|source| DataError::Malformed {
                origin: species_origin.to_string(),
                source,
            })?;
        let moves: Vec<MoveRecord> = ron::from_str(moves).map_err(|source| DataError::Malformed {
            origin: moves_origin.to_string(),
            source,
        })?;
        tracing::debug!(
            species = species.len(),
            moves = moves.len(),
            "loaded dex records"
        );
        Ok(Self::from_records(species, moves))
    }

    fn lookup_species(&self, species: &SpeciesRef) -> Option<&SpeciesRecord> {
        match species {
            SpeciesRef::Id(id) => self.species.get(id),
            SpeciesRef::Name(name) => self
                .ids_by_name
                .get(&name.to_lowercase())
                .and_then(|id| self.species.get(id)),
        }
    }
}

#[async_trait]
impl DataProvider for LocalDex {
    async fn fetch_species(&self, species: &SpeciesRef) -> DataResult<SpeciesRecord> {
        self.lookup_species(species)
            .cloned()
            .ok_or_else(|| DataError::SpeciesNotFound(species.clone()))
    }

    async fn fetch_move(&self, name: &str) -> DataResult<MoveRecord> {
        self.moves
            .get(name)
            .cloned()
            .ok_or_else(|| DataError::MoveNotFound(name.to_string()))
    }

    fn species_pool(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.species.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
