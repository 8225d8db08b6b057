//! Reference-data access.
//!
//! The engine only ever talks to a [`DataProvider`]. Lookups may suspend and
//! may fail; callers recover through the fallback helpers here instead of
//! surfacing an error.

mod fallback;
mod local;

pub use fallback::{fallback_move, fallback_species, FALLBACK_SPECIES_NAME};
pub use local::LocalDex;

use crate::errors::DataResult;
use async_trait::async_trait;
use schema::{MoveRecord, SpeciesRecord, SpeciesRef};

#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch_species(&self, species: &SpeciesRef) -> DataResult<SpeciesRecord>;

    async fn fetch_move(&self, name: &str) -> DataResult<MoveRecord>;

    /// Dex numbers opponents are sampled from.
    fn species_pool(&self) -> Vec<u16>;
}

/// Looks up a species, substituting the fallback record on any failure.
pub async fn fetch_species_or_fallback(
    provider: &dyn DataProvider,
    species: &SpeciesRef,
) -> SpeciesRecord {
    match provider.fetch_species(species).await {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(%species, error = %err, "species lookup failed, using fallback");
            fallback_species()
        }
    }
}

/// Looks up a move, returning `None` so the caller can skip the candidate.
pub async fn fetch_move_or_skip(provider: &dyn DataProvider, name: &str) -> Option<MoveRecord> {
    match provider.fetch_move(name).await {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::warn!(move_name = name, error = %err, "move lookup failed, skipping");
            None
        }
    }
}
