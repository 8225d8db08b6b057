use schema::SpeciesRef;
use std::path::PathBuf;
use thiserror::Error;

/// Failures from a reference-data lookup. The engine absorbs these with
/// fallback records; they never reach the player.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("species not found: {0}")]
    SpeciesNotFound(SpeciesRef),
    #[error("move not found: {0}")]
    MoveNotFound(String),
    #[error("malformed data in {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Errors from applying a battle command to the state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("no active pokemon for player {0}")]
    NoPokemon(usize),
    #[error("invalid move slot {0}")]
    InvalidMoveSlot(usize),
    #[error("invalid team index {0}")]
    InvalidTeamIndex(usize),
}

pub type DataResult<T> = Result<T, DataError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ExecutionResult<T> = Result<T, ExecutionError>;
