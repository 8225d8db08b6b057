//! Run-wide tunables.
//!
//! Every field has a default, so a RON file only needs to name the values it
//! overrides:
//!
//! ```ron
//! (
//!     level: 30,
//!     opponents: (attempts: 100),
//! )
//! ```
//!
//! `RunConfig::from_env` reads the file named by `POKEMON_ROGUELIKE_CONFIG`
//! when that variable is set.

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "POKEMON_ROGUELIKE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Fixed level for every creature in the run.
    pub level: u8,
    pub iv: u8,
    pub ev: u16,
    pub nature: f32,
    pub roster_limit: usize,
    /// Battles a catch stays locked after a successful catch.
    pub catch_cooldown: u8,
    pub message_log_capacity: usize,
    pub rest_sleep_turns: u8,
    pub delayed_damage_turns: u8,
    pub opponents: OpponentScaling,
    pub starters: StarterRules,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            level: 50,
            iv: 31,
            ev: 0,
            nature: 1.0,
            roster_limit: 6,
            catch_cooldown: 3,
            message_log_capacity: 10,
            rest_sleep_turns: 2,
            delayed_damage_turns: 2,
            opponents: OpponentScaling::default(),
            starters: StarterRules::default(),
        }
    }
}

/// Linear BST window for the n-th battle: `[min_base + min_step*(n-1), max_base + max_step*(n-1)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentScaling {
    pub min_base: u16,
    pub min_step: u16,
    pub max_base: u16,
    pub max_step: u16,
    pub attempts: usize,
}

impl Default for OpponentScaling {
    fn default() -> Self {
        Self {
            min_base: 175,
            min_step: 8,
            max_base: 300,
            max_step: 12,
            attempts: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarterRules {
    /// Starters must be strictly stronger than this BST...
    pub weak_threshold: u16,
    /// ...and no stronger than this one.
    pub starter_threshold: u16,
    pub attempts: usize,
}

impl Default for StarterRules {
    fn default() -> Self {
        Self {
            weak_threshold: 330,
            starter_threshold: 450,
            attempts: 10,
        }
    }
}

impl RunConfig {
    pub fn from_ron_str(source: &str, origin: &Path) -> ConfigResult<Self> {
        ron::from_str(source).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents, path)
    }

    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}
