//! Pokemon Roguelike Battle Engine
//!
//! A single-player run of one-on-one wild battles: pick a starter type, beat
//! an endless series of wild opponents scaled by battle number, and grow a
//! roster of up to six by catching what you defeat.

pub mod battle;
pub mod config;
pub mod dex;
pub mod encounters;
pub mod errors;
pub mod player;
pub mod pokemon;
pub mod session;

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, DamageClass, MoveMechanic, MoveRecord, PokemonType, SpeciesRecord, SpeciesRef,
};

// --- From this crate's modules ---
pub use battle::engine::{collect_npc_actions, ready_for_turn_resolution, resolve_turn};
pub use battle::state::{
    BattleEvent, BattleOutcome, BattlePhase, BattleState, EventBus, TurnRng,
};
pub use config::RunConfig;
pub use dex::{DataProvider, LocalDex};
pub use player::{BattlePlayer, PlayerAction};
pub use pokemon::{MoveInstance, PokemonInst, StatusCondition};
pub use session::{BattleSession, SessionSnapshot};

pub use errors::{ConfigError, ConfigResult, DataError, DataResult, ExecutionError, ExecutionResult};
