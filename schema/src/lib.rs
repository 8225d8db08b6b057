// Pokemon Roguelike Schema - shared reference-data shapes
// These are the immutable records a data provider hands to the engine, plus
// the closed table of special move mechanics attached at load time.

pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_data;
pub mod pokemon_types;
pub mod species_data;
