//! Where the creatures of a run come from: the starter, each wild opponent,
//! and the four moves every one of them carries.

mod moveset;
mod opponent;
mod starter;

pub use moveset::build_moveset;
pub use opponent::{
    bst_window, prepare_opponent, select_opponent_species, BstWindow, PreparedOpponent,
};
pub use starter::{select_starter, starter_pool, weak_pool};

use crate::battle::state::TurnRng;
use crate::config::RunConfig;
use crate::dex::DataProvider;
use crate::pokemon::{PokemonInst, StatProfile};
use schema::SpeciesRecord;

/// A fresh, fully healed creature of `species` at the run's fixed level.
pub async fn create_pokemon(
    species: &SpeciesRecord,
    config: &RunConfig,
    provider: &dyn DataProvider,
    rng: &mut TurnRng,
) -> PokemonInst {
    let moves = build_moveset(species, provider, rng).await;
    PokemonInst::new(species, &StatProfile::from_config(config), moves)
}
