use crate::errors::{ExecutionError, ExecutionResult};
use crate::pokemon::{PokemonInst, StatusCondition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    UseMove { move_index: usize },
    SwitchPokemon { team_index: usize },
}

/// One side of a battle. The active member is an index into `team`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlePlayer {
    pub player_id: String,
    pub player_name: String,
    pub team: Vec<PokemonInst>,
    pub active_pokemon_index: usize,
}

impl BattlePlayer {
    pub fn new(player_id: String, player_name: String, team: Vec<PokemonInst>) -> Self {
        debug_assert!(!team.is_empty(), "a side needs at least one pokemon");
        Self {
            player_id,
            player_name,
            team,
            active_pokemon_index: 0,
        }
    }

    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        self.team.get(self.active_pokemon_index)
    }

    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        self.team.get_mut(self.active_pokemon_index)
    }

    pub fn living_count(&self) -> usize {
        self.team.iter().filter(|pokemon| !pokemon.is_fainted()).count()
    }

    pub fn is_defeated(&self) -> bool {
        self.living_count() == 0
    }

    pub fn first_living_index(&self) -> Option<usize> {
        self.team.iter().position(|pokemon| !pokemon.is_fainted())
    }

    /// A switch target must exist, be standing, and not already be active.
    pub fn can_switch_to(&self, team_index: usize) -> bool {
        team_index != self.active_pokemon_index
            && self
                .team
                .get(team_index)
                .is_some_and(|pokemon| !pokemon.is_fainted())
    }

    /// Swap the active member. A charge in progress is abandoned by the
    /// outgoing pokemon; sleep stays with it.
    pub fn switch_pokemon(&mut self, team_index: usize) -> ExecutionResult<()> {
        if !self.can_switch_to(team_index) {
            return Err(ExecutionError::InvalidTeamIndex(team_index));
        }
        if let Some(outgoing) = self.active_pokemon_mut() {
            if matches!(outgoing.status, Some(StatusCondition::Charging(_))) {
                outgoing.status = None;
            }
        }
        self.active_pokemon_index = team_index;
        Ok(())
    }
}
