//! A module for defining AI behaviors for battle opponents.

use crate::battle::state::BattleState;
use crate::player::PlayerAction;
use crate::pokemon::PokemonInst;

/// A trait for any system that can decide on a battle action.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action for the given player.
    fn decide_action(&self, player_index: usize, battle_state: &BattleState) -> PlayerAction;
}

/// Always reaches for the hardest-hitting move it can still use.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerGreedyAI;

impl PowerGreedyAI {
    pub fn new() -> Self {
        Self
    }

    /// Highest listed power among moves with PP left, first slot winning ties.
    /// Moves without a listed power count as 0. With nothing usable, slot 0.
    pub fn choose_move_index(pokemon: &PokemonInst) -> usize {
        let mut best: Option<(usize, u16)> = None;
        for (index, move_instance) in pokemon.moves.iter().enumerate() {
            if move_instance.pp == 0 {
                continue;
            }
            let power = move_instance.record.power.unwrap_or(0);
            if best.is_none_or(|(_, best_power)| power > best_power) {
                best = Some((index, power));
            }
        }
        best.map(|(index, _)| index).unwrap_or(0)
    }
}

impl Behavior for PowerGreedyAI {
    fn decide_action(&self, player_index: usize, battle_state: &BattleState) -> PlayerAction {
        let move_index = battle_state.players[player_index]
            .active_pokemon()
            .map(Self::choose_move_index)
            .unwrap_or(0);
        PlayerAction::UseMove { move_index }
    }
}
