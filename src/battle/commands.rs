use crate::battle::state::{BattleEvent, BattleState, EventBus, PendingDelayedEffect};
use crate::errors::{ExecutionError, ExecutionResult};
use crate::pokemon::{PokemonInst, StatusCondition};

/// Player target for commands - provides type safety over raw indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTarget {
    Player1,
    Player2,
}

impl PlayerTarget {
    pub fn to_index(self) -> usize {
        match self {
            PlayerTarget::Player1 => 0,
            PlayerTarget::Player2 => 1,
        }
    }

    /// Callers pass `PLAYER_SIDE` or `OPPONENT_SIDE`; a battle has no other side.
    pub fn from_index(index: usize) -> PlayerTarget {
        match index {
            0 => PlayerTarget::Player1,
            1 => PlayerTarget::Player2,
            _ => unreachable!("player index {} is not a battle side", index),
        }
    }
}

/// Atomic state changes produced by move resolution. Calculations read the
/// state; only the executor writes it.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    DealDamage {
        target: PlayerTarget,
        amount: u16,
    },
    HealToFull {
        target: PlayerTarget,
    },
    SetPokemonStatus {
        target: PlayerTarget,
        status: Option<StatusCondition>,
    },
    UsePP {
        target: PlayerTarget,
        move_slot: usize,
    },
    QueueDelayedEffect(PendingDelayedEffect),
    EmitEvent(BattleEvent),
}

/// Execute a batch of commands in order, stopping at the first failure.
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> ExecutionResult<()> {
    for command in commands {
        execute_command(command, state, bus)?;
    }
    Ok(())
}

/// Helper function to execute commands that operate on the active Pokemon
fn execute_pokemon_command<F>(
    target: PlayerTarget,
    state: &mut BattleState,
    operation: F,
) -> ExecutionResult<()>
where
    F: FnOnce(&mut PokemonInst) -> ExecutionResult<()>,
{
    let player_index = target.to_index();
    match state.players[player_index].active_pokemon_mut() {
        Some(pokemon) => operation(pokemon),
        None => Err(ExecutionError::NoPokemon(player_index)),
    }
}

pub fn execute_command(
    command: BattleCommand,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> ExecutionResult<()> {
    match command {
        BattleCommand::EmitEvent(event) => {
            bus.push(event);
            Ok(())
        }
        BattleCommand::DealDamage { target, amount } => {
            execute_pokemon_command(target, state, |pokemon| {
                pokemon.take_damage(amount);
                Ok(())
            })
        }
        BattleCommand::HealToFull { target } => execute_pokemon_command(target, state, |pokemon| {
            pokemon.heal_to_full();
            Ok(())
        }),
        BattleCommand::SetPokemonStatus { target, status } => {
            execute_pokemon_command(target, state, |pokemon| {
                pokemon.status = status;
                Ok(())
            })
        }
        BattleCommand::UsePP { target, move_slot } => {
            execute_pokemon_command(target, state, |pokemon| {
                let move_instance = pokemon
                    .moves
                    .get_mut(move_slot)
                    .ok_or(ExecutionError::InvalidMoveSlot(move_slot))?;
                if move_instance.use_move() {
                    Ok(())
                } else {
                    Err(ExecutionError::InvalidMoveSlot(move_slot))
                }
            })
        }
        BattleCommand::QueueDelayedEffect(effect) => {
            state.pending_effects.push(effect);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use schema::PokemonType;

    fn create_test_battle_state() -> BattleState {
        create_test_battle(
            TestPokemonBuilder::new("pikachu", vec![PokemonType::Electric]).build(),
            TestPokemonBuilder::new("charmander", vec![PokemonType::Fire]).build(),
        )
    }

    #[test]
    fn test_player_target_conversion() {
        assert_eq!(PlayerTarget::from_index(0), PlayerTarget::Player1);
        assert_eq!(PlayerTarget::from_index(1), PlayerTarget::Player2);
        assert_eq!(PlayerTarget::Player2.to_index(), 1);
    }

    #[test]
    #[should_panic(expected = "player index 2 is not a battle side")]
    fn test_player_target_rejects_a_third_side() {
        PlayerTarget::from_index(2);
    }

    #[test]
    fn test_deal_damage_saturates_at_zero() {
        let mut state = create_test_battle_state();
        let mut bus = EventBus::new();

        execute_command(
            BattleCommand::DealDamage {
                target: PlayerTarget::Player2,
                amount: 1000,
            },
            &mut state,
            &mut bus,
        )
        .expect("damage applies");

        let defender = state.players[1].active_pokemon().expect("active");
        assert_eq!(defender.current_hp(), 0);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_use_pp_on_empty_slot_fails() {
        let mut state = create_test_battle_state();
        let mut bus = EventBus::new();
        state.players[0].team[0].moves[0].pp = 0;

        let result = execute_command(
            BattleCommand::UsePP {
                target: PlayerTarget::Player1,
                move_slot: 0,
            },
            &mut state,
            &mut bus,
        );

        assert_eq!(result, Err(ExecutionError::InvalidMoveSlot(0)));
    }

    #[test]
    fn test_batch_applies_in_order() {
        let mut state = create_test_battle_state();
        let mut bus = EventBus::new();

        execute_command_batch(
            vec![
                BattleCommand::DealDamage {
                    target: PlayerTarget::Player1,
                    amount: 50,
                },
                BattleCommand::HealToFull {
                    target: PlayerTarget::Player1,
                },
                BattleCommand::SetPokemonStatus {
                    target: PlayerTarget::Player1,
                    status: Some(StatusCondition::Asleep(2)),
                },
                BattleCommand::EmitEvent(BattleEvent::TurnEnded),
            ],
            &mut state,
            &mut bus,
        )
        .expect("batch applies");

        let pokemon = state.players[0].active_pokemon().expect("active");
        assert_eq!(pokemon.current_hp(), pokemon.max_hp());
        assert_eq!(pokemon.status, Some(StatusCondition::Asleep(2)));
        assert_eq!(bus.events(), &[BattleEvent::TurnEnded]);
    }
}
