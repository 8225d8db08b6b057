use crate::battle::ai::{Behavior, PowerGreedyAI};
use crate::battle::calculators::calculate_delayed_damage;
use crate::battle::commands::{execute_command_batch, BattleCommand, PlayerTarget};
use crate::battle::move_effects::{resolve_move, EffectContext};
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleOutcome, BattlePhase, BattleState, EventBus, TurnRng,
    OPPONENT_SIDE, PLAYER_SIDE,
};
use crate::battle::stats::effective_speed;
use crate::errors::{ExecutionError, ExecutionResult};
use crate::player::PlayerAction;
use crate::pokemon::StatusCondition;

/// Queue the wild side's action for the coming turn. A side that is charging
/// still gets an action queued; the engine redirects it to the charge slot.
pub fn collect_npc_actions(battle_state: &mut BattleState) {
    let ai_brain = PowerGreedyAI::new();
    if battle_state.action_queue[OPPONENT_SIDE].is_none() {
        let action = ai_brain.decide_action(OPPONENT_SIDE, battle_state);
        tracing::debug!(?action, "opponent action chosen");
        battle_state.action_queue[OPPONENT_SIDE] = Some(action);
    }
}

/// Checks a player action against the current state without applying it.
pub fn validate_player_action(
    battle_state: &BattleState,
    player_index: usize,
    action: &PlayerAction,
) -> ExecutionResult<()> {
    let player = &battle_state.players[player_index];
    match action {
        PlayerAction::UseMove { move_index } => {
            let pokemon = player
                .active_pokemon()
                .ok_or(ExecutionError::NoPokemon(player_index))?;
            if *move_index >= pokemon.moves.len() {
                return Err(ExecutionError::InvalidMoveSlot(*move_index));
            }
        }
        PlayerAction::SwitchPokemon { team_index } => {
            if !player.can_switch_to(*team_index) {
                return Err(ExecutionError::InvalidTeamIndex(*team_index));
            }
        }
    }
    Ok(())
}

pub fn ready_for_turn_resolution(battle_state: &BattleState) -> bool {
    battle_state.phase == BattlePhase::SelectMove
        && battle_state.action_queue.iter().all(Option::is_some)
}

/// Main entry point for turn resolution.
/// Executes one complete turn from the queued actions and returns every event
/// that occurred, in order.
pub fn resolve_turn(battle_state: &mut BattleState, rng: &mut TurnRng) -> EventBus {
    let mut bus = EventBus::new();

    // 1. Initialization
    initialize_turn(battle_state, &mut bus);

    // 2. Switches resolve before any move
    let move_actions = execute_switch_phase(battle_state, &mut bus);

    // 3. Moves in speed order, stopping at the first faint
    let action_order = determine_action_order(battle_state, &move_actions);
    let battle_interrupted = execute_move_phase(battle_state, &action_order, &mut bus, rng);

    // 4. Delayed attacks only tick when both sides are still standing
    if !battle_interrupted {
        execute_end_turn_phase(battle_state, &mut bus);
    }

    // 5. Cleanup & next phase
    finalize_turn(battle_state, &mut bus);

    bus
}

/// Put a living team member in after the active one fainted. Ends the
/// `PokemonSelection` phase.
pub fn send_out_replacement(
    battle_state: &mut BattleState,
    team_index: usize,
) -> ExecutionResult<EventBus> {
    let mut bus = EventBus::new();
    perform_switch(battle_state, PLAYER_SIDE, team_index, true, &mut bus)?;
    battle_state.phase = BattlePhase::SelectMove;
    Ok(bus)
}

fn initialize_turn(battle_state: &mut BattleState, bus: &mut EventBus) {
    battle_state.phase = BattlePhase::Executing;
    bus.push(BattleEvent::TurnStarted {
        turn_number: battle_state.turn_number,
    });
}

fn execute_switch_phase(battle_state: &mut BattleState, bus: &mut EventBus) -> Vec<(usize, usize)> {
    let mut move_actions = Vec::new();
    for player_index in 0..battle_state.players.len() {
        match battle_state.action_queue[player_index].take() {
            Some(PlayerAction::SwitchPokemon { team_index }) => {
                if let Err(err) = perform_switch(battle_state, player_index, team_index, false, bus)
                {
                    report_invariant_violation("queued switch", &err);
                }
            }
            Some(PlayerAction::UseMove { move_index }) => {
                move_actions.push((player_index, move_index));
            }
            None => {}
        }
    }
    move_actions
}

fn perform_switch(
    battle_state: &mut BattleState,
    player_index: usize,
    team_index: usize,
    forced: bool,
    bus: &mut EventBus,
) -> ExecutionResult<()> {
    let player = &mut battle_state.players[player_index];
    let old_pokemon = player
        .active_pokemon()
        .map(|pokemon| pokemon.name.clone())
        .unwrap_or_default();
    player.switch_pokemon(team_index)?;
    let new_pokemon = player.team[team_index].name.clone();

    bus.push(BattleEvent::PokemonSwitched {
        player_index,
        old_pokemon,
        new_pokemon,
        forced,
    });
    Ok(())
}

/// Faster side first; the player wins speed ties.
pub fn determine_action_order(
    battle_state: &BattleState,
    move_actions: &[(usize, usize)],
) -> Vec<(usize, usize)> {
    let speed_of = |player_index: usize| {
        battle_state.players[player_index]
            .active_pokemon()
            .map(effective_speed)
            .unwrap_or(0)
    };

    let mut ordered = move_actions.to_vec();
    ordered.sort_by(|(a, _), (b, _)| speed_of(*b).cmp(&speed_of(*a)).then(a.cmp(b)));
    ordered
}

/// Returns true when a faint cut the phase short.
fn execute_move_phase(
    battle_state: &mut BattleState,
    action_order: &[(usize, usize)],
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> bool {
    for &(player_index, move_index) in action_order {
        execute_move_action(battle_state, player_index, move_index, bus, rng);
        if announce_faints(battle_state, player_index, bus) {
            return true;
        }
    }
    false
}

fn execute_move_action(
    battle_state: &mut BattleState,
    player_index: usize,
    move_index: usize,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) {
    let attacker_target = PlayerTarget::from_index(player_index);
    let Some(attacker) = battle_state.players[player_index].active_pokemon() else {
        report_invariant_violation("move action", &ExecutionError::NoPokemon(player_index));
        return;
    };
    if attacker.is_fainted() {
        return;
    }
    let attacker_name = attacker.name.clone();

    // Sleep consumes the action opportunity
    if let Some(StatusCondition::Asleep(turns)) = attacker.status {
        let remaining = turns.saturating_sub(1);
        let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::ActionFailed {
            pokemon: attacker_name.clone(),
            reason: ActionFailureReason::IsAsleep,
        })];
        if remaining == 0 {
            commands.push(BattleCommand::SetPokemonStatus {
                target: attacker_target,
                status: None,
            });
            commands.push(BattleCommand::EmitEvent(BattleEvent::WokeUp {
                pokemon: attacker_name,
            }));
        } else {
            commands.push(BattleCommand::SetPokemonStatus {
                target: attacker_target,
                status: Some(StatusCondition::Asleep(remaining)),
            });
        }
        run_commands(commands, battle_state, bus);
        return;
    }

    // A pending charge overrides whatever was selected and costs no PP
    let (move_slot, releasing_charge) = match attacker.charging_slot() {
        Some(slot) => (slot, true),
        None => (move_index, false),
    };
    let Some(move_instance) = attacker.moves.get(move_slot) else {
        report_invariant_violation("move action", &ExecutionError::InvalidMoveSlot(move_slot));
        return;
    };

    if !releasing_charge && move_instance.pp == 0 {
        bus.push(BattleEvent::ActionFailed {
            pokemon: attacker_name,
            reason: ActionFailureReason::NoPPRemaining {
                move_used: move_instance.name().to_string(),
            },
        });
        return;
    }

    let mut commands = Vec::new();
    if !releasing_charge {
        commands.push(BattleCommand::UsePP {
            target: attacker_target,
            move_slot,
        });
    }

    let context = EffectContext::new(player_index, 1 - player_index, move_slot);
    commands.extend(resolve_move(&context, battle_state, rng));
    run_commands(commands, battle_state, bus);
}

/// Defender first, then the attacker (who can only go down to recoil or a crash).
fn announce_faints(battle_state: &BattleState, attacker_index: usize, bus: &mut EventBus) -> bool {
    let mut any_fainted = false;
    for (player_index, from_recoil) in [(1 - attacker_index, false), (attacker_index, true)] {
        if let Some(pokemon) = battle_state.players[player_index].active_pokemon() {
            if pokemon.is_fainted() {
                bus.push(BattleEvent::PokemonFainted {
                    player_index,
                    pokemon: pokemon.name.clone(),
                    from_recoil,
                });
                any_fainted = true;
            }
        }
    }
    any_fainted
}

/// Tick every pending delayed attack, then land the ones that are due in the
/// order they were queued. A faint stops the phase; the rest stay due.
fn execute_end_turn_phase(battle_state: &mut BattleState, bus: &mut EventBus) {
    for effect in battle_state.pending_effects.iter_mut() {
        effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
    }

    let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut battle_state.pending_effects)
        .into_iter()
        .partition(|effect| effect.turns_remaining == 0);
    battle_state.pending_effects = waiting;

    let mut due = due.into_iter();
    while let Some(effect) = due.next() {
        let target_index = effect.target_player;
        let Some(target) = battle_state.players[target_index].active_pokemon() else {
            continue;
        };
        let target_name = target.name.clone();
        let damage = calculate_delayed_damage(&effect, target);

        run_commands(
            vec![
                BattleCommand::EmitEvent(BattleEvent::DelayedAttackLanded {
                    target: target_name.clone(),
                    move_used: effect.move_used.clone(),
                    damage,
                }),
                BattleCommand::DealDamage {
                    target: PlayerTarget::from_index(target_index),
                    amount: damage,
                },
            ],
            battle_state,
            bus,
        );

        let target_fainted = battle_state.players[target_index]
            .active_pokemon()
            .is_some_and(|pokemon| pokemon.is_fainted());
        if target_fainted {
            bus.push(BattleEvent::PokemonFainted {
                player_index: target_index,
                pokemon: target_name,
                from_recoil: false,
            });
            let mut unresolved: Vec<_> = due.collect();
            unresolved.append(&mut battle_state.pending_effects);
            battle_state.pending_effects = unresolved;
            return;
        }
    }
}

fn finalize_turn(battle_state: &mut BattleState, bus: &mut EventBus) {
    battle_state.action_queue = [None, None];
    bus.push(BattleEvent::TurnEnded);
    battle_state.turn_number += 1;
    battle_state.phase = next_phase(battle_state, bus);
}

/// Defeat outranks victory when both sides run out on the same turn.
fn next_phase(battle_state: &mut BattleState, bus: &mut EventBus) -> BattlePhase {
    let opponent_name = battle_state
        .opponent()
        .active_pokemon()
        .map(|pokemon| pokemon.name.clone())
        .unwrap_or_default();

    if battle_state.player().is_defeated() {
        bus.push(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Defeat,
            opponent: opponent_name,
        });
        return BattlePhase::BattleEnd(BattleOutcome::Defeat);
    }

    if battle_state.opponent().is_defeated() {
        // Leave a standing pokemon in front for whatever comes next
        let player = &mut battle_state.players[PLAYER_SIDE];
        if player.active_pokemon().is_none_or(|pokemon| pokemon.is_fainted()) {
            if let Some(index) = player.first_living_index() {
                player.active_pokemon_index = index;
            }
        }
        bus.push(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Victory,
            opponent: opponent_name,
        });
        return BattlePhase::BattleEnd(BattleOutcome::Victory);
    }

    for player_index in [OPPONENT_SIDE, PLAYER_SIDE] {
        let player = &battle_state.players[player_index];
        let active_fainted = player
            .active_pokemon()
            .is_none_or(|pokemon| pokemon.is_fainted());
        if !active_fainted {
            continue;
        }

        // The wild side, or a player with a single choice left, is switched automatically
        if player_index == OPPONENT_SIDE || player.living_count() == 1 {
            if let Some(index) = player.first_living_index() {
                if let Err(err) = perform_switch(battle_state, player_index, index, true, bus) {
                    report_invariant_violation("forced switch", &err);
                }
            }
        } else {
            return BattlePhase::PokemonSelection;
        }
    }

    BattlePhase::SelectMove
}

fn run_commands(commands: Vec<BattleCommand>, battle_state: &mut BattleState, bus: &mut EventBus) {
    if let Err(err) = execute_command_batch(commands, battle_state, bus) {
        report_invariant_violation("command batch", &err);
    }
}

/// Internal consistency failures are fatal in debug builds and logged in release.
fn report_invariant_violation(context: &str, err: &ExecutionError) {
    tracing::error!(context, error = %err, "battle state invariant violated");
    if cfg!(debug_assertions) {
        panic!("{}: {}", context, err);
    }
}
