#[cfg(test)]
mod tests {
    use crate::battle::engine::{determine_action_order, resolve_turn, validate_player_action};
    use crate::battle::state::{
        ActionFailureReason, BattleEvent, BattlePhase, BattleState,
    };
    use crate::battle::tests::common::{
        create_test_battle, damaging_move, predictable_rng, scripted_rng, status_move, tackle,
        TestPokemonBuilder,
    };
    use crate::errors::ExecutionError;
    use crate::player::PlayerAction;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{DamageClass, PokemonType};

    fn pikachu_vs_charmander() -> BattleState {
        create_test_battle(
            TestPokemonBuilder::new("pikachu", vec![PokemonType::Electric]).build(),
            TestPokemonBuilder::new("charmander", vec![PokemonType::Fire]).build(),
        )
    }

    fn queue_moves(battle_state: &mut BattleState, player_move: usize, opponent_move: usize) {
        battle_state.action_queue[0] = Some(PlayerAction::UseMove {
            move_index: player_move,
        });
        battle_state.action_queue[1] = Some(PlayerAction::UseMove {
            move_index: opponent_move,
        });
    }

    #[test]
    fn test_basic_turn_both_sides_attack() {
        // Arrange
        let mut battle_state = pikachu_vs_charmander();
        queue_moves(&mut battle_state, 0, 0);
        let mut rng = predictable_rng();

        // Act
        let event_bus = resolve_turn(&mut battle_state, &mut rng);

        // Assert
        event_bus.print_debug_with_message("Events for test_basic_turn_both_sides_attack:");

        // Neither side has STAB on tackle: floor(19 * 0.925) = 17
        assert_eq!(
            event_bus.events(),
            &[
                BattleEvent::TurnStarted { turn_number: 1 },
                BattleEvent::MoveHit {
                    attacker: "pikachu".to_string(),
                    move_used: "tackle".to_string(),
                    damage: 17,
                    critical: false,
                },
                BattleEvent::MoveHit {
                    attacker: "charmander".to_string(),
                    move_used: "tackle".to_string(),
                    damage: 17,
                    critical: false,
                },
                BattleEvent::TurnEnded,
            ]
        );
        assert_eq!(battle_state.players[0].team[0].current_hp(), 83);
        assert_eq!(battle_state.players[1].team[0].current_hp(), 83);
        assert_eq!(battle_state.players[0].team[0].moves[0].pp, 9);
    }

    #[test]
    fn test_turn_bookkeeping() {
        let mut battle_state = pikachu_vs_charmander();
        queue_moves(&mut battle_state, 0, 0);

        resolve_turn(&mut battle_state, &mut predictable_rng());

        assert_eq!(battle_state.turn_number, 2);
        assert_eq!(battle_state.phase, BattlePhase::SelectMove);
        assert_eq!(battle_state.action_queue, [None, None]);
    }

    #[rstest]
    #[case("faster opponent moves first", 100, 150, vec![1, 0])]
    #[case("faster player moves first", 150, 100, vec![0, 1])]
    #[case("player wins speed ties", 100, 100, vec![0, 1])]
    fn test_action_order_by_speed(
        #[case] desc: &str,
        #[case] player_speed: u16,
        #[case] opponent_speed: u16,
        #[case] expected_order: Vec<usize>,
    ) {
        let battle_state = create_test_battle(
            TestPokemonBuilder::new("pikachu", vec![PokemonType::Electric])
                .with_speed(player_speed)
                .build(),
            TestPokemonBuilder::new("charmander", vec![PokemonType::Fire])
                .with_speed(opponent_speed)
                .build(),
        );

        let order: Vec<usize> = determine_action_order(&battle_state, &[(0, 0), (1, 0)])
            .into_iter()
            .map(|(player_index, _)| player_index)
            .collect();

        assert_eq!(order, expected_order, "{}", desc);
    }

    #[test]
    fn test_super_effective_hit_reports_effectiveness() {
        let water_gun =
            damaging_move("water-gun", PokemonType::Water, DamageClass::Special, 40, Some(100));
        let mut battle_state = create_test_battle(
            TestPokemonBuilder::new("squirtle", vec![PokemonType::Water])
                .with_moves(vec![water_gun])
                .build(),
            TestPokemonBuilder::new("charmander", vec![PokemonType::Fire])
                .with_moves(vec![status_move("growl", PokemonType::Normal)])
                .build(),
        );
        queue_moves(&mut battle_state, 0, 0);

        let event_bus = resolve_turn(&mut battle_state, &mut predictable_rng());

        // floor(19 * 1.5 * 2 * 0.925) = 52
        assert_eq!(battle_state.players[1].team[0].current_hp(), 48);
        let messages = event_bus.messages(&battle_state);
        assert_eq!(
            messages,
            vec![
                "Squirtle used Water Gun for 52 damage!".to_string(),
                "It's super effective!".to_string(),
                "Charmander used Growl! But nothing happened.".to_string(),
            ]
        );
    }

    #[test]
    fn test_miss_leaves_defender_untouched() {
        let mega_kick =
            damaging_move("mega-kick", PokemonType::Normal, DamageClass::Physical, 120, Some(75));
        let mut battle_state = create_test_battle(
            TestPokemonBuilder::new("machop", vec![PokemonType::Fighting])
                .with_moves(vec![mega_kick])
                .build(),
            TestPokemonBuilder::new("charmander", vec![PokemonType::Fire]).build(),
        );
        queue_moves(&mut battle_state, 0, 0);
        // Player: accuracy roll of 0.8 misses 75%. Opponent: accuracy, crit, spread.
        let mut rng = scripted_rng(&[0.8, 0.5, 0.5, 0.5]);

        let event_bus = resolve_turn(&mut battle_state, &mut rng);

        assert!(event_bus.events().contains(&BattleEvent::MoveMissed {
            attacker: "machop".to_string(),
            move_used: "mega-kick".to_string(),
        }));
        assert_eq!(battle_state.players[1].team[0].current_hp(), 100);
        // PP is spent even on a miss
        assert_eq!(battle_state.players[0].team[0].moves[0].pp, 9);
    }

    #[test]
    fn test_move_without_pp_fails_but_turn_continues() {
        let mut battle_state = pikachu_vs_charmander();
        for move_instance in battle_state.players[0].team[0].moves.iter_mut() {
            move_instance.pp = 0;
        }
        queue_moves(&mut battle_state, 0, 0);

        let event_bus = resolve_turn(&mut battle_state, &mut predictable_rng());

        assert_eq!(
            event_bus.events()[1],
            BattleEvent::ActionFailed {
                pokemon: "pikachu".to_string(),
                reason: ActionFailureReason::NoPPRemaining {
                    move_used: "tackle".to_string()
                },
            }
        );
        assert_eq!(battle_state.players[1].team[0].current_hp(), 100);
        assert_eq!(battle_state.players[0].team[0].current_hp(), 83);
    }

    #[test]
    fn test_validate_player_action() {
        let battle_state = pikachu_vs_charmander();

        assert_eq!(
            validate_player_action(&battle_state, 0, &PlayerAction::UseMove { move_index: 3 }),
            Ok(())
        );
        assert_eq!(
            validate_player_action(&battle_state, 0, &PlayerAction::UseMove { move_index: 4 }),
            Err(ExecutionError::InvalidMoveSlot(4))
        );
        assert_eq!(
            validate_player_action(
                &battle_state,
                0,
                &PlayerAction::SwitchPokemon { team_index: 0 },
            ),
            Err(ExecutionError::InvalidTeamIndex(0))
        );
    }

    #[test]
    fn test_seeded_battle_is_reproducible() {
        let run = |seed: u64| {
            let mut battle_state = create_test_battle(
                TestPokemonBuilder::new("pikachu", vec![PokemonType::Electric])
                    .with_moves(vec![tackle()])
                    .build(),
                TestPokemonBuilder::new("charmander", vec![PokemonType::Fire]).build(),
            );
            let mut rng = crate::battle::state::TurnRng::from_seed(seed);
            let mut transcript = Vec::new();
            while battle_state.phase == BattlePhase::SelectMove {
                queue_moves(&mut battle_state, 0, 0);
                transcript.extend(resolve_turn(&mut battle_state, &mut rng).events().to_vec());
            }
            transcript
        };

        assert_eq!(run(42), run(42));
    }
}
