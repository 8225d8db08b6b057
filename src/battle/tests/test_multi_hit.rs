#[cfg(test)]
mod tests {
    use crate::battle::engine::resolve_turn;
    use crate::battle::state::BattleEvent;
    use crate::battle::tests::common::{
        create_test_battle, damaging_move, predictable_rng, scripted_rng, status_move,
        TestPokemonBuilder,
    };
    use crate::player::PlayerAction;
    use crate::pokemon::MoveInstance;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{DamageClass, PokemonType};

    fn battle_with(attack: MoveInstance) -> crate::battle::state::BattleState {
        let mut battle_state = create_test_battle(
            TestPokemonBuilder::new("persian", vec![PokemonType::Fire])
                .with_moves(vec![attack])
                .build(),
            TestPokemonBuilder::new("vulpix", vec![PokemonType::Fire])
                .with_moves(vec![status_move("tail-whip", PokemonType::Normal)])
                .build(),
        );
        battle_state.action_queue[0] = Some(PlayerAction::UseMove { move_index: 0 });
        battle_state.action_queue[1] = Some(PlayerAction::UseMove { move_index: 0 });
        battle_state
    }

    #[rstest]
    #[case(0.1, 2)]
    #[case(0.5, 3)]
    #[case(0.8, 4)]
    #[case(0.95, 5)]
    fn test_variable_hit_count(#[case] count_draw: f64, #[case] expected_hits: u8) {
        let fury_swipes =
            damaging_move("fury-swipes", PokemonType::Normal, DamageClass::Physical, 40, Some(100));
        let mut battle_state = battle_with(fury_swipes);
        // count, accuracy, then (critical, spread) for each sub-hit
        let mut draws = vec![count_draw, 0.5];
        draws.extend(std::iter::repeat(0.5).take(expected_hits as usize * 2));

        let event_bus = resolve_turn(&mut battle_state, &mut scripted_rng(&draws));
        event_bus.print_debug_with_message("Events for test_variable_hit_count:");

        let total = 17 * expected_hits as u16;
        assert!(event_bus.events().contains(&BattleEvent::MultiHitLanded {
            attacker: "persian".to_string(),
            move_used: "fury-swipes".to_string(),
            hits: expected_hits,
        }));
        assert!(event_bus
            .events()
            .contains(&BattleEvent::MultiHitTotal { damage: total }));
        assert_eq!(battle_state.players[1].team[0].current_hp(), 100 - total);
    }

    #[test]
    fn test_sub_hits_roll_their_own_crits() {
        let fury_swipes =
            damaging_move("fury-swipes", PokemonType::Normal, DamageClass::Physical, 40, Some(100));
        let mut battle_state = battle_with(fury_swipes);
        // Two hits; only the second crits: floor(19 * 0.925) + floor(19 * 1.5 * 0.925)
        let mut rng = scripted_rng(&[0.0, 0.5, 0.5, 0.5, 0.0, 0.5]);

        resolve_turn(&mut battle_state, &mut rng);

        assert_eq!(battle_state.players[1].team[0].current_hp(), 100 - (17 + 26));
    }

    #[test]
    fn test_fixed_hit_count_draws_no_count() {
        let double_kick = damaging_move(
            "double-kick",
            PokemonType::Fighting,
            DamageClass::Physical,
            30,
            Some(100),
        );
        let mut battle_state = battle_with(double_kick);

        let event_bus = resolve_turn(&mut battle_state, &mut scripted_rng(&[0.5; 5]));

        // base floor(22 * 30 / 50) + 2 = 15; floor(15 * 0.925) = 13 per kick
        assert_eq!(
            event_bus.messages(&battle_state)[..2],
            [
                "Persian used Double Kick 2 times!".to_string(),
                "It dealt 26 total damage!".to_string()
            ]
        );
    }

    #[test]
    fn test_first_miss_cancels_every_hit() {
        let pin_missile =
            damaging_move("pin-missile", PokemonType::Bug, DamageClass::Physical, 25, Some(95));
        let mut battle_state = battle_with(pin_missile);

        let event_bus = resolve_turn(&mut battle_state, &mut scripted_rng(&[0.0, 0.99]));

        assert!(event_bus.events().contains(&BattleEvent::MoveMissed {
            attacker: "persian".to_string(),
            move_used: "pin-missile".to_string(),
        }));
        assert_eq!(battle_state.players[1].team[0].current_hp(), 100);
    }

    #[test]
    fn test_multi_hit_stops_at_faint() {
        let fury_swipes =
            damaging_move("fury-swipes", PokemonType::Normal, DamageClass::Physical, 40, Some(100));
        let mut battle_state = battle_with(fury_swipes);
        battle_state.players[1].team[0].set_hp(20);

        let event_bus = resolve_turn(&mut battle_state, &mut predictable_rng());

        assert!(battle_state.players[1].team[0].is_fainted());
        assert!(event_bus.events().contains(&BattleEvent::PokemonFainted {
            player_index: 1,
            pokemon: "vulpix".to_string(),
            from_recoil: false,
        }));
    }
}
