use crate::battle::state::{BattleEvent, EventBus};
use crate::errors::{ExecutionError, ExecutionResult};
use crate::player::BattlePlayer;
use crate::pokemon::PokemonInst;

/// What happened to an accepted catch.
#[derive(Debug, Clone, PartialEq)]
pub enum CatchResolution {
    /// The catch was appended to the roster at this index.
    Joined { team_index: usize },
    /// The roster is full; the catch waits for the player to pick a member to release.
    RosterFull(PokemonInst),
}

/// The defeated opponent as it joins a roster: half its max HP, every move
/// refilled, nothing transient carried over.
pub fn prepare_caught_pokemon(defeated: &PokemonInst) -> PokemonInst {
    let mut caught = defeated.clone();
    caught.restore_fully();
    caught.set_hp(caught.max_hp() / 2);
    caught
}

pub fn add_caught_pokemon(
    player: &mut BattlePlayer,
    caught: PokemonInst,
    roster_limit: usize,
    bus: &mut EventBus,
) -> CatchResolution {
    if player.team.len() >= roster_limit {
        return CatchResolution::RosterFull(caught);
    }

    bus.push(BattleEvent::PokemonCaught {
        pokemon: caught.name.clone(),
    });
    player.team.push(caught);
    CatchResolution::Joined {
        team_index: player.team.len() - 1,
    }
}

/// Release the member at `team_index` in favour of the caught pokemon, which
/// takes over the same slot. Returns the released member.
pub fn replace_team_member(
    player: &mut BattlePlayer,
    team_index: usize,
    caught: PokemonInst,
    bus: &mut EventBus,
) -> ExecutionResult<PokemonInst> {
    let slot = player
        .team
        .get_mut(team_index)
        .ok_or(ExecutionError::InvalidTeamIndex(team_index))?;

    let caught_name = caught.name.clone();
    let released = std::mem::replace(slot, caught);

    bus.push(BattleEvent::PokemonCaught {
        pokemon: caught_name.clone(),
    });
    bus.push(BattleEvent::PokemonReleased {
        released: released.name.clone(),
        caught: caught_name,
    });
    Ok(released)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_player, TestPokemonBuilder};
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use schema::PokemonType;

    fn member(name: &str) -> PokemonInst {
        TestPokemonBuilder::new(name, vec![PokemonType::Normal]).build()
    }

    #[test]
    fn test_caught_pokemon_joins_at_half_hp() {
        let defeated = TestPokemonBuilder::new("rattata", vec![PokemonType::Normal])
            .with_stats(101, 100, 100, 100, 100, 100)
            .with_hp(0)
            .with_status(StatusCondition::Asleep(1))
            .build();

        let caught = prepare_caught_pokemon(&defeated);

        assert_eq!(caught.current_hp(), 50);
        assert_eq!(caught.status, None);
        assert!(!caught.is_fainted());
    }

    #[test]
    fn test_catch_appends_when_there_is_room() {
        let mut player = create_test_player("player", "Player", vec![member("pikachu")]);
        let mut bus = EventBus::new();

        let resolution = add_caught_pokemon(&mut player, member("rattata"), 6, &mut bus);

        assert_eq!(resolution, CatchResolution::Joined { team_index: 1 });
        assert_eq!(player.team.len(), 2);
        assert_eq!(
            bus.events(),
            &[BattleEvent::PokemonCaught {
                pokemon: "rattata".to_string()
            }]
        );
    }

    #[test]
    fn test_full_roster_hands_the_catch_back() {
        let team = (0..6).map(|i| member(&format!("member-{}", i))).collect();
        let mut player = create_test_player("player", "Player", team);
        let mut bus = EventBus::new();

        let resolution = add_caught_pokemon(&mut player, member("rattata"), 6, &mut bus);

        assert!(matches!(resolution, CatchResolution::RosterFull(ref p) if p.name == "rattata"));
        assert_eq!(player.team.len(), 6);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_replacement_takes_the_released_slot() {
        let mut player = create_test_player(
            "player",
            "Player",
            vec![member("pikachu"), member("squirtle"), member("oddish")],
        );
        let mut bus = EventBus::new();

        let released =
            replace_team_member(&mut player, 1, member("rattata"), &mut bus).expect("valid index");

        assert_eq!(released.name, "squirtle");
        assert_eq!(player.team[1].name, "rattata");
        assert_eq!(player.team.len(), 3);
        assert_eq!(bus.len(), 2);
    }

    #[test]
    fn test_replacement_rejects_out_of_range_index() {
        let mut player = create_test_player("player", "Player", vec![member("pikachu")]);
        let mut bus = EventBus::new();

        let result = replace_team_member(&mut player, 4, member("rattata"), &mut bus);

        assert_eq!(result, Err(ExecutionError::InvalidTeamIndex(4)));
        assert_eq!(player.team[0].name, "pikachu");
    }
}
