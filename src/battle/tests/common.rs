use crate::battle::state::{BattleState, TurnRng};
use crate::player::BattlePlayer;
use crate::pokemon::{CombatStats, MoveInstance, PokemonInst, StatusCondition};
use schema::{DamageClass, MoveRecord, PokemonType};

/// A builder for creating test Pokemon instances with flat, easy-to-reason-about stats.
///
/// Every stat defaults to 100 at level 50, so a 40-power physical move with no
/// modifiers has a base damage of 19.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("pikachu", vec![PokemonType::Electric])
///     .with_moves(vec![damaging_move("thunderbolt", PokemonType::Electric, DamageClass::Special, 90, Some(100))])
///     .with_status(StatusCondition::Asleep(2))
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    types: Vec<PokemonType>,
    level: u8,
    stats: CombatStats,
    moves: Option<Vec<MoveInstance>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str, types: Vec<PokemonType>) -> Self {
        Self {
            name: name.to_string(),
            types,
            level: 50,
            stats: CombatStats {
                max_hp: 100,
                attack: 100,
                defense: 100,
                sp_attack: 100,
                sp_defense: 100,
                speed: 100,
            },
            moves: None,
            status: None,
            current_hp: None,
        }
    }

    pub fn with_stats(
        mut self,
        hp: u16,
        attack: u16,
        defense: u16,
        sp_attack: u16,
        sp_defense: u16,
        speed: u16,
    ) -> Self {
        self.stats = CombatStats {
            max_hp: hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        };
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    /// Sets the moves for the test Pokemon. Fewer than four are cycled to fill the slots.
    pub fn with_moves(mut self, moves: Vec<MoveInstance>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> PokemonInst {
        let moves = self
            .moves
            .filter(|moves| !moves.is_empty())
            .unwrap_or_else(|| vec![tackle()]);
        let slots: [MoveInstance; 4] =
            std::array::from_fn(|slot| moves[slot % moves.len()].clone());

        let mut pokemon = PokemonInst {
            name: self.name,
            species_id: 0,
            types: self.types,
            level: self.level,
            stats: self.stats,
            current_hp: self.stats.max_hp,
            moves: slots,
            status: self.status,
        };

        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }

        pokemon
    }
}

pub fn damaging_move(
    name: &str,
    move_type: PokemonType,
    damage_class: DamageClass,
    power: u16,
    accuracy: Option<u8>,
) -> MoveInstance {
    MoveInstance::new(MoveRecord {
        name: name.to_string(),
        move_type,
        damage_class,
        power: Some(power),
        accuracy,
        max_pp: Some(10),
    })
}

pub fn status_move(name: &str, move_type: PokemonType) -> MoveInstance {
    MoveInstance::new(MoveRecord {
        name: name.to_string(),
        move_type,
        damage_class: DamageClass::Status,
        power: None,
        accuracy: None,
        max_pp: Some(10),
    })
}

/// Typeless-for-testing tackle: Normal, 40 power, never misses.
pub fn tackle() -> MoveInstance {
    damaging_move("tackle", PokemonType::Normal, DamageClass::Physical, 40, Some(100))
}

pub fn create_test_player(id: &str, name: &str, team: Vec<PokemonInst>) -> BattlePlayer {
    BattlePlayer::new(id.to_string(), name.to_string(), team)
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(p1_pokemon: PokemonInst, p2_pokemon: PokemonInst) -> BattleState {
    create_team_battle(vec![p1_pokemon], p2_pokemon)
}

/// Player side with a full team against a single wild opponent.
pub fn create_team_battle(team: Vec<PokemonInst>, opponent: PokemonInst) -> BattleState {
    let player = create_test_player("player", "Player", team);
    let wild = create_test_player("wild", "Wild", vec![opponent]);
    BattleState::new(player, wild)
}

/// Creates a `TurnRng` with a long list of middling values: every move hits,
/// nothing crits, and damage spread sits at its midpoint.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![0.5; 100])
}

pub fn scripted_rng(outcomes: &[f64]) -> TurnRng {
    TurnRng::new_for_test(outcomes.to_vec())
}
