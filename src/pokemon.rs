use crate::config::RunConfig;
use schema::{BaseStats, MoveMechanic, MoveRecord, PokemonType, SpeciesRecord};
use serde::{Deserialize, Serialize};

/// Power assumed for a damaging move whose definition carries none.
pub const DEFAULT_POWER: u16 = 40;
/// Uses granted to a move whose definition carries no PP.
pub const DEFAULT_PP: u8 = 20;

/// Transient per-creature state. Only one can be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    /// Action opportunities left to sleep through.
    Asleep(u8),
    /// Slot of the charge move that will be released on the next action.
    Charging(usize),
}

/// Inputs to the stat formula that stay constant for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatProfile {
    pub level: u8,
    pub iv: u8,
    pub ev: u16,
    pub nature: f32,
}

impl StatProfile {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            level: config.level,
            iv: config.iv,
            ev: config.ev,
            nature: config.nature,
        }
    }
}

impl Default for StatProfile {
    fn default() -> Self {
        Self::from_config(&RunConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl CombatStats {
    /// Gen 3+ formula with fixed IV/EV/nature:
    /// HP = floor((2*B + IV + floor(EV/4)) * L / 100) + L + 10
    /// other = floor((floor((2*B + IV + floor(EV/4)) * L / 100) + 5) * nature)
    pub fn derive(base: &BaseStats, profile: &StatProfile) -> Self {
        let level = profile.level as u32;
        let scaled = |base_stat: u8| -> u32 {
            (2 * base_stat as u32 + profile.iv as u32 + profile.ev as u32 / 4) * level / 100
        };
        let other = |base_stat: u8| -> u16 {
            let raw = (scaled(base_stat) + 5) as f32 * profile.nature;
            raw.floor().clamp(1.0, u16::MAX as f32) as u16
        };

        Self {
            max_hp: (scaled(base.hp) + level + 10).min(u16::MAX as u32) as u16,
            attack: other(base.attack),
            defense: other(base.defense),
            sp_attack: other(base.sp_attack),
            sp_defense: other(base.sp_defense),
            speed: other(base.speed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub record: MoveRecord,
    pub mechanic: MoveMechanic,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP, resolving its mechanic tag.
    pub fn new(record: MoveRecord) -> Self {
        let mechanic = MoveMechanic::for_move(&record.name);
        let pp = record.max_pp.unwrap_or(DEFAULT_PP);
        Self {
            record,
            mechanic,
            pp,
        }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn max_pp(&self) -> u8 {
        self.record.max_pp.unwrap_or(DEFAULT_PP)
    }

    pub fn power(&self) -> u16 {
        self.record.power.unwrap_or(DEFAULT_POWER)
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

    pub fn restore_pp(&mut self) {
        self.pp = self.max_pp();
    }
}

/// A creature taking part in the run: fixed stats, four move slots and one
/// transient status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String,
    pub species_id: u16,
    pub types: Vec<PokemonType>,
    pub level: u8,
    pub stats: CombatStats,
    pub(crate) current_hp: u16,
    pub moves: [MoveInstance; 4],
    pub status: Option<StatusCondition>,
}

impl PokemonInst {
    pub fn new(species: &SpeciesRecord, profile: &StatProfile, moves: [MoveInstance; 4]) -> Self {
        let stats = CombatStats::derive(&species.base_stats, profile);
        Self {
            name: species.name.clone(),
            species_id: species.id,
            types: species.types.clone(),
            level: profile.level,
            stats,
            current_hp: stats.max_hp,
            moves,
            status: None,
        }
    }

    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.max_hp
    }

    pub fn hp_fraction(&self) -> f32 {
        self.current_hp as f32 / self.stats.max_hp.max(1) as f32
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Apply damage, saturating at zero. Returns true if this made the creature faint.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_standing = !self.is_fainted();
        self.current_hp = self.current_hp.saturating_sub(damage);
        debug_assert!(self.current_hp <= self.stats.max_hp);
        was_standing && self.is_fainted()
    }

    pub fn heal_to_full(&mut self) {
        self.current_hp = self.stats.max_hp;
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.stats.max_hp);
    }

    pub fn restore_all_pp(&mut self) {
        for move_instance in self.moves.iter_mut() {
            move_instance.restore_pp();
        }
    }

    /// Between-battle reset: full HP, full PP, no transient status.
    pub fn restore_fully(&mut self) {
        self.heal_to_full();
        self.restore_all_pp();
        self.status = None;
    }

    pub fn charging_slot(&self) -> Option<usize> {
        match self.status {
            Some(StatusCondition::Charging(slot)) => Some(slot),
            _ => None,
        }
    }

    /// A move with no PP left is disabled. A pending charge overrides the
    /// selection, so nothing is disabled while charging.
    pub fn move_selectable(&self, slot: usize) -> bool {
        self.moves
            .get(slot)
            .is_some_and(|move_instance| move_instance.pp > 0 || self.charging_slot().is_some())
    }
}

/// "solar-beam" -> "Solar Beam", "mr-mime" -> "Mr Mime".
pub fn display_name(raw: &str) -> String {
    raw.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::DamageClass;

    fn pikachu() -> SpeciesRecord {
        SpeciesRecord {
            id: 25,
            name: "pikachu".to_string(),
            types: vec![PokemonType::Electric],
            base_stats: BaseStats {
                hp: 35,
                attack: 55,
                defense: 40,
                sp_attack: 50,
                sp_defense: 50,
                speed: 90,
            },
            moves: vec![],
        }
    }

    fn tackle() -> MoveInstance {
        MoveInstance::new(crate::dex::fallback_move())
    }

    #[test]
    fn test_stats_at_level_fifty() {
        let stats = CombatStats::derive(&pikachu().base_stats, &StatProfile::default());

        // HP: (70 + 31) * 50 / 100 = 50, + 60
        assert_eq!(stats.max_hp, 110);
        // Attack: (110 + 31) * 50 / 100 = 70, + 5
        assert_eq!(stats.attack, 75);
        assert_eq!(stats.defense, 60);
        assert_eq!(stats.sp_attack, 70);
        assert_eq!(stats.speed, 110);
    }

    #[test]
    fn test_nature_scales_everything_but_hp() {
        let profile = StatProfile {
            nature: 1.1,
            ..StatProfile::default()
        };
        let stats = CombatStats::derive(&pikachu().base_stats, &profile);
        assert_eq!(stats.max_hp, 110);
        // floor(75 * 1.1) = 82
        assert_eq!(stats.attack, 82);
    }

    #[test]
    fn test_new_pokemon_starts_at_full_hp() {
        let pokemon = PokemonInst::new(
            &pikachu(),
            &StatProfile::default(),
            [tackle(), tackle(), tackle(), tackle()],
        );
        assert_eq!(pokemon.current_hp(), pokemon.max_hp());
        assert_eq!(pokemon.status, None);
        assert_eq!(pokemon.display_name(), "Pikachu");
    }

    #[test]
    fn test_take_damage_saturates_and_reports_faint_once() {
        let mut pokemon = PokemonInst::new(
            &pikachu(),
            &StatProfile::default(),
            [tackle(), tackle(), tackle(), tackle()],
        );
        assert!(!pokemon.take_damage(10));
        assert_eq!(pokemon.current_hp(), 100);
        assert!(pokemon.take_damage(500));
        assert_eq!(pokemon.current_hp(), 0);
        assert!(!pokemon.take_damage(1));
    }

    #[test]
    fn test_pp_never_leaves_bounds() {
        let mut move_instance = MoveInstance::new(MoveRecord {
            name: "rest".to_string(),
            move_type: PokemonType::Psychic,
            damage_class: DamageClass::Status,
            power: None,
            accuracy: None,
            max_pp: Some(1),
        });
        assert_eq!(move_instance.mechanic, MoveMechanic::SleepSelf);
        assert!(move_instance.use_move());
        assert!(!move_instance.use_move());
        assert_eq!(move_instance.pp, 0);
        move_instance.restore_pp();
        assert_eq!(move_instance.pp, 1);
    }

    #[test]
    fn test_empty_moves_are_not_selectable_unless_charging() {
        let mut pokemon = PokemonInst::new(
            &pikachu(),
            &StatProfile::default(),
            [tackle(), tackle(), tackle(), tackle()],
        );
        for move_instance in pokemon.moves.iter_mut() {
            move_instance.pp = 0;
        }
        assert!((0..4).all(|slot| !pokemon.move_selectable(slot)));

        pokemon.status = Some(StatusCondition::Charging(2));
        assert!((0..4).all(|slot| pokemon.move_selectable(slot)));
        assert!(!pokemon.move_selectable(4));
    }

    #[rstest]
    #[case("solar-beam", "Solar Beam")]
    #[case("tackle", "Tackle")]
    #[case("high-jump-kick", "High Jump Kick")]
    fn test_display_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(display_name(raw), expected);
    }
}
