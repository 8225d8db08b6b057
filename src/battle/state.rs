use crate::config::RunConfig;
use crate::player::{BattlePlayer, PlayerAction};
use crate::pokemon::display_name;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Index of the human side in `BattleState::players`.
pub const PLAYER_SIDE: usize = 0;
/// Index of the wild opponent.
pub const OPPONENT_SIDE: usize = 1;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Gates which commands are legal between turns.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    SelectMove,
    Executing,
    /// The active pokemon fainted and the player must pick a living replacement.
    PokemonSelection,
    /// A catch was accepted with a full roster; the player picks who to release.
    ReplacementSelection,
    BattleEnd(BattleOutcome),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ActionFailureReason {
    IsAsleep,
    NoPPRemaining { move_used: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Attacks
    MoveHit {
        attacker: String,
        move_used: String,
        damage: u16,
        critical: bool,
    },
    MoveMissed {
        attacker: String,
        move_used: String,
    },
    MultiHitLanded {
        attacker: String,
        move_used: String,
        hits: u8,
    },
    MultiHitTotal {
        damage: u16,
    },
    AttackTypeEffectiveness {
        multiplier: f32,
    },
    RecoilDamage {
        pokemon: String,
        damage: u16,
    },
    CrashDamage {
        pokemon: String,
        damage: u16,
    },

    // Special mechanics
    ChargingStarted {
        pokemon: String,
        move_used: String,
    },
    RestUsed {
        pokemon: String,
    },
    DelayedAttackForeseen {
        pokemon: String,
        move_used: String,
    },
    DelayedAttackLanded {
        target: String,
        move_used: String,
        damage: u16,
    },
    NothingHappened {
        pokemon: String,
        move_used: String,
    },
    WokeUp {
        pokemon: String,
    },
    ActionFailed {
        pokemon: String,
        reason: ActionFailureReason,
    },

    // Team management
    PokemonFainted {
        player_index: usize,
        pokemon: String,
        from_recoil: bool,
    },
    PokemonSwitched {
        player_index: usize,
        old_pokemon: String,
        new_pokemon: String,
        forced: bool,
    },
    PokemonCaught {
        pokemon: String,
    },
    PokemonReleased {
        released: String,
        caught: String,
    },

    // Run flow
    BattleEnded {
        outcome: BattleOutcome,
        opponent: String,
    },
    TeamRestored,
    WildPokemonAppeared {
        pokemon: String,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        match self {
            BattleEvent::TurnStarted { .. } | BattleEvent::TurnEnded => None,

            BattleEvent::MoveHit {
                attacker,
                move_used,
                damage,
                critical,
            } => {
                let suffix = if *critical { " Critical hit!" } else { "" };
                Some(format!(
                    "{} used {} for {} damage!{}",
                    display_name(attacker),
                    display_name(move_used),
                    damage,
                    suffix
                ))
            }
            BattleEvent::MoveMissed {
                attacker,
                move_used,
            } => Some(format!(
                "{} used {} but it missed!",
                display_name(attacker),
                display_name(move_used)
            )),
            BattleEvent::MultiHitLanded {
                attacker,
                move_used,
                hits,
            } => Some(format!(
                "{} used {} {} times!",
                display_name(attacker),
                display_name(move_used),
                hits
            )),
            BattleEvent::MultiHitTotal { damage } => {
                Some(format!("It dealt {} total damage!", damage))
            }
            BattleEvent::AttackTypeEffectiveness { multiplier } => {
                effectiveness_text(*multiplier).map(str::to_string)
            }
            BattleEvent::RecoilDamage { pokemon, damage } => Some(format!(
                "{} was hurt by recoil! It took {} damage!",
                display_name(pokemon),
                damage
            )),
            BattleEvent::CrashDamage { pokemon, damage } => Some(format!(
                "{} kept going and crashed! It took {} damage!",
                display_name(pokemon),
                damage
            )),

            BattleEvent::ChargingStarted { pokemon, move_used } => Some(format!(
                "{} is {}!",
                display_name(pokemon),
                schema::charge_message(move_used)
            )),
            BattleEvent::RestUsed { pokemon } => Some(format!(
                "{} went to sleep and became healthy!",
                display_name(pokemon)
            )),
            BattleEvent::DelayedAttackForeseen { pokemon, .. } => {
                Some(format!("{} foresaw an attack!", display_name(pokemon)))
            }
            BattleEvent::DelayedAttackLanded {
                target,
                move_used,
                damage,
            } => Some(format!(
                "{} took the {} attack! It took {} damage!",
                display_name(target),
                display_name(move_used),
                damage
            )),
            BattleEvent::NothingHappened { pokemon, move_used } => Some(format!(
                "{} used {}! But nothing happened.",
                display_name(pokemon),
                display_name(move_used)
            )),
            BattleEvent::WokeUp { pokemon } => {
                Some(format!("{} woke up!", display_name(pokemon)))
            }
            BattleEvent::ActionFailed { pokemon, reason } => match reason {
                ActionFailureReason::IsAsleep => {
                    Some(format!("{} is fast asleep.", display_name(pokemon)))
                }
                ActionFailureReason::NoPPRemaining { move_used } => Some(format!(
                    "{} has no PP left for {}!",
                    display_name(pokemon),
                    display_name(move_used)
                )),
            },

            BattleEvent::PokemonFainted {
                pokemon,
                from_recoil,
                ..
            } => {
                if *from_recoil {
                    Some(format!("{} fainted from recoil!", display_name(pokemon)))
                } else {
                    Some(format!("{} fainted!", display_name(pokemon)))
                }
            }
            BattleEvent::PokemonSwitched {
                player_index,
                new_pokemon,
                forced,
                ..
            } => {
                let name = display_name(new_pokemon);
                if *player_index != PLAYER_SIDE {
                    let player_name = &battle_state.players[*player_index].player_name;
                    Some(format!("{} sent out {}!", player_name, name))
                } else if *forced {
                    Some(format!("Go, {}!", name))
                } else {
                    Some(format!("You switched to {}!", name))
                }
            }
            BattleEvent::PokemonCaught { pokemon } => {
                Some(format!("You caught {}!", display_name(pokemon)))
            }
            BattleEvent::PokemonReleased { released, caught } => Some(format!(
                "{} was released to make room for {}.",
                display_name(released),
                display_name(caught)
            )),

            BattleEvent::BattleEnded { outcome, opponent } => match outcome {
                BattleOutcome::Victory => {
                    Some(format!("You defeated the wild {}!", display_name(opponent)))
                }
                BattleOutcome::Defeat => Some("All your Pokémon have fainted!".to_string()),
            },
            BattleEvent::TeamRestored => {
                Some("Your team was fully healed and all PP was restored!".to_string())
            }
            BattleEvent::WildPokemonAppeared { pokemon } => {
                Some(format!("A wild {} appeared!", display_name(pokemon)))
            }
        }
    }
}

/// Player-facing text for an effectiveness multiplier; silent at exactly 1.
pub fn effectiveness_text(multiplier: f32) -> Option<&'static str> {
    if multiplier == 0.0 {
        Some("It has no effect...")
    } else if multiplier < 1.0 {
        Some("It's not very effective...")
    } else if multiplier > 1.0 {
        Some("It's super effective!")
    } else {
        None
    }
}

/// Event bus for collecting battle events in the order they happened.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Formatted text of every non-silent event.
    pub fn messages(&self, battle_state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect()
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<f64>, index: usize },
    Seeded(StdRng),
}

/// Source of every random draw the engine makes. Each draw is tagged with a
/// reason so scripted sequences can be followed in test output.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Draws are replayed in order; each value should lie in `[0, 1)`.
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    /// Next uniform draw in `[0, 1)`.
    pub fn next_outcome(&mut self, reason: &str) -> f64 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];
                *index += 1;
                outcome
            }
            RngSource::Seeded(rng) => rng.random::<f64>(),
        };

        tracing::trace!(outcome, reason, "rng draw");
        outcome
    }

    /// Uniform index in `0..len`.
    pub fn next_index(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty range");
        let outcome = self.next_outcome(reason);
        ((outcome * len as f64) as usize).min(len.saturating_sub(1))
    }

    /// Independent generator for work that runs off the session, such as a
    /// background opponent prefetch.
    pub fn fork(&mut self) -> TurnRng {
        match &mut self.source {
            RngSource::Seeded(rng) => TurnRng::from_seed(rng.random()),
            RngSource::Scripted { index, .. } => TurnRng::from_seed(*index as u64),
        }
    }
}

/// A delayed-damage attack waiting to land on `target_player`'s active pokemon.
/// The attacker's level and special attack are captured when the move is used.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PendingDelayedEffect {
    pub target_player: usize,
    pub turns_remaining: u8,
    pub power: u16,
    pub move_used: String,
    pub attacker_level: u8,
    pub attacker_sp_attack: u16,
}

/// Turn counts the move mechanics read while resolving.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleRules {
    pub rest_sleep_turns: u8,
    pub delayed_damage_turns: u8,
}

impl BattleRules {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            rest_sleep_turns: config.rest_sleep_turns,
            delayed_damage_turns: config.delayed_damage_turns,
        }
    }
}

impl Default for BattleRules {
    fn default() -> Self {
        Self::from_config(&RunConfig::default())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub players: [BattlePlayer; 2],
    pub turn_number: u32,
    pub phase: BattlePhase,
    pub action_queue: [Option<PlayerAction>; 2],
    pub pending_effects: Vec<PendingDelayedEffect>,
    pub rules: BattleRules,
}

impl BattleState {
    pub fn new(player: BattlePlayer, opponent: BattlePlayer) -> Self {
        Self {
            players: [player, opponent],
            turn_number: 1,
            phase: BattlePhase::SelectMove,
            action_queue: [None, None],
            pending_effects: Vec::new(),
            rules: BattleRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: BattleRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn player(&self) -> &BattlePlayer {
        &self.players[PLAYER_SIDE]
    }

    pub fn opponent(&self) -> &BattlePlayer {
        &self.players[OPPONENT_SIDE]
    }
}
