use crate::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageClass {
    Physical,
    Special,
    Status,
}

/// Read-only move definition as supplied by a data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    pub move_type: PokemonType,
    pub damage_class: DamageClass,
    #[serde(default)]
    pub power: Option<u16>,
    /// `None` means the move cannot miss.
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub max_pp: Option<u8>,
}

impl MoveRecord {
    /// A move deals direct damage when it has a base power and is not status class.
    pub fn is_damaging(&self) -> bool {
        self.power.is_some() && self.damage_class != DamageClass::Status
    }
}

/// Special behaviour layered on top of the single-hit damage model.
/// Every move maps to exactly one variant; `Plain` covers the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveMechanic {
    Plain,
    /// One setup turn, then the hit lands on the next action.
    Charge,
    Recoil {
        percent: u8,
        /// A miss costs half the user's max HP instead.
        miss_recoil: bool,
    },
    MultiHit {
        min: u8,
        max: u8,
    },
    SleepSelf,
    DelayedDamage,
}

impl MoveMechanic {
    pub fn for_move(name: &str) -> MoveMechanic {
        match name {
            "solar-beam" | "razor-wind" | "skull-bash" | "sky-attack" | "fly" | "dig"
            | "dive" | "bounce" => MoveMechanic::Charge,

            "take-down" | "submission" => MoveMechanic::Recoil {
                percent: 25,
                miss_recoil: false,
            },
            "double-edge" | "volt-tackle" | "flare-blitz" | "brave-bird" | "wood-hammer" => {
                MoveMechanic::Recoil {
                    percent: 33,
                    miss_recoil: false,
                }
            }
            "head-smash" => MoveMechanic::Recoil {
                percent: 50,
                miss_recoil: false,
            },
            "jump-kick" | "high-jump-kick" => MoveMechanic::Recoil {
                percent: 50,
                miss_recoil: true,
            },

            "double-slap" | "comet-punch" | "fury-attack" | "pin-missile" | "spike-cannon"
            | "barrage" | "fury-swipes" | "bone-rush" => MoveMechanic::MultiHit { min: 2, max: 5 },
            "double-kick" | "twineedle" => MoveMechanic::MultiHit { min: 2, max: 2 },

            "rest" => MoveMechanic::SleepSelf,
            "future-sight" | "doom-desire" => MoveMechanic::DelayedDamage,

            _ => MoveMechanic::Plain,
        }
    }

    /// Mechanics that do something useful even on a status-class move.
    pub fn works_without_power(&self) -> bool {
        matches!(self, MoveMechanic::SleepSelf | MoveMechanic::DelayedDamage)
    }
}

/// Announcement shown on the setup turn of a charge move, e.g. "X is absorbing sunlight!".
pub fn charge_message(move_name: &str) -> &'static str {
    match move_name {
        "solar-beam" => "absorbing sunlight",
        "razor-wind" => "whipping up a whirlwind",
        "skull-bash" => "lowering its head",
        "sky-attack" => "glowing intensely",
        "fly" => "flying up high",
        "dig" => "burrowing underground",
        "dive" => "diving underwater",
        "bounce" => "springing up",
        _ => "charging up",
    }
}
