//! Read-only view of a session for whatever is presenting it.

use crate::battle::state::{BattlePhase, BattleState, PLAYER_SIDE};
use crate::player::BattlePlayer;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveView {
    pub name: String,
    pub display_name: String,
    pub move_type: PokemonType,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub max_pp: u8,
    pub disabled: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreatureView {
    pub name: String,
    pub display_name: String,
    pub types: Vec<PokemonType>,
    pub level: u8,
    pub hp: u16,
    pub max_hp: u16,
    pub hp_fraction: f32,
    pub status: Option<StatusCondition>,
    pub moves: Vec<MoveView>,
}

impl CreatureView {
    pub fn from_pokemon(pokemon: &PokemonInst) -> Self {
        Self {
            name: pokemon.name.clone(),
            display_name: pokemon.display_name(),
            types: pokemon.types.clone(),
            level: pokemon.level,
            hp: pokemon.current_hp(),
            max_hp: pokemon.max_hp(),
            hp_fraction: pokemon.hp_fraction(),
            status: pokemon.status,
            moves: pokemon
                .moves
                .iter()
                .enumerate()
                .map(|(slot, move_instance)| MoveView {
                    name: move_instance.name().to_string(),
                    display_name: crate::pokemon::display_name(move_instance.name()),
                    move_type: move_instance.record.move_type,
                    power: move_instance.record.power,
                    accuracy: move_instance.record.accuracy,
                    pp: move_instance.pp,
                    max_pp: move_instance.max_pp(),
                    disabled: !pokemon.move_selectable(slot),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub display_name: String,
    pub hp: u16,
    pub max_hp: u16,
    pub hp_fraction: f32,
    pub fainted: bool,
    pub active: bool,
}

fn roster_entries(player: &BattlePlayer) -> Vec<RosterEntry> {
    player
        .team
        .iter()
        .enumerate()
        .map(|(index, pokemon)| RosterEntry {
            name: pokemon.name.clone(),
            display_name: pokemon.display_name(),
            hp: pokemon.current_hp(),
            max_hp: pokemon.max_hp(),
            hp_fraction: pokemon.hp_fraction(),
            fainted: pokemon.is_fainted(),
            active: index == player.active_pokemon_index,
        })
        .collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: BattlePhase,
    pub battle_number: u32,
    pub catch_cooldown: u8,
    pub catch_available: bool,
    pub player_active: Option<CreatureView>,
    pub opponent_active: Option<CreatureView>,
    pub roster: Vec<RosterEntry>,
    /// Name of the charge move the player's active pokemon must release next.
    pub forced_move: Option<String>,
    pub messages: Vec<String>,
}

impl SessionSnapshot {
    pub fn capture(
        state: &BattleState,
        battle_number: u32,
        catch_cooldown: u8,
        catch_available: bool,
        messages: Vec<String>,
    ) -> Self {
        let player = &state.players[PLAYER_SIDE];
        let player_active = player.active_pokemon();
        let forced_move = player_active.and_then(|pokemon| {
            pokemon
                .charging_slot()
                .and_then(|slot| pokemon.moves.get(slot))
                .map(|move_instance| move_instance.name().to_string())
        });

        Self {
            phase: state.phase,
            battle_number,
            catch_cooldown,
            catch_available,
            player_active: player_active.map(CreatureView::from_pokemon),
            opponent_active: state.opponent().active_pokemon().map(CreatureView::from_pokemon),
            roster: roster_entries(player),
            forced_move,
            messages,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
