use crate::battle::state::{BattleOutcome, BattlePhase, BattleState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchError {
    /// Catches are only offered once the wild pokemon has been beaten.
    NotAfterVictory,
    /// A recent catch suppresses the offer for a few battles.
    OnCooldown { battles_remaining: u8 },
    /// The offer for this victory was already accepted or declined.
    AlreadyResolved,
    /// Nothing on the opponent's side to catch.
    NoTargetPokemon,
}

/// Validate that the defeated opponent may be offered to the player.
pub fn can_offer_catch(
    battle_state: &BattleState,
    cooldown: u8,
    already_resolved: bool,
) -> Result<(), CatchError> {
    if battle_state.phase != BattlePhase::BattleEnd(BattleOutcome::Victory) {
        return Err(CatchError::NotAfterVictory);
    }
    if cooldown > 0 {
        return Err(CatchError::OnCooldown {
            battles_remaining: cooldown,
        });
    }
    if already_resolved {
        return Err(CatchError::AlreadyResolved);
    }
    if battle_state.opponent().active_pokemon().is_none() {
        return Err(CatchError::NoTargetPokemon);
    }
    Ok(())
}
