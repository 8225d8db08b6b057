use super::create_pokemon;
use crate::battle::state::TurnRng;
use crate::config::{OpponentScaling, RunConfig};
use crate::dex::{fallback_species, fetch_species_or_fallback, DataProvider};
use crate::pokemon::PokemonInst;
use schema::{SpeciesRecord, SpeciesRef};

/// Inclusive BST range opponents are drawn from for one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BstWindow {
    pub min: u16,
    pub max: u16,
}

impl BstWindow {
    pub fn contains(&self, bst: u16) -> bool {
        (self.min..=self.max).contains(&bst)
    }
}

/// Both bounds grow linearly with the battle number.
pub fn bst_window(battle_number: u32, scaling: &OpponentScaling) -> BstWindow {
    let battles_won = battle_number.saturating_sub(1);
    let scale = |base: u16, step: u16| {
        (base as u32 + step as u32 * battles_won).min(u16::MAX as u32) as u16
    };
    BstWindow {
        min: scale(scaling.min_base, scaling.min_step),
        max: scale(scaling.max_base, scaling.max_step),
    }
}

/// Samples the provider's pool and picks uniformly among the species that
/// landed inside the window. With no hit, the strongest species seen wins.
pub async fn select_opponent_species(
    battle_number: u32,
    scaling: &OpponentScaling,
    provider: &dyn DataProvider,
    rng: &mut TurnRng,
) -> SpeciesRecord {
    let pool = provider.species_pool();
    if pool.is_empty() {
        tracing::warn!("species pool is empty, using fallback opponent");
        return fallback_species();
    }

    let window = bst_window(battle_number, scaling);
    let mut in_window = Vec::new();
    let mut strongest: Option<SpeciesRecord> = None;

    for _ in 0..scaling.attempts {
        let id = pool[rng.next_index(pool.len(), "opponent sample")];
        let species = fetch_species_or_fallback(provider, &SpeciesRef::Id(id)).await;
        if window.contains(species.bst()) {
            in_window.push(species);
        } else if strongest
            .as_ref()
            .is_none_or(|best| species.bst() > best.bst())
        {
            strongest = Some(species);
        }
    }

    if in_window.is_empty() {
        tracing::debug!(battle_number, ?window, "no sampled species fit the window");
        return strongest.unwrap_or_else(fallback_species);
    }
    let pick = rng.next_index(in_window.len(), "opponent pick");
    in_window.swap_remove(pick)
}

/// An opponent generated ahead of time for a specific battle.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedOpponent {
    pub battle_number: u32,
    pub pokemon: PokemonInst,
}

pub async fn prepare_opponent(
    battle_number: u32,
    config: &RunConfig,
    provider: &dyn DataProvider,
    rng: &mut TurnRng,
) -> PreparedOpponent {
    let species = select_opponent_species(battle_number, &config.opponents, provider, rng).await;
    let pokemon = create_pokemon(&species, config, provider, rng).await;
    PreparedOpponent {
        battle_number,
        pokemon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::{LocalDex, FALLBACK_SPECIES_NAME};
    use crate::encounters::test_dex::{small_dex, species};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::PokemonType;

    fn scaling(attempts: usize) -> OpponentScaling {
        OpponentScaling {
            attempts,
            ..OpponentScaling::default()
        }
    }

    #[rstest]
    #[case(1, 175, 300)]
    #[case(2, 183, 312)]
    #[case(5, 207, 348)]
    fn test_window_scales_with_battle_number(
        #[case] battle_number: u32,
        #[case] min: u16,
        #[case] max: u16,
    ) {
        assert_eq!(
            bst_window(battle_number, &OpponentScaling::default()),
            BstWindow { min, max }
        );
    }

    #[tokio::test]
    async fn test_only_species_inside_the_window_are_picked() {
        let dex = small_dex();
        // Samples ids 1..=4 in order, then picks the first in-window hit.
        let mut rng = TurnRng::new_for_test(vec![0.0, 0.3, 0.6, 0.9, 0.0]);

        let chosen = select_opponent_species(1, &scaling(4), &dex, &mut rng).await;

        assert_eq!(chosen.name, "middling");
    }

    #[tokio::test]
    async fn test_later_battles_reach_stronger_species() {
        let dex = small_dex();
        // Battle 11: [255, 420]
        let mut rng = TurnRng::new_for_test(vec![0.0, 0.3, 0.6, 0.9, 0.0]);

        let chosen = select_opponent_species(11, &scaling(4), &dex, &mut rng).await;

        assert_eq!(chosen.name, "sturdy");
    }

    #[tokio::test]
    async fn test_strongest_seen_when_nothing_fits() {
        let dex = LocalDex::from_records(
            vec![
                species(1, "weakling", vec![PokemonType::Normal], 20, &[]),
                species(4, "mighty", vec![PokemonType::Normal], 80, &[]),
            ],
            vec![],
        );
        let mut rng = TurnRng::new_for_test(vec![0.0, 0.9]);

        let chosen = select_opponent_species(1, &scaling(2), &dex, &mut rng).await;

        assert_eq!(chosen.name, "mighty");
    }

    #[tokio::test]
    async fn test_empty_pool_gives_the_fallback() {
        let dex = LocalDex::default();
        let chosen =
            select_opponent_species(1, &scaling(60), &dex, &mut TurnRng::new_for_test(vec![]))
                .await;
        assert_eq!(chosen.name, FALLBACK_SPECIES_NAME);
    }

    #[tokio::test]
    async fn test_prepared_opponent_is_ready_to_battle() {
        let dex = LocalDex::bundled().expect("bundled dex");
        let config = RunConfig::default();

        let prepared = prepare_opponent(3, &config, &dex, &mut TurnRng::from_seed(9)).await;

        assert_eq!(prepared.battle_number, 3);
        assert_eq!(prepared.pokemon.level, 50);
        assert_eq!(prepared.pokemon.current_hp(), prepared.pokemon.max_hp());
        assert!(prepared.pokemon.moves.iter().all(|m| m.pp > 0));
    }
}
