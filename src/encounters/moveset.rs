use crate::battle::state::TurnRng;
use crate::dex::{fallback_move, fetch_move_or_skip, DataProvider};
use crate::pokemon::MoveInstance;
use schema::{MoveMechanic, MoveRecord, SpeciesRecord};

/// Damaging moves, plus the status moves whose mechanic does something.
fn is_usable(record: &MoveRecord) -> bool {
    record.is_damaging() || MoveMechanic::for_move(&record.name).works_without_power()
}

fn shuffle<T>(items: &mut [T], rng: &mut TurnRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1, "moveset shuffle");
        items.swap(i, j);
    }
}

/// Shuffle the species' candidates and keep the first four usable ones,
/// cycling through what was found to fill every slot. A species with nothing
/// usable gets the fallback tackle.
pub async fn build_moveset(
    species: &SpeciesRecord,
    provider: &dyn DataProvider,
    rng: &mut TurnRng,
) -> [MoveInstance; 4] {
    let mut candidates = species.moves.clone();
    shuffle(&mut candidates, rng);

    let mut picked: Vec<MoveInstance> = Vec::with_capacity(4);
    for name in &candidates {
        if picked.len() == 4 {
            break;
        }
        let Some(record) = fetch_move_or_skip(provider, name).await else {
            continue;
        };
        if is_usable(&record) {
            picked.push(MoveInstance::new(record));
        }
    }

    if picked.is_empty() {
        tracing::warn!(species = %species.name, "no usable moves, using fallback");
        picked.push(MoveInstance::new(fallback_move()));
    }

    std::array::from_fn(|slot| picked[slot % picked.len()].clone())
}
