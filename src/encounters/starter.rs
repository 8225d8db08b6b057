use crate::battle::state::TurnRng;
use crate::config::StarterRules;
use crate::dex::{fallback_species, DataProvider};
use schema::{PokemonType, SpeciesRecord, SpeciesRef};

/// Mid-strength candidates offered as a first partner.
pub fn starter_pool(pokemon_type: PokemonType) -> &'static [&'static str] {
    match pokemon_type {
        PokemonType::Normal => &["persian", "raticate", "fearow", "furret", "linoone"],
        PokemonType::Fire => &["charmeleon", "arcanine", "rapidash", "flareon", "camerupt"],
        PokemonType::Water => &["wartortle", "golduck", "gyarados", "vaporeon", "lapras"],
        PokemonType::Grass => &["ivysaur", "gloom", "weepinbell", "bayleef", "grovyle"],
        PokemonType::Electric => &["raichu", "magneton", "electrode", "flaaffy", "manectric"],
        PokemonType::Ice => &["dewgong", "cloyster", "piloswine", "glalie"],
        PokemonType::Fighting => &["machoke", "primeape", "hitmonlee", "hitmonchan"],
        PokemonType::Poison => &["arbok", "nidorino", "nidorina", "muk", "crobat"],
        PokemonType::Ground => &["sandslash", "dugtrio", "donphan", "flygon"],
        PokemonType::Flying => &["fearow", "golbat", "noctowl", "skarmory"],
        PokemonType::Psychic => &["kadabra", "slowbro", "hypno", "kirlia", "gardevoir"],
        PokemonType::Bug => &["butterfree", "beedrill", "scyther", "pinsir", "forretress"],
        PokemonType::Rock => &["graveler", "onix", "rhydon", "golem"],
        PokemonType::Ghost => &["haunter", "gengar", "banette"],
        PokemonType::Dragon => &["dragonair", "flygon", "altaria"],
        PokemonType::Dark => &["mightyena", "houndoom", "umbreon"],
        PokemonType::Steel => &["magneton", "skarmory", "metagross"],
        PokemonType::Fairy => &["wigglytuff", "clefable", "gardevoir"],
    }
}

/// Early, weaker forms used when no starter candidate fits.
pub fn weak_pool(pokemon_type: PokemonType) -> &'static [&'static str] {
    match pokemon_type {
        PokemonType::Normal => &["rattata", "pidgey", "meowth", "sentret", "zigzagoon"],
        PokemonType::Fire => &["charmander", "growlithe", "vulpix", "torchic"],
        PokemonType::Water => &["squirtle", "psyduck", "magikarp", "poliwag", "remoraid"],
        PokemonType::Grass => &["bulbasaur", "oddish", "bellsprout", "chikorita"],
        PokemonType::Electric => &["pikachu", "magnemite", "voltorb", "mareep"],
        PokemonType::Ice => &["seel", "shellder", "swinub"],
        PokemonType::Fighting => &["machop", "mankey", "tyrogue"],
        PokemonType::Poison => &["ekans", "nidoran-m", "nidoran-f", "grimer"],
        PokemonType::Ground => &["sandshrew", "diglett", "phanpy"],
        PokemonType::Flying => &["spearow", "hoothoot", "zubat"],
        PokemonType::Psychic => &["abra", "slowpoke", "drowzee", "ralts"],
        PokemonType::Bug => &["caterpie", "weedle", "wurmple", "kricketot"],
        PokemonType::Rock => &["geodude", "nosepass"],
        PokemonType::Ghost => &["gastly", "shuppet"],
        PokemonType::Dragon => &["dratini"],
        PokemonType::Dark => &["poochyena", "houndour"],
        PokemonType::Steel => &["magnemite"],
        PokemonType::Fairy => &["jigglypuff", "clefairy"],
    }
}

/// Pool entries the provider does not know are skipped rather than replaced.
async fn lookup(provider: &dyn DataProvider, name: &str) -> Option<SpeciesRecord> {
    match provider.fetch_species(&SpeciesRef::from(name)).await {
        Ok(species) => Some(species),
        Err(err) => {
            tracing::debug!(candidate = name, error = %err, "starter candidate unavailable");
            None
        }
    }
}

/// Picks the player's first creature of `starter_type`, preferring one whose
/// BST sits in `(weak_threshold, starter_threshold]`.
pub async fn select_starter(
    starter_type: PokemonType,
    rules: &StarterRules,
    provider: &dyn DataProvider,
    rng: &mut TurnRng,
) -> SpeciesRecord {
    let candidates = starter_pool(starter_type);
    let draws = rules.attempts.min(candidates.len() * 2);

    for _ in 0..draws {
        let name = candidates[rng.next_index(candidates.len(), "starter sample")];
        if let Some(species) = lookup(provider, name).await {
            let bst = species.bst();
            if species.has_type(starter_type)
                && bst > rules.weak_threshold
                && bst <= rules.starter_threshold
            {
                return species;
            }
        }
    }

    let mut strongest: Option<SpeciesRecord> = None;
    for name in candidates {
        if let Some(species) = lookup(provider, name).await {
            if species.has_type(starter_type)
                && strongest.as_ref().is_none_or(|best| species.bst() > best.bst())
            {
                strongest = Some(species);
            }
        }
    }
    if let Some(species) = strongest {
        return species;
    }

    let mut weakest: Option<SpeciesRecord> = None;
    for name in weak_pool(starter_type) {
        if let Some(species) = lookup(provider, name).await {
            if species.has_type(starter_type)
                && weakest.as_ref().is_none_or(|best| species.bst() < best.bst())
            {
                weakest = Some(species);
            }
        }
    }

    weakest.unwrap_or_else(|| {
        tracing::warn!(%starter_type, "no starter candidate available, using fallback");
        fallback_species()
    })
}
