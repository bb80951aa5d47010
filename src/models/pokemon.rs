use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PokemonOption {
    pub id: &'static str,
    pub name: &'static str,
    pub types: &'static [&'static str],
}

pub const POKEMON_LIST: &[PokemonOption] = &[
    PokemonOption { id: "pikachu", name: "Pikachu", types: &["Electric"] },
    PokemonOption { id: "charizard", name: "Charizard", types: &["Fire", "Flying"] },
    PokemonOption { id: "bulbasaur", name: "Bulbasaur", types: &["Grass", "Poison"] },
    PokemonOption { id: "squirtle", name: "Squirtle", types: &["Water"] },
    PokemonOption { id: "gengar", name: "Gengar", types: &["Ghost", "Poison"] },
    PokemonOption { id: "eevee", name: "Eevee", types: &["Normal"] },
    PokemonOption { id: "mewtwo", name: "Mewtwo", types: &["Psychic"] },
    PokemonOption { id: "lucario", name: "Lucario", types: &["Fighting", "Steel"] },
    PokemonOption { id: "gardevoir", name: "Gardevoir", types: &["Psychic", "Fairy"] },
    PokemonOption { id: "greninja", name: "Greninja", types: &["Water", "Dark"] },
    PokemonOption { id: "snorlax", name: "Snorlax", types: &["Normal"] },
    PokemonOption { id: "jigglypuff", name: "Jigglypuff", types: &["Normal", "Fairy"] },
    PokemonOption { id: "dragonite", name: "Dragonite", types: &["Dragon", "Flying"] },
    PokemonOption { id: "machamp", name: "Machamp", types: &["Fighting"] },
    PokemonOption { id: "gyarados", name: "Gyarados", types: &["Water", "Flying"] },
];

pub const SAMPLE_PROMPTS: &[&str] = &[
    "A futuristic cityscape at night",
    "A calm forest with magical glowing mushrooms",
    "An underwater coral reef teeming with life",
];

/// Case-insensitive lookup by id or display name.
pub fn find_pokemon(query: &str) -> Option<&'static PokemonOption> {
    let query = query.trim();
    POKEMON_LIST
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(query) || p.name.eq_ignore_ascii_case(query))
}

/// Catalog name when the query is a known Pokémon, otherwise the query as typed.
pub fn resolve_target_name(query: &str) -> String {
    find_pokemon(query)
        .map(|p| p.name.to_string())
        .unwrap_or_else(|| query.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = POKEMON_LIST.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), POKEMON_LIST.len());
        assert_eq!(POKEMON_LIST.len(), 15);
    }

    #[test]
    fn test_find_pokemon() {
        assert_eq!(find_pokemon("PIKACHU").unwrap().name, "Pikachu");
        assert_eq!(find_pokemon(" lucario ").unwrap().types, &["Fighting", "Steel"]);
        assert!(find_pokemon("Mimikyu").is_none());
    }

    #[test]
    fn test_resolve_target_name() {
        assert_eq!(resolve_target_name("gengar"), "Gengar");
        assert_eq!(resolve_target_name(" Mimikyu "), "Mimikyu");
    }
}
