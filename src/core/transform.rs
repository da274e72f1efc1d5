use crate::domain::model::{NamedResource, PokemonRef, PokemonSummary, UpstreamPokemon, UpstreamType};

fn resource_name(resource: Option<&NamedResource>) -> Option<&str> {
    resource.and_then(|r| r.name.as_deref())
}

/// Reshapes an upstream Pokémon into the localized summary.
///
/// Only `hp`, `attack`, `defense` and `speed` are read from the stat list;
/// anything else is dropped. Missing lists and null stat values produce
/// zeros / empty lists.
/// `fallback_name` is used when the upstream body carries no name.
pub fn summarize(pokemon: &UpstreamPokemon, fallback_name: &str) -> PokemonSummary {
    let mut hp = 0;
    let mut ataque = 0;
    let mut defensa = 0;
    let mut velocidad = 0;

    for entry in pokemon.stats.iter().flatten() {
        let value = entry.base_stat.unwrap_or(0);
        match resource_name(entry.stat.as_ref()) {
            Some("hp") => hp = value,
            Some("attack") => ataque = value,
            Some("defense") => defensa = value,
            Some("speed") => velocidad = value,
            _ => {}
        }
    }

    let tipos = pokemon
        .types
        .iter()
        .flatten()
        .filter_map(|slot| resource_name(slot.kind.as_ref()))
        .map(str::to_string)
        .collect();

    let habilidades = pokemon
        .abilities
        .iter()
        .flatten()
        .filter_map(|slot| resource_name(slot.ability.as_ref()))
        .map(str::to_string)
        .collect();

    PokemonSummary {
        nombre: pokemon
            .name
            .clone()
            .unwrap_or_else(|| fallback_name.to_string()),
        hp,
        ataque,
        defensa,
        velocidad,
        tipos,
        habilidades,
    }
}

/// Flattens a type resource into `{name, url}` pairs, preserving order.
/// Members without a name are skipped.
pub fn type_members(resource: &UpstreamType) -> Vec<PokemonRef> {
    resource
        .pokemon
        .iter()
        .flatten()
        .filter_map(|member| member.pokemon.as_ref())
        .filter_map(|details| {
            details.name.as_ref().map(|name| PokemonRef {
                name: name.clone(),
                url: details.url.clone(),
            })
        })
        .collect()
}
