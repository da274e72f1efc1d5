use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `{ "name": ..., "url": ... }` reference as PokeAPI nests it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedResource {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    #[serde(default)]
    pub base_stat: Option<u32>,
    pub stat: Option<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: Option<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: Option<NamedResource>,
}

/// Subset of PokeAPI's `/pokemon/{name}` resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamPokemon {
    pub name: Option<String>,
    pub stats: Option<Vec<StatEntry>>,
    pub types: Option<Vec<TypeSlot>>,
    pub abilities: Option<Vec<AbilitySlot>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeMember {
    pub pokemon: Option<NamedResource>,
}

/// Subset of PokeAPI's `/type/{name}` resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamType {
    pub pokemon: Option<Vec<TypeMember>>,
}

/// Localized summary served by `GET /pokemon/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub nombre: String,
    pub hp: u32,
    pub ataque: u32,
    pub defensa: u32,
    pub velocidad: u32,
    pub tipos: Vec<String>,
    pub habilidades: Vec<String>,
}

impl PokemonSummary {
    /// Widened so that four `u32` stats never overflow.
    pub fn base_stat_total(&self) -> u64 {
        [self.hp, self.ataque, self.defensa, self.velocidad]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// API Gateway (REST, proxy integration) request event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl GatewayRequest {
    pub fn path_parameter(&self, key: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Body of the comparison function's request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareRequest {
    pub pokemon1: Option<String>,
    pub pokemon2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResult {
    pub result: String,
}
