use crate::domain::model::{PokemonSummary, UpstreamPokemon, UpstreamType};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Looks up a single Pokémon on the upstream API.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn fetch_pokemon(&self, name: &str) -> Result<UpstreamPokemon>;
}

/// Looks up a type resource. `Ok(None)` means the upstream answered 404.
#[async_trait]
pub trait TypeSource: Send + Sync {
    async fn fetch_type(&self, type_name: &str) -> Result<Option<UpstreamType>>;
}

/// Looks up an already summarized Pokémon (the stats service).
#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn fetch_summary(&self, name: &str) -> Result<PokemonSummary>;
}

/// Write-only sink for comparison verdicts.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn pokeapi_base_url(&self) -> &str;
}
