use crate::domain::model::{UpstreamPokemon, UpstreamType};
use crate::domain::ports::{ConfigProvider, PokemonSource, TypeSource};
use crate::utils::error::{FacadeError, Resource, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Trims and lower-cases a path identifier, rejecting blank input.
pub fn normalize_identifier(resource: Resource, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FacadeError::validation(format!(
            "{} identifier cannot be empty",
            resource
        )));
    }
    Ok(trimmed.to_lowercase())
}

/// Thin client over the PokeAPI REST resources.
///
/// One instance is built per process and shared between requests; it holds
/// no per-request state.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        validate_url("pokeapi_base_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| FacadeError::ConfigError {
            message: format!("Invalid PokeAPI base URL: {}", e),
        })?;
        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.pokeapi_base_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{resource}/{identifier}`, with the identifier escaped as a
    /// single path segment.
    pub fn resource_url(&self, resource: Resource, identifier: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FacadeError::ConfigError {
                message: format!("PokeAPI base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .push(resource.path_segment())
            .push(identifier);
        Ok(url)
    }

    /// Single GET against the resource. `Ok(None)` on 404.
    /// `identifier` must already be normalized.
    async fn get_resource<T: DeserializeOwned>(
        &self,
        resource: Resource,
        identifier: &str,
    ) -> Result<Option<T>> {
        let url = self.resource_url(resource, identifier)?;

        tracing::debug!("Making PokeAPI request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("PokeAPI response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(FacadeError::UpstreamStatusError {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Err(FacadeError::malformed(format!(
                "empty body for {} '{}'",
                resource, identifier
            )));
        }

        serde_json::from_str(&body).map(Some).map_err(|e| {
            FacadeError::malformed(format!("{} '{}': {}", resource, identifier, e))
        })
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn fetch_pokemon(&self, name: &str) -> Result<UpstreamPokemon> {
        let identifier = normalize_identifier(Resource::Pokemon, name)?;
        let pokemon = self.get_resource(Resource::Pokemon, &identifier).await?;
        pokemon.ok_or_else(|| FacadeError::not_found(Resource::Pokemon, identifier))
    }
}

#[async_trait]
impl TypeSource for PokeApiClient {
    async fn fetch_type(&self, type_name: &str) -> Result<Option<UpstreamType>> {
        let identifier = normalize_identifier(Resource::PokemonType, type_name)?;
        self.get_resource(Resource::PokemonType, &identifier).await
    }
}
