use crate::core::fetcher::normalize_identifier;
use crate::core::transform::{summarize, type_members};
use crate::domain::model::{PokemonRef, PokemonSummary};
use crate::domain::ports::{PokemonSource, TypeSource};
use crate::utils::error::{Resource, Result};
use std::sync::Arc;

/// Stats lookup behind `GET /pokemon/{name}`.
#[derive(Clone)]
pub struct PokemonService {
    source: Arc<dyn PokemonSource>,
}

impl PokemonService {
    pub fn new(source: Arc<dyn PokemonSource>) -> Self {
        Self { source }
    }

    pub async fn get_pokemon_stats(&self, name: &str) -> Result<PokemonSummary> {
        let identifier = normalize_identifier(Resource::Pokemon, name)?;
        let pokemon = self.source.fetch_pokemon(&identifier).await?;
        let summary = summarize(&pokemon, &identifier);
        tracing::debug!(
            "Summarized {} ({} types, {} abilities)",
            summary.nombre,
            summary.tipos.len(),
            summary.habilidades.len()
        );
        Ok(summary)
    }
}

/// Type membership lookup behind the serverless type function.
#[derive(Clone)]
pub struct TypeService {
    source: Arc<dyn TypeSource>,
}

impl TypeService {
    pub fn new(source: Arc<dyn TypeSource>) -> Self {
        Self { source }
    }

    /// Members of the type in upstream order. An unknown type yields an
    /// empty list, same as a type without members.
    pub async fn find_by_type(&self, type_name: &str) -> Result<Vec<PokemonRef>> {
        let identifier = normalize_identifier(Resource::PokemonType, type_name)?;
        match self.source.fetch_type(&identifier).await? {
            Some(resource) => Ok(type_members(&resource)),
            None => {
                tracing::debug!("PokeAPI has no type named {}", identifier);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{UpstreamPokemon, UpstreamType};
    use crate::utils::error::{ErrorCategory, FacadeError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        pokemon: Option<UpstreamPokemon>,
        kind: Option<UpstreamType>,
    }

    #[async_trait]
    impl PokemonSource for CountingSource {
        async fn fetch_pokemon(&self, name: &str) -> Result<UpstreamPokemon> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pokemon
                .clone()
                .ok_or_else(|| FacadeError::not_found(Resource::Pokemon, name))
        }
    }

    #[async_trait]
    impl TypeSource for CountingSource {
        async fn fetch_type(&self, _type_name: &str) -> Result<Option<UpstreamType>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.kind.clone())
        }
    }

    #[tokio::test]
    async fn test_blank_name_never_reaches_source() {
        let source = Arc::new(CountingSource::default());
        let service = PokemonService::new(source.clone());

        let err = service.get_pokemon_stats(" \t ").await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_not_found_carries_identifier() {
        let source = Arc::new(CountingSource::default());
        let service = PokemonService::new(source.clone());

        let err = service.get_pokemon_stats("MissingNo").await.unwrap_err();

        assert!(err.to_string().contains("missingno"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_type_and_empty_type_are_both_empty() {
        let unknown = TypeService::new(Arc::new(CountingSource::default()));
        assert!(unknown.find_by_type("shadow").await.unwrap().is_empty());

        let empty = TypeService::new(Arc::new(CountingSource {
            kind: Some(UpstreamType {
                pokemon: Some(vec![]),
            }),
            ..Default::default()
        }));
        assert!(empty.find_by_type("stellar").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_type_is_rejected() {
        let source = Arc::new(CountingSource::default());
        let service = TypeService::new(source.clone());

        assert!(service.find_by_type("").await.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
