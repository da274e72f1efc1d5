use crate::domain::model::{CompareRequest, CompareResult, PokemonSummary};
use crate::domain::ports::{Storage, SummarySource};
use crate::utils::error::{FacadeError, Resource, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const SUMMARY_TIMEOUT: Duration = Duration::from_secs(10);

pub trait ComparisonStrategy: Send + Sync {
    fn compare(&self, first: &PokemonSummary, second: &PokemonSummary) -> String;
}

/// Ranks by hp + attack + defense + speed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOfBaseStats;

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl ComparisonStrategy for SumOfBaseStats {
    fn compare(&self, first: &PokemonSummary, second: &PokemonSummary) -> String {
        let first_sum = first.base_stat_total();
        let second_sum = second.base_stat_total();
        let first_name = capitalize(&first.nombre);
        let second_name = capitalize(&second.nombre);

        match first_sum.cmp(&second_sum) {
            std::cmp::Ordering::Greater => format!(
                "{} ({} stats) es más fuerte que {} ({} stats).",
                first_name, first_sum, second_name, second_sum
            ),
            std::cmp::Ordering::Less => format!(
                "{} ({} stats) es más fuerte que {} ({} stats).",
                second_name, second_sum, first_name, first_sum
            ),
            std::cmp::Ordering::Equal => format!(
                "{} ({} stats) y {} ({} stats) tienen la misma fuerza.",
                first_name, first_sum, second_name, second_sum
            ),
        }
    }
}

/// HTTP client for the stats service (`GET {base}/pokemon/{name}`).
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    base_url: Url,
}

impl SummaryClient {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("pokemon_service_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| FacadeError::ConfigError {
            message: format!("Invalid stats service URL: {}", e),
        })?;
        let client = Client::builder().timeout(SUMMARY_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn summary_url(&self, name: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FacadeError::ConfigError {
                message: format!("Stats service URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .push(Resource::Pokemon.path_segment())
            .push(name);
        Ok(url)
    }
}

#[async_trait]
impl SummarySource for SummaryClient {
    async fn fetch_summary(&self, name: &str) -> Result<PokemonSummary> {
        let url = self.summary_url(name)?;
        tracing::debug!("Requesting stats from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FacadeError::not_found(Resource::Pokemon, name));
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(FacadeError::UpstreamStatusError {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| FacadeError::malformed(format!("stats for '{}': {}", name, e)))
    }
}

fn required_name(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Object key the comparison text is stored under.
pub fn comparison_key(first: &str, second: &str, request_id: &str) -> String {
    format!("comparison_{}_vs_{}_{}.txt", first, second, request_id)
}

/// Compares two Pokémon and archives the verdict.
pub struct CompareService<S: Storage> {
    source: Arc<dyn SummarySource>,
    storage: S,
    strategy: Box<dyn ComparisonStrategy>,
}

impl<S: Storage> CompareService<S> {
    pub fn new(source: Arc<dyn SummarySource>, storage: S) -> Self {
        Self {
            source,
            storage,
            strategy: Box::new(SumOfBaseStats),
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn ComparisonStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub async fn compare(&self, request: &CompareRequest, request_id: &str) -> Result<CompareResult> {
        let (first, second) = match (
            required_name(request.pokemon1.as_ref()),
            required_name(request.pokemon2.as_ref()),
        ) {
            (Some(first), Some(second)) => (first, second),
            _ => {
                return Err(FacadeError::validation(
                    "both pokemon1 and pokemon2 are required",
                ))
            }
        };

        let first_stats = self.source.fetch_summary(&first.to_lowercase()).await?;
        let second_stats = self.source.fetch_summary(&second.to_lowercase()).await?;
        let result = self.strategy.compare(&first_stats, &second_stats);

        // The verdict is still returned when archiving fails.
        let key = comparison_key(first, second, request_id);
        match self.storage.write_file(&key, result.as_bytes()).await {
            Ok(()) => tracing::info!("Comparison stored as {}", key),
            Err(e) => tracing::error!("Could not store comparison {}: {}", key, e),
        }

        Ok(CompareResult { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    fn summary(nombre: &str, stats: [u32; 4]) -> PokemonSummary {
        PokemonSummary {
            nombre: nombre.to_string(),
            hp: stats[0],
            ataque: stats[1],
            defensa: stats[2],
            velocidad: stats[3],
            tipos: vec![],
            habilidades: vec![],
        }
    }

    struct FixedSource(HashMap<String, PokemonSummary>);

    #[async_trait]
    impl SummarySource for FixedSource {
        async fn fetch_summary(&self, name: &str) -> Result<PokemonSummary> {
            self.0
                .get(name)
                .cloned()
                .ok_or_else(|| FacadeError::not_found(Resource::Pokemon, name))
        }
    }

    #[derive(Default)]
    struct MemoryStorage {
        files: Mutex<HashMap<String, Vec<u8>>>,
        fail: bool,
    }

    impl Storage for MemoryStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.fail {
                return Err(FacadeError::StorageError {
                    message: "bucket unavailable".to_string(),
                });
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn source() -> Arc<dyn SummarySource> {
        let mut known = HashMap::new();
        known.insert("pikachu".to_string(), summary("pikachu", [35, 55, 40, 90]));
        known.insert("bulbasaur".to_string(), summary("bulbasaur", [45, 49, 49, 45]));
        known.insert("raichu".to_string(), summary("raichu", [60, 90, 55, 110]));
        Arc::new(FixedSource(known))
    }

    fn request(first: Option<&str>, second: Option<&str>) -> CompareRequest {
        CompareRequest {
            pokemon1: first.map(str::to_string),
            pokemon2: second.map(str::to_string),
        }
    }

    #[test]
    fn test_sum_of_base_stats_verdicts() {
        let strategy = SumOfBaseStats;
        let pikachu = summary("pikachu", [35, 55, 40, 90]);
        let bulbasaur = summary("bulbasaur", [45, 49, 49, 45]);

        assert_eq!(
            strategy.compare(&pikachu, &bulbasaur),
            "Pikachu (220 stats) es más fuerte que Bulbasaur (188 stats)."
        );
        assert_eq!(
            strategy.compare(&bulbasaur, &pikachu),
            "Pikachu (220 stats) es más fuerte que Bulbasaur (188 stats)."
        );
        assert_eq!(
            strategy.compare(&pikachu, &pikachu),
            "Pikachu (220 stats) y Pikachu (220 stats) tienen la misma fuerza."
        );
    }

    #[test]
    fn test_large_stats_do_not_overflow() {
        let strategy = SumOfBaseStats;
        let glitch = summary("missingno", [u32::MAX, 1, 0, 0]);
        let maxed = summary("arceus", [u32::MAX, 0, 0, 0]);

        assert_eq!(glitch.base_stat_total(), u64::from(u32::MAX) + 1);
        assert_eq!(
            strategy.compare(&maxed, &glitch),
            "Missingno (4294967296 stats) es más fuerte que Arceus (4294967295 stats)."
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("mr-mime"), "Mr-mime");
        assert_eq!(capitalize("PIKACHU"), "Pikachu");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn test_compare_stores_verdict() {
        let service = CompareService::new(source(), MemoryStorage::default());

        let result = service
            .compare(&request(Some("Raichu"), Some("pikachu")), "req-1")
            .await
            .unwrap();

        assert_eq!(
            result.result,
            "Raichu (315 stats) es más fuerte que Pikachu (220 stats)."
        );
        let files = service.storage.files.lock().await;
        assert_eq!(
            files["comparison_Raichu_vs_pikachu_req-1.txt"],
            result.result.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_fatal() {
        let storage = MemoryStorage {
            fail: true,
            ..Default::default()
        };
        let service = CompareService::new(source(), storage);

        let result = service
            .compare(&request(Some("pikachu"), Some("bulbasaur")), "req-2")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_names_are_rejected() {
        let service = CompareService::new(source(), MemoryStorage::default());

        for req in [
            request(None, Some("pikachu")),
            request(Some("pikachu"), None),
            request(Some("  "), Some("pikachu")),
        ] {
            let err = service.compare(&req, "req-3").await.unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Validation);
        }
    }

    #[tokio::test]
    async fn test_unknown_pokemon_is_not_found() {
        let service = CompareService::new(source(), MemoryStorage::default());

        let err = service
            .compare(&request(Some("pikachu"), Some("Agumon")), "req-4")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FacadeError::NotFoundError { ref identifier, .. } if identifier == "agumon"
        ));
    }

    struct AlwaysFirst;

    impl ComparisonStrategy for AlwaysFirst {
        fn compare(&self, first: &PokemonSummary, _second: &PokemonSummary) -> String {
            first.nombre.clone()
        }
    }

    #[tokio::test]
    async fn test_custom_strategy() {
        let service = CompareService::new(source(), MemoryStorage::default())
            .with_strategy(Box::new(AlwaysFirst));

        let result = service
            .compare(&request(Some("bulbasaur"), Some("raichu")), "req-5")
            .await
            .unwrap();

        assert_eq!(result.result, "bulbasaur");
    }
}
