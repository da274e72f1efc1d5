pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::S3Storage;

pub use config::cli::LocalStorage;
pub use config::lambda::{CompareLambdaConfig, LambdaConfig};
pub use config::ServerSettings;
pub use core::compare::{CompareService, SummaryClient};
pub use core::fetcher::PokeApiClient;
pub use core::service::{PokemonService, TypeService};
pub use utils::error::{FacadeError, Result};
