pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::core::fetcher::DEFAULT_POKEAPI_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_socket_address, validate_url, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "pokeapi-facade")]
#[command(about = "Pokemon stats service backed by PokeAPI")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    #[arg(long, default_value = DEFAULT_POKEAPI_BASE_URL)]
    pub pokeapi_base_url: String,

    #[arg(long, help = "TOML file overriding the flags above")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Flags merged with the optional TOML file (file values win).
    pub fn settings(&self) -> Result<ServerSettings> {
        let settings = ServerSettings {
            bind_address: self.bind_address.clone(),
            pokeapi_base_url: self.pokeapi_base_url.clone(),
        };

        match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration file: {}", path);
                Ok(settings.merge(&TomlConfig::from_file(path)?))
            }
            None => Ok(settings),
        }
    }
}

/// Effective configuration of the stats server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_address: String,
    pub pokeapi_base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            pokeapi_base_url: DEFAULT_POKEAPI_BASE_URL.to_string(),
        }
    }
}

impl ServerSettings {
    pub fn merge(mut self, file: &TomlConfig) -> Self {
        if let Some(address) = file.bind_address() {
            self.bind_address = address.to_string();
        }
        if let Some(url) = file.base_url() {
            self.pokeapi_base_url = url.to_string();
        }
        self
    }
}

impl ConfigProvider for ServerSettings {
    fn pokeapi_base_url(&self) -> &str {
        &self.pokeapi_base_url
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validate_socket_address("bind_address", &self.bind_address)?;
        validate_url("pokeapi_base_url", &self.pokeapi_base_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_values_override_defaults() {
        let file = TomlConfig::from_toml_str("[upstream]\nbase_url = \"http://mirror.local/api/v2\"\n")
            .unwrap();

        let settings = ServerSettings::default().merge(&file);

        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.pokeapi_base_url(), "http://mirror.local/api/v2");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_settings() {
        let settings = ServerSettings {
            bind_address: "nowhere".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_defaults() {
        use clap::Parser;

        let cli = CliConfig::parse_from(["pokeapi-facade"]);
        assert_eq!(cli.settings().unwrap(), ServerSettings::default());
        assert!(!cli.verbose);

        let cli = CliConfig::parse_from([
            "pokeapi-facade",
            "--bind-address",
            "127.0.0.1:3000",
            "--verbose",
        ]);
        assert_eq!(cli.settings().unwrap().bind_address, "127.0.0.1:3000");
        assert!(cli.verbose);
    }
}
