use crate::core::ConfigProvider;
use crate::utils::error::{FacadeError, Result};
use crate::utils::validation::{validate_socket_address, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub upstream: Option<UpstreamSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub base_url: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FacadeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FacadeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${POKEAPI_BASE_URL})；未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FacadeError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_address(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.bind_address.as_deref())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.upstream.as_ref().and_then(|u| u.base_url.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn pokeapi_base_url(&self) -> &str {
        self.base_url()
            .unwrap_or(crate::core::fetcher::DEFAULT_POKEAPI_BASE_URL)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(address) = self.bind_address() {
            validate_socket_address("server.bind_address", address)?;
        }
        if let Some(url) = self.base_url() {
            validate_url("upstream.base_url", url)?;
        }
        Ok(())
    }
}
