use crate::core::fetcher::DEFAULT_POKEAPI_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use std::env;

#[cfg(feature = "lambda")]
use crate::core::Storage;
#[cfg(feature = "lambda")]
use crate::utils::error::FacadeError;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).filter(|value| !value.trim().is_empty());
    validate_required_field(key, &value).cloned()
}

/// Environment of the type function.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub pokeapi_base_url: String,
}

impl LambdaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            pokeapi_base_url: lookup("POKEAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_POKEAPI_BASE_URL.to_string()),
        }
    }
}

impl ConfigProvider for LambdaConfig {
    fn pokeapi_base_url(&self) -> &str {
        &self.pokeapi_base_url
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_url("POKEAPI_BASE_URL", &self.pokeapi_base_url)
    }
}

/// Environment of the comparison function.
#[derive(Debug, Clone)]
pub struct CompareLambdaConfig {
    pub pokemon_service_url: String,
    pub s3_bucket: String,
    pub s3_region: String,
}

impl CompareLambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            pokemon_service_url: required(&lookup, "POKEMON_SERVICE_URL")?,
            s3_bucket: required(&lookup, "S3_BUCKET_NAME")?,
            s3_region: lookup("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        })
    }
}

impl Validate for CompareLambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_url("POKEMON_SERVICE_URL", &self.pokemon_service_url)?;
        validate_non_empty_string("S3_BUCKET_NAME", &self.s3_bucket)?;
        validate_non_empty_string("S3_REGION", &self.s3_region)?;

        tracing::info!("✅ Comparison function configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| FacadeError::StorageError {
                message: format!(
                    "Failed to write s3://{}/{}: {}",
                    self.bucket,
                    path,
                    e.into_service_error()
                ),
            })?;

        tracing::debug!("Stored s3://{}/{}", self.bucket, path);
        Ok(())
    }
}
