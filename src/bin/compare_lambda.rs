#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use pokeapi_facade::adapters::gateway::{compare_unavailable, handle_compare_request};
#[cfg(feature = "lambda")]
use pokeapi_facade::domain::model::GatewayRequest;
#[cfg(feature = "lambda")]
use pokeapi_facade::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use pokeapi_facade::{CompareLambdaConfig, CompareService, Result, S3Storage, SummaryClient};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn build_service(config: &CompareLambdaConfig) -> Result<CompareService<S3Storage>> {
    config.validate()?;

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .region(Region::new(config.s3_region.clone()))
        .build();
    let storage = S3Storage::new(S3Client::from_conf(s3_config), config.s3_bucket.clone());

    let source = SummaryClient::new(&config.pokemon_service_url)?;
    Ok(CompareService::new(Arc::new(source), storage))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> std::result::Result<(), Error> {
    logger::init_lambda_logger();

    // A misconfigured function still answers every request, with a 500.
    let service = match CompareLambdaConfig::from_env() {
        Ok(config) => build_service(&config).await,
        Err(e) => Err(e),
    };
    match &service {
        Ok(_) => tracing::info!("Comparison function ready"),
        Err(e) => tracing::error!("Comparison function is not configured: {}", e),
    }

    let service = &service;
    run(service_fn(move |event: LambdaEvent<GatewayRequest>| async move {
        let response = match service {
            Ok(service) => {
                handle_compare_request(service, &event.payload, &event.context.request_id).await
            }
            Err(e) => compare_unavailable(e),
        };
        Ok::<_, Error>(response)
    }))
    .await
}
