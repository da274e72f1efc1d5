#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use pokeapi_facade::adapters::gateway::handle_type_request;
#[cfg(feature = "lambda")]
use pokeapi_facade::domain::model::{GatewayRequest, GatewayResponse};
#[cfg(feature = "lambda")]
use pokeapi_facade::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use pokeapi_facade::{LambdaConfig, PokeApiClient, TypeService};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn function_handler(
    service: &TypeService,
    event: LambdaEvent<GatewayRequest>,
) -> Result<GatewayResponse, Error> {
    tracing::debug!("Invocation {}", event.context.request_id);
    Ok(handle_type_request(service, &event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env();
    config.validate()?;

    // Cold start: the HTTP client is built once and reused by every invocation.
    let client = PokeApiClient::from_config(&config)?;
    let service = TypeService::new(Arc::new(client));
    tracing::info!("Type function ready (upstream: {})", config.pokeapi_base_url);

    let service = &service;
    run(service_fn(move |event: LambdaEvent<GatewayRequest>| async move {
        function_handler(service, event).await
    }))
    .await
}
