use clap::Parser;
use pokeapi_facade::adapters::http;
use pokeapi_facade::utils::{logger, validation::Validate};
use pokeapi_facade::{CliConfig, PokeApiClient, PokemonService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pokeapi-facade stats service");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = PokeApiClient::from_config(&settings)?;
    let app = http::routes(PokemonService::new(Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(&settings.bind_address).await?;
    tracing::info!(
        "🚀 Listening on {} (upstream: {})",
        listener.local_addr()?,
        settings.pokeapi_base_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
