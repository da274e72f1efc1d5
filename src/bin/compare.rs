use clap::Parser;
use pokeapi_facade::core::envelope::compare_error;
use pokeapi_facade::domain::model::CompareRequest;
use pokeapi_facade::utils::logger;
use pokeapi_facade::{CompareService, LocalStorage, SummaryClient};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "compare")]
#[command(about = "Compare two Pokémon through a running stats service")]
struct Args {
    pokemon1: String,

    pokemon2: String,

    /// Base URL of the stats service
    #[arg(long, default_value = "http://localhost:8080")]
    pokemon_service_url: String,

    /// Directory the verdict files are written to
    #[arg(short, long, default_value = "comparisons")]
    output_dir: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let source = match SummaryClient::new(&args.pokemon_service_url) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    let storage = LocalStorage::new(&args.output_dir);
    let service = CompareService::new(Arc::new(source), storage);

    // Stands in for the Lambda request id in the file name.
    let run_id = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
    let request = CompareRequest {
        pokemon1: Some(args.pokemon1),
        pokemon2: Some(args.pokemon2),
    };

    match service.compare(&request, &run_id).await {
        Ok(result) => {
            println!("{}", result.result);
            tracing::info!("📁 Verdict written under {}", args.output_dir);
            Ok(())
        }
        Err(e) => {
            let mapped = compare_error(&e);
            eprintln!("❌ {} ({})", mapped.message, mapped.status);
            std::process::exit(1);
        }
    }
}
