use clap::Parser;
use parcel_scout::utils::logger;
use parcel_scout::{CliConfig, LocalStorage, SearchEngine, SearchPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting parcel-scout");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = match SearchPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Failed to set up the parcel client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let engine = SearchEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Parcel search completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Parcel search failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
