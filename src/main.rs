use clap::Parser;
use docs_page::app::{build_services, HttpServer};
use docs_page::core::paths::static_paths;
use docs_page::utils::{logger, validation::Validate};
use docs_page::CliConfig;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting docs-page server");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let services = match build_services(&config) {
        Ok(services) => services,
        Err(e) => {
            tracing::error!("❌ Failed to initialise services: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(if e.is_config_error() { 1 } else { 2 });
        }
    };

    // Enumeration failures are not fatal: pages still render on demand.
    let paths = match static_paths(config.server.mode, services.github.as_ref()).await {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!("Static path enumeration failed, serving on demand only: {}", e);
            docs_page::domain::model::StaticPaths {
                paths: Vec::new(),
                fallback: true,
            }
        }
    };

    let listener = TcpListener::bind(&config.server.bind).await?;
    HttpServer::new(services.renderer, paths).run(listener).await?;

    Ok(())
}
