use anyhow::{Context, Result};
use clap::Parser;
use docs_page::app::build_services;
use docs_page::core::slug::slug_from_path;
use docs_page::utils::logger;
use docs_page::ServerConfig;

/// Renders a single slug and prints the outcome as JSON.
#[derive(Debug, Parser)]
#[command(name = "render_slug")]
struct Args {
    /// Slug to render, e.g. `invertase/docs.page~next/getting-started`
    slug: String,

    #[arg(long, short)]
    config: Option<String>,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let config = ServerConfig::load_validated(args.config.as_deref()).map_err(|e| {
        eprintln!("💡 {}", e.recovery_suggestion());
        anyhow::anyhow!("invalid configuration: {}", e.user_friendly_message())
    })?;

    let services = build_services(&config).context("failed to initialise services")?;
    let outcome = services
        .renderer
        .static_props(slug_from_path(&args.slug))
        .await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
