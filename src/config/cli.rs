use crate::config::toml_config::ServerConfig;
use crate::core::paths::BuildMode;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "docs-page")]
#[command(about = "Serves documentation pages straight from GitHub repositories")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to the TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Address to listen on, overrides server.bind")]
    pub bind: Option<String>,

    #[arg(long, help = "Pre-render known repositories at startup")]
    pub production: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the configuration file (or defaults) and applies flag overrides.
    pub fn load(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                ServerConfig::from_file(path)?
            }
            None => ServerConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if self.production {
            config.server.mode = BuildMode::Production;
        }

        Ok(config)
    }
}
