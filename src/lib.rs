pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::ServerConfig;
pub use crate::core::render::{DocsRenderer, RenderOutcome, StaticProps};
pub use utils::error::{DocsError, Result};
