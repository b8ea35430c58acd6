use crate::adapters::{GithubClient, MarkdownRenderer, StaticDomainSource};
use crate::config::ServerConfig;
use crate::core::render::{DocsRenderer, TracingHooks};
use crate::utils::error::Result;
use std::sync::Arc;

/// Long-lived collaborators, built once per process.
pub struct Services {
    pub renderer: DocsRenderer,
    pub github: Arc<GithubClient>,
}

pub fn build_services(config: &ServerConfig) -> Result<Services> {
    let github = Arc::new(GithubClient::new(&config.github, &config.content)?);

    let domains = match &config.content.domains_file {
        Some(path) => StaticDomainSource::from_file(path)?,
        None => StaticDomainSource::default(),
    };

    let renderer = DocsRenderer::new(
        github.clone(),
        github.clone(),
        Arc::new(domains),
        Arc::new(MarkdownRenderer::new(config.markdown.max_bytes)),
    )
    .with_hooks(Arc::new(TracingHooks));

    Ok(Services { renderer, github })
}
