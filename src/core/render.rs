use crate::core::slug::normalize_slug;
use crate::domain::error::{RenderError, RenderErrorObject};
use crate::domain::model::{CustomDomain, HeadingNode, PageContent};
use crate::domain::properties::Properties;
use crate::domain::ports::{
    ContentSource, DomainSource, MarkdownSerializer, NoopHooks, PullRequestSource, RenderHooks,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Seconds a rendered page may be served stale before regeneration.
pub const REVALIDATE_SECONDS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    pub domain: CustomDomain,
    pub properties: Properties,
    pub source: Option<String>,
    pub headings: Vec<HeadingNode>,
    pub content: Option<PageContent>,
    pub error: Option<RenderErrorObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticProps {
    pub props: PageProps,
    pub revalidate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub destination: String,
    pub permanent: bool,
}

impl Redirect {
    /// Absolute URLs are followed as-is; anything else is relative to the
    /// documentation root of the current repository.
    pub fn to_page(destination: &str, properties: &Properties) -> Self {
        let destination = if destination.starts_with("http://") || destination.starts_with("https://") {
            destination.to_string()
        } else {
            let base = properties.base_path();
            let trimmed = destination.trim_start_matches('/');
            if trimmed.is_empty() {
                base
            } else {
                format!("{}/{}", base, trimmed)
            }
        };

        Self {
            destination,
            permanent: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderOutcome {
    Props(StaticProps),
    Redirect(Redirect),
}

/// Resolves slugs into page props. Each call is independent; the renderer
/// itself holds only shared, read-only collaborators.
#[derive(Clone)]
pub struct DocsRenderer {
    pull_requests: Arc<dyn PullRequestSource>,
    content: Arc<dyn ContentSource>,
    domains: Arc<dyn DomainSource>,
    serializer: Arc<dyn MarkdownSerializer>,
    hooks: Arc<dyn RenderHooks>,
}

impl DocsRenderer {
    pub fn new(
        pull_requests: Arc<dyn PullRequestSource>,
        content: Arc<dyn ContentSource>,
        domains: Arc<dyn DomainSource>,
        serializer: Arc<dyn MarkdownSerializer>,
    ) -> Self {
        Self {
            pull_requests,
            content,
            domains,
            serializer,
            hooks: Arc::new(NoopHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn RenderHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn domains(&self) -> &dyn DomainSource {
        self.domains.as_ref()
    }

    pub async fn static_props(&self, slug: Vec<String>) -> RenderOutcome {
        let slug = normalize_slug(slug);
        self.hooks.on_start(&slug);

        let mut properties = Properties::from_slug(&slug);

        // A numeric ref is a pull request, which may live on a fork.
        if let Some(number) = properties.pull_request_number() {
            match self
                .pull_requests
                .pull_request_metadata(&properties.owner, &properties.repository, number)
                .await
            {
                Some(metadata) => {
                    tracing::debug!(
                        "Resolved PR #{} of {} to {}/{}@{}",
                        number,
                        properties.full_name(),
                        metadata.owner,
                        metadata.repository,
                        metadata.git_ref
                    );
                    properties = properties.with_pull_request(&metadata);
                }
                None => {
                    tracing::warn!("No metadata for PR #{} of {}", number, properties.full_name());
                }
            }
        }

        let mut source = None;
        let headings: Vec<HeadingNode> = Vec::new();
        let mut error = None;

        let content = match self.content.page_content(&properties).await {
            None => {
                error = Some(RenderError::repository_not_found(&properties));
                None
            }
            Some(content) => {
                if let Some(destination) = content.frontmatter.redirect.as_deref() {
                    let redirect = Redirect::to_page(destination, &properties);
                    tracing::info!("Redirecting {} to {}", properties.full_name(), redirect.destination);
                    self.hooks.on_complete(&properties);
                    return RenderOutcome::Redirect(redirect);
                }

                // The repository exists; the file for this path still might not.
                properties = properties.with_base_ref(&content.base_branch);

                if content.markdown.is_some() {
                    match self.serializer.serialize(&content).await {
                        Ok(serialization) => {
                            source = Some(serialization.source);
                            Some(content.with_headings(serialization.headings))
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to serialize {}/{}: {}",
                                properties.full_name(),
                                properties.path,
                                e.message
                            );
                            error = Some(RenderError::server_error(&properties));
                            Some(content)
                        }
                    }
                } else {
                    error = Some(RenderError::page_not_found(&properties));
                    Some(content)
                }
            }
        };

        match &error {
            Some(e) => {
                tracing::info!("Rendered error page: {}", e);
                self.hooks.on_error(e);
            }
            None => {
                tracing::debug!("Rendered {}/{}", properties.full_name(), properties.path);
                self.hooks.on_complete(&properties);
            }
        }

        RenderOutcome::Props(StaticProps {
            props: PageProps {
                domain: properties.custom_domain(self.domains.domains_list()),
                properties,
                source,
                headings,
                content,
                error: error.map(|e| e.to_object()),
            },
            revalidate: REVALIDATE_SECONDS,
        })
    }
}

/// Logs request lifecycle events through `tracing`.
pub struct TracingHooks;

impl RenderHooks for TracingHooks {
    fn on_start(&self, slug: &[String]) {
        tracing::debug!("Render started: /{}", slug.join("/"));
    }

    fn on_complete(&self, properties: &Properties) {
        tracing::debug!("Render complete: {}", properties.base_path());
    }

    fn on_error(&self, error: &RenderError) {
        tracing::debug!("Render failed: {} ({})", error, error.status_code());
    }
}
