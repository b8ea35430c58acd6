use crate::domain::error::RenderError;
use crate::domain::model::{
    DomainRecord, PageContent, PathDescriptor, PullRequestMetadata, Repository, Serialization,
};
use crate::domain::properties::Properties;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Repositories known to the platform, used for build-time path enumeration.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn repository_list(&self) -> Result<Vec<Repository>>;
    async fn repositories_paths(&self, repositories: &[Repository]) -> Result<Vec<PathDescriptor>>;
}

#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// `None` when the pull request cannot be found or the lookup fails.
    async fn pull_request_metadata(
        &self,
        owner: &str,
        repository: &str,
        number: u64,
    ) -> Option<PullRequestMetadata>;
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// `None` when the repository does not exist.
    async fn page_content(&self, properties: &Properties) -> Option<PageContent>;
}

pub trait DomainSource: Send + Sync {
    fn domains_list(&self) -> &[DomainRecord];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeError {
    pub message: String,
}

#[async_trait]
pub trait MarkdownSerializer: Send + Sync {
    async fn serialize(&self, content: &PageContent) -> std::result::Result<Serialization, SerializeError>;
}

/// Per-request lifecycle callbacks. Registered once when the renderer is
/// built; every request fires `on_start` and then exactly one of
/// `on_complete` / `on_error`.
pub trait RenderHooks: Send + Sync {
    fn on_start(&self, _slug: &[String]) {}
    fn on_complete(&self, _properties: &Properties) {}
    fn on_error(&self, _error: &RenderError) {}
}

pub struct NoopHooks;

impl RenderHooks for NoopHooks {}
