use crate::adapters::frontmatter::split_frontmatter;
use crate::config::{ContentConfig, GithubConfig};
use crate::domain::model::{DocsConfig, PageContent, PathDescriptor, PullRequestMetadata, Repository};
use crate::domain::ports::{ContentSource, PullRequestSource, RepositorySource};
use crate::domain::properties::Properties;
use crate::utils::error::{DocsError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const USER_AGENT: &str = concat!("docs-page/", env!("CARGO_PKG_VERSION"));
const CONFIG_FILE: &str = "docs.json";

/// GitHub REST API for repository and pull request metadata, raw content
/// host for file bodies.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    raw_url: String,
    token: Option<String>,
    docs_dir: String,
    repositories_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    head: PullHead,
}

#[derive(Debug, Deserialize)]
struct PullHead {
    #[serde(rename = "ref")]
    git_ref: String,
    repo: Option<PullRepo>,
}

#[derive(Debug, Deserialize)]
struct PullRepo {
    name: String,
    owner: PullOwner,
}

#[derive(Debug, Deserialize)]
struct PullOwner {
    login: String,
}

impl GithubClient {
    pub fn new(github: &GithubConfig, content: &ContentConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(github.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            api_url: github.api_url.trim_end_matches('/').to_string(),
            raw_url: github.raw_url.trim_end_matches('/').to_string(),
            token: github.token().map(str::to_string),
            docs_dir: content.docs_dir.trim_matches('/').to_string(),
            repositories_file: content.repositories_file.as_ref().map(PathBuf::from),
        })
    }

    /// `Ok(None)` on 404, error on any other non-success status.
    async fn get(&self, url: &str) -> Result<Option<Response>> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response)),
            status => Err(DocsError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }),
        }
    }

    pub async fn default_branch(&self, owner: &str, repository: &str) -> Result<Option<String>> {
        let url = format!("{}/repos/{}/{}", self.api_url, owner, repository);
        match self.get(&url).await? {
            Some(response) => {
                let repo: RepoResponse = response.json().await?;
                Ok(Some(repo.default_branch))
            }
            None => Ok(None),
        }
    }

    pub async fn raw_file(
        &self,
        owner: &str,
        repository: &str,
        git_ref: &str,
        file: &str,
    ) -> Result<Option<String>> {
        let url = format!("{}/{}/{}/{}/{}", self.raw_url, owner, repository, git_ref, file);
        match self.get(&url).await? {
            Some(response) => Ok(Some(response.text().await?)),
            None => Ok(None),
        }
    }

    async fn docs_config(&self, owner: &str, repository: &str, git_ref: &str) -> Result<DocsConfig> {
        let Some(raw) = self.raw_file(owner, repository, git_ref, CONFIG_FILE).await? else {
            return Ok(DocsConfig::default());
        };

        match serde_json::from_str(&raw) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("Ignoring invalid {} in {}/{}: {}", CONFIG_FILE, owner, repository, e);
                Ok(DocsConfig::default())
            }
        }
    }

    /// `docs/{path}.mdx`, falling back to `docs/{path}/index.mdx`.
    fn markdown_candidates(&self, path: &str) -> Vec<String> {
        let path = path.trim_matches('/');
        if path.is_empty() || path == "index" {
            return vec![format!("{}/index.mdx", self.docs_dir)];
        }
        vec![
            format!("{}/{}.mdx", self.docs_dir, path),
            format!("{}/{}/index.mdx", self.docs_dir, path),
        ]
    }

    async fn fetch_page(&self, properties: &Properties) -> Result<Option<PageContent>> {
        let Some(base_branch) = self
            .default_branch(&properties.owner, &properties.repository)
            .await?
        else {
            return Ok(None);
        };

        let git_ref = properties.git_ref.as_deref().unwrap_or(&base_branch);
        let config = self
            .docs_config(&properties.owner, &properties.repository, git_ref)
            .await?;

        let mut raw_markdown = None;
        for candidate in self.markdown_candidates(&properties.path) {
            if let Some(raw) = self
                .raw_file(&properties.owner, &properties.repository, git_ref, &candidate)
                .await?
            {
                raw_markdown = Some(raw);
                break;
            }
        }

        let (frontmatter, markdown) = match raw_markdown {
            Some(raw) => {
                let (frontmatter, body) = split_frontmatter(&raw);
                (frontmatter, Some(body))
            }
            None => Default::default(),
        };

        Ok(Some(PageContent {
            config,
            frontmatter,
            base_branch,
            markdown,
            headings: Vec::new(),
        }))
    }

    async fn repository_paths(&self, repository: &Repository) -> Result<Vec<PathDescriptor>> {
        let mut paths = vec![PathDescriptor::new([&repository.owner, &repository.name])];

        let Some(base_branch) = self.default_branch(&repository.owner, &repository.name).await? else {
            return Ok(paths);
        };
        let config = self
            .docs_config(&repository.owner, &repository.name, &base_branch)
            .await?;

        for link in config.sidebar_links() {
            let segments: Vec<String> = link
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if segments.is_empty() {
                continue;
            }

            let mut slug = vec![repository.owner.clone(), repository.name.clone()];
            slug.extend(segments);
            paths.push(PathDescriptor { slug });
        }

        Ok(paths)
    }
}

#[async_trait]
impl ContentSource for GithubClient {
    async fn page_content(&self, properties: &Properties) -> Option<PageContent> {
        if properties.owner.is_empty() || properties.repository.is_empty() {
            return None;
        }

        match self.fetch_page(properties).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to fetch content for {}: {}", properties.full_name(), e);
                None
            }
        }
    }
}

#[async_trait]
impl PullRequestSource for GithubClient {
    async fn pull_request_metadata(
        &self,
        owner: &str,
        repository: &str,
        number: u64,
    ) -> Option<PullRequestMetadata> {
        let url = format!("{}/repos/{}/{}/pulls/{}", self.api_url, owner, repository, number);

        let response = match self.get(&url).await {
            Ok(response) => response?,
            Err(e) => {
                tracing::warn!("Pull request lookup failed for {}/{}#{}: {}", owner, repository, number, e);
                return None;
            }
        };

        let pull: PullResponse = match response.json().await {
            Ok(pull) => pull,
            Err(e) => {
                tracing::warn!("Unexpected pull request payload for {}/{}#{}: {}", owner, repository, number, e);
                return None;
            }
        };

        // A deleted fork leaves no head repository.
        let repo = pull.head.repo?;
        Some(PullRequestMetadata {
            owner: repo.owner.login,
            repository: repo.name,
            git_ref: pull.head.git_ref,
        })
    }
}

#[async_trait]
impl RepositorySource for GithubClient {
    async fn repository_list(&self) -> Result<Vec<Repository>> {
        let Some(path) = &self.repositories_file else {
            return Ok(Vec::new());
        };

        let raw = tokio::fs::read_to_string(path).await?;
        let names: Vec<String> = serde_json::from_str(&raw)?;

        Ok(names
            .iter()
            .filter_map(|name| {
                let repo = Repository::parse(name);
                if repo.is_none() {
                    tracing::warn!("Skipping invalid repository entry: {}", name);
                }
                repo
            })
            .collect())
    }

    async fn repositories_paths(&self, repositories: &[Repository]) -> Result<Vec<PathDescriptor>> {
        let mut paths = Vec::new();

        for repository in repositories {
            match self.repository_paths(repository).await {
                Ok(found) => paths.extend(found),
                Err(e) => {
                    tracing::warn!("Could not expand {}: {}", repository, e);
                    paths.push(PathDescriptor::new([&repository.owner, &repository.name]));
                }
            }
        }

        Ok(paths)
    }
}
