//! In-memory collaborators for driving the renderer without a network.

#![allow(dead_code)]

use async_trait::async_trait;
use docs_page::domain::error::RenderError;
use docs_page::domain::model::{
    DomainRecord, Frontmatter, HeadingNode, PageContent, PullRequestMetadata, Serialization,
};
use docs_page::domain::ports::{
    ContentSource, DomainSource, MarkdownSerializer, PullRequestSource, RenderHooks, SerializeError,
};
use docs_page::domain::properties::Properties;
use docs_page::DocsRenderer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockPullRequests {
    pub metadata: HashMap<(String, String, u64), PullRequestMetadata>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl PullRequestSource for MockPullRequests {
    async fn pull_request_metadata(
        &self,
        owner: &str,
        repository: &str,
        number: u64,
    ) -> Option<PullRequestMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .get(&(owner.to_string(), repository.to_string(), number))
            .cloned()
    }
}

/// Pages keyed by `owner/repo`, plus every properties value requested.
#[derive(Default)]
pub struct MockContent {
    pub pages: HashMap<String, PageContent>,
    pub requests: Mutex<Vec<Properties>>,
}

impl MockContent {
    pub fn with_page(mut self, full_name: &str, content: PageContent) -> Self {
        self.pages.insert(full_name.to_string(), content);
        self
    }
}

#[async_trait]
impl ContentSource for MockContent {
    async fn page_content(&self, properties: &Properties) -> Option<PageContent> {
        self.requests.lock().unwrap().push(properties.clone());
        self.pages.get(&properties.full_name()).cloned()
    }
}

pub struct MockDomains(pub Vec<DomainRecord>);

impl DomainSource for MockDomains {
    fn domains_list(&self) -> &[DomainRecord] {
        &self.0
    }
}

#[derive(Default)]
pub struct MockSerializer {
    pub fail: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl MarkdownSerializer for MockSerializer {
    async fn serialize(&self, content: &PageContent) -> Result<Serialization, SerializeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SerializeError {
                message: "boom".to_string(),
            });
        }
        Ok(Serialization {
            source: format!("compiled:{}", content.markdown.clone().unwrap_or_default()),
            headings: vec![HeadingNode {
                id: "intro".to_string(),
                title: "Intro".to_string(),
                rank: 2,
            }],
        })
    }
}

#[derive(Default)]
pub struct RecordingHooks {
    pub events: Mutex<Vec<String>>,
}

impl RenderHooks for RecordingHooks {
    fn on_start(&self, slug: &[String]) {
        self.events.lock().unwrap().push(format!("start:{}", slug.join("/")));
    }

    fn on_complete(&self, properties: &Properties) {
        self.events.lock().unwrap().push(format!("complete:{}", properties.full_name()));
    }

    fn on_error(&self, error: &RenderError) {
        self.events.lock().unwrap().push(format!("error:{}", error.status_code()));
    }
}

pub fn page(markdown: Option<&str>) -> PageContent {
    PageContent {
        base_branch: "main".to_string(),
        markdown: markdown.map(str::to_string),
        ..Default::default()
    }
}

pub fn redirect_page(destination: &str) -> PageContent {
    PageContent {
        frontmatter: Frontmatter {
            redirect: Some(destination.to_string()),
            ..Default::default()
        },
        ..page(Some("# moved"))
    }
}

pub fn slug(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

pub struct Harness {
    pub pull_requests: Arc<MockPullRequests>,
    pub content: Arc<MockContent>,
    pub serializer: Arc<MockSerializer>,
    pub hooks: Arc<RecordingHooks>,
    pub renderer: DocsRenderer,
}

impl Harness {
    pub fn new(pull_requests: MockPullRequests, content: MockContent, serializer: MockSerializer) -> Self {
        let pull_requests = Arc::new(pull_requests);
        let content = Arc::new(content);
        let serializer = Arc::new(serializer);
        let hooks = Arc::new(RecordingHooks::default());

        let domains = MockDomains(vec![DomainRecord {
            domain: "docs.example.com".to_string(),
            repository: "acme/docs".to_string(),
        }]);

        let renderer = DocsRenderer::new(
            pull_requests.clone(),
            content.clone(),
            Arc::new(domains),
            serializer.clone(),
        )
        .with_hooks(hooks.clone());

        Self {
            pull_requests,
            content,
            serializer,
            hooks,
            renderer,
        }
    }

    pub fn serializer_calls(&self) -> usize {
        self.serializer.calls.load(Ordering::SeqCst)
    }
}
