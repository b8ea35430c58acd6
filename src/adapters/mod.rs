// Adapters layer: concrete implementations of the domain ports.

pub mod domains;
pub mod frontmatter;
pub mod github;
pub mod markdown;

pub use domains::StaticDomainSource;
pub use github::GithubClient;
pub use markdown::MarkdownRenderer;
