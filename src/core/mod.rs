pub mod context;
pub mod paths;
pub mod render;
pub mod slug;

pub use crate::domain::model::{PageContent, StaticPaths};
pub use crate::domain::ports::{ContentSource, MarkdownSerializer, PullRequestSource, RepositorySource};
pub use crate::utils::error::Result;
