use crate::domain::model::{CustomDomain, DomainRecord, PullRequestMetadata};
use serde::{Deserialize, Serialize};

const REF_SEPARATOR: char = '~';
const DEFAULT_PATH: &str = "index";

/// What a slug points at: `owner/repository[~ref]/path...`.
///
/// Values are never mutated in place; the resolution steps return updated
/// copies instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    pub owner: String,
    pub repository: String,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub path: String,
    /// Pull request number this page was resolved from.
    pub pull_request: Option<u64>,
    /// Repository default branch, once known.
    pub base_branch: Option<String>,
}

impl Properties {
    pub fn from_slug(slug: &[String]) -> Self {
        let owner = slug.first().cloned().unwrap_or_default();

        let (repository, git_ref) = match slug.get(1) {
            Some(segment) => match segment.split_once(REF_SEPARATOR) {
                Some((repo, r)) if !r.is_empty() => (repo.to_string(), Some(r.to_string())),
                Some((repo, _)) => (repo.to_string(), None),
                None => (segment.clone(), None),
            },
            None => (String::new(), None),
        };

        let path = if slug.len() > 2 {
            slug[2..].join("/")
        } else {
            DEFAULT_PATH.to_string()
        };

        Self {
            owner,
            repository,
            git_ref,
            path,
            pull_request: None,
            base_branch: None,
        }
    }

    /// A ref made only of digits names a pull request.
    pub fn pull_request_number(&self) -> Option<u64> {
        let r = self.git_ref.as_deref()?;
        if r.is_empty() || !r.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        r.parse().ok()
    }

    /// Points the properties at the pull request's source branch.
    pub fn with_pull_request(&self, metadata: &PullRequestMetadata) -> Self {
        Self {
            owner: metadata.owner.clone(),
            repository: metadata.repository.clone(),
            git_ref: Some(metadata.git_ref.clone()),
            pull_request: self.pull_request_number(),
            ..self.clone()
        }
    }

    /// Records the default branch, adopting it as the ref when none was given.
    pub fn with_base_ref(&self, base_branch: &str) -> Self {
        Self {
            git_ref: self
                .git_ref
                .clone()
                .or_else(|| Some(base_branch.to_string())),
            base_branch: Some(base_branch.to_string()),
            ..self.clone()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }

    /// Root URL of the documentation site. The ref is included only when it
    /// differs from the default branch.
    pub fn base_path(&self) -> String {
        let mut base = format!("/{}/{}", self.owner, self.repository);
        if let Some(r) = &self.git_ref {
            if self.base_branch.as_deref() != Some(r.as_str()) {
                base.push(REF_SEPARATOR);
                base.push_str(r);
            }
        }
        base
    }

    pub fn custom_domain(&self, domains: &[DomainRecord]) -> CustomDomain {
        let full_name = self.full_name();
        domains
            .iter()
            .find(|record| record.repository.eq_ignore_ascii_case(&full_name))
            .map(|record| record.domain.clone())
    }
}
