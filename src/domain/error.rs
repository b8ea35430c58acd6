use crate::domain::properties::Properties;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderErrorKind {
    RepositoryNotFound,
    PageNotFound,
    ServerError,
}

impl RenderErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            RenderErrorKind::RepositoryNotFound | RenderErrorKind::PageNotFound => 404,
            RenderErrorKind::ServerError => 500,
        }
    }
}

/// A classified rendering failure. These are page outcomes shown to the
/// reader, not faults propagated to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub kind: RenderErrorKind,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderErrorObject {
    pub kind: RenderErrorKind,
    pub status_code: u16,
    pub title: String,
    pub description: String,
    pub properties: Properties,
}

impl RenderError {
    pub fn repository_not_found(properties: &Properties) -> Self {
        Self::new(RenderErrorKind::RepositoryNotFound, properties)
    }

    pub fn page_not_found(properties: &Properties) -> Self {
        Self::new(RenderErrorKind::PageNotFound, properties)
    }

    pub fn server_error(properties: &Properties) -> Self {
        Self::new(RenderErrorKind::ServerError, properties)
    }

    fn new(kind: RenderErrorKind, properties: &Properties) -> Self {
        Self {
            kind,
            properties: properties.clone(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            RenderErrorKind::RepositoryNotFound => "Repository not found",
            RenderErrorKind::PageNotFound => "Page not found",
            RenderErrorKind::ServerError => "Something went wrong",
        }
    }

    pub fn description(&self) -> String {
        let p = &self.properties;
        match self.kind {
            RenderErrorKind::RepositoryNotFound => format!(
                "The repository {} could not be found. Check that it exists and is public.",
                p.full_name()
            ),
            RenderErrorKind::PageNotFound => format!(
                "No documentation page exists at docs/{}.mdx in {}.",
                p.path,
                p.full_name()
            ),
            RenderErrorKind::ServerError => format!(
                "The page docs/{}.mdx in {} could not be rendered.",
                p.path,
                p.full_name()
            ),
        }
    }

    pub fn to_object(&self) -> RenderErrorObject {
        RenderErrorObject {
            kind: self.kind,
            status_code: self.status_code(),
            title: self.title().to_string(),
            description: self.description(),
            properties: self.properties.clone(),
        }
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title(), self.properties.full_name())
    }
}
