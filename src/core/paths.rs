use crate::domain::model::StaticPaths;
use crate::domain::ports::RepositorySource;
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    #[default]
    Development,
}

impl BuildMode {
    pub fn is_production(self) -> bool {
        self == BuildMode::Production
    }
}

/// Pages to pre-render. Listing every repository is expensive, so outside
/// production nothing is pre-rendered and every page falls back to
/// on-demand rendering.
pub async fn static_paths<R: RepositorySource + ?Sized>(
    mode: BuildMode,
    repositories: &R,
) -> Result<StaticPaths> {
    let mut paths = Vec::new();

    if mode.is_production() {
        let list = repositories.repository_list().await?;
        paths = repositories.repositories_paths(&list).await?;
        tracing::info!("- gathered {} static pages.", paths.len());
    }

    Ok(StaticPaths {
        paths,
        fallback: true,
    })
}
