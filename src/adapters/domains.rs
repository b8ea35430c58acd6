use crate::domain::model::DomainRecord;
use crate::domain::ports::DomainSource;
use crate::utils::error::{DocsError, Result};
use std::path::Path;

/// Domain list held in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct StaticDomainSource {
    records: Vec<DomainRecord>,
}

impl StaticDomainSource {
    pub fn new(records: Vec<DomainRecord>) -> Self {
        Self { records }
    }

    /// Reads `domains.json`: `[["docs.example.com", "owner/repo"], ...]`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(&path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_json::from_str(raw)?;

        let records = pairs
            .into_iter()
            .map(|(domain, repository)| {
                if domain.trim().is_empty() || !repository.contains('/') {
                    return Err(DocsError::InvalidConfigValueError {
                        field: "domains".to_string(),
                        value: format!("{} => {}", domain, repository),
                        reason: "expected a domain and an owner/repo pair".to_string(),
                    });
                }
                Ok(DomainRecord { domain, repository })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Loaded {} custom domains", records.len());
        Ok(Self { records })
    }
}

impl DomainSource for StaticDomainSource {
    fn domains_list(&self) -> &[DomainRecord] {
        &self.records
    }
}
