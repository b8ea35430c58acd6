use crate::core::paths::BuildMode;
use crate::utils::error::{DocsError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub mode: BuildMode,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            mode: BuildMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_raw_url")]
    pub raw_url: String,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            raw_url: default_raw_url(),
            token: None,
            timeout_seconds: None,
        }
    }
}

impl GithubConfig {
    /// The token, unless it is empty or an unresolved `${VAR}` placeholder.
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.starts_with("${"))
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(10)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
    pub repositories_file: Option<String>,
    pub domains_file: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            repositories_file: None,
            domains_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_raw_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_docs_dir() -> String {
    "docs".to_string()
}

fn default_max_bytes() -> usize {
    crate::adapters::markdown::DEFAULT_MAX_BYTES
}

impl ServerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DocsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads the file when given, defaults otherwise, and validates the result.
    pub fn load_validated(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate_config()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DocsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GITHUB_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DocsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_socket_addr("server.bind", &self.server.bind)?;
        validate_url("github.api_url", &self.github.api_url)?;
        validate_url("github.raw_url", &self.github.raw_url)?;
        validate_positive_number("github.timeout_seconds", self.github.timeout_seconds() as usize, 1)?;
        validate_non_empty_string("content.docs_dir", &self.content.docs_dir)?;
        validate_positive_number("markdown.max_bytes", self.markdown.max_bytes, 1)?;

        if let Some(path) = &self.content.repositories_file {
            validate_path("content.repositories_file", path)?;
        }
        if let Some(path) = &self.content.domains_file {
            validate_path("content.domains_file", path)?;
        }

        if self.server.mode.is_production() && self.content.repositories_file.is_none() {
            return Err(DocsError::MissingConfigError {
                field: "content.repositories_file".to_string(),
            });
        }

        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = ServerConfig::from_toml_str("").unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.server.mode, BuildMode::Development);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.content.docs_dir, "docs");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:8080"
mode = "production"

[github]
api_url = "http://localhost:9000"
raw_url = "http://localhost:9001"
timeout_seconds = 3

[content]
docs_dir = "documentation"
repositories_file = "repositories.json"
domains_file = "domains.json"

[markdown]
max_bytes = 2048
"#;

        let config = ServerConfig::from_toml_str(toml_content).unwrap();

        assert!(config.server.mode.is_production());
        assert_eq!(config.github.timeout_seconds(), 3);
        assert_eq!(config.content.docs_dir, "documentation");
        assert_eq!(config.markdown.max_bytes, 2048);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOCS_PAGE_TEST_TOKEN", "ghp_test");

        let config = ServerConfig::from_toml_str(
            "[github]\ntoken = \"${DOCS_PAGE_TEST_TOKEN}\"\n",
        )
        .unwrap();
        assert_eq!(config.github.token(), Some("ghp_test"));

        std::env::remove_var("DOCS_PAGE_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_token_is_ignored() {
        let config = ServerConfig::from_toml_str(
            "[github]\ntoken = \"${DOCS_PAGE_UNSET_VARIABLE}\"\n",
        )
        .unwrap();
        assert_eq!(config.github.token(), None);
    }

    #[test]
    fn test_config_validation() {
        let config = ServerConfig::from_toml_str("[github]\napi_url = \"invalid-url\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = ServerConfig::from_toml_str("[server]\nmode = \"production\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(DocsError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:4000\"\n")
            .unwrap();

        let config = ServerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:4000");
    }

    #[test]
    fn test_load_validated_rejects_invalid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[github]\nraw_url = \"not a url\"\n")
            .unwrap();

        let result = ServerConfig::load_validated(temp_file.path().to_str());
        assert!(matches!(result, Err(ref e) if e.is_config_error()));

        let config = ServerConfig::load_validated(None).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }
}
