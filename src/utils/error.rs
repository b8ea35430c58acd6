use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected response from {url}: status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl DocsError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DocsError::ConfigError { .. }
                | DocsError::ConfigValidationError { .. }
                | DocsError::InvalidConfigValueError { .. }
                | DocsError::MissingConfigError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DocsError::ApiError(_) | DocsError::UnexpectedStatus { .. } => {
                "Could not reach the repository hosting service".to_string()
            }
            DocsError::IoError(e) => format!("Could not read a local file: {}", e),
            DocsError::SerializationError(e) => format!("Malformed JSON data: {}", e),
            DocsError::ConfigError { message } => message.clone(),
            DocsError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            DocsError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            DocsError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DocsError::ApiError(_) | DocsError::UnexpectedStatus { .. } => {
                "Check network connectivity and the GitHub token, then retry"
            }
            DocsError::IoError(_) => "Check that the file exists and is readable",
            DocsError::SerializationError(_) => "Check the JSON file for syntax errors",
            _ => "Fix the configuration file and restart the server",
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsError>;
