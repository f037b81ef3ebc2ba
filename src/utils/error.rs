use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventHubError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Config,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EventHubError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EventHubError::ApiError(_) | EventHubError::UnexpectedStatus { .. } => {
                ErrorCategory::Network
            }
            EventHubError::DecodeError(_)
            | EventHubError::ValidationError { .. }
            | EventHubError::NotFound { .. } => ErrorCategory::Data,
            EventHubError::InvalidUrl(_)
            | EventHubError::ConfigError { .. }
            | EventHubError::InvalidConfigValueError { .. }
            | EventHubError::MissingConfigError { .. } => ErrorCategory::Config,
            EventHubError::IoError(_) | EventHubError::CsvError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventHubError::NotFound { .. } => ErrorSeverity::Low,
            EventHubError::ApiError(_) | EventHubError::UnexpectedStatus { .. } => {
                ErrorSeverity::Medium
            }
            EventHubError::DecodeError(_)
            | EventHubError::ValidationError { .. }
            | EventHubError::CsvError(_) => ErrorSeverity::High,
            EventHubError::InvalidUrl(_)
            | EventHubError::ConfigError { .. }
            | EventHubError::InvalidConfigValueError { .. }
            | EventHubError::MissingConfigError { .. }
            | EventHubError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EventHubError::ApiError(e) if e.is_timeout() => {
                "The events service did not answer in time".to_string()
            }
            EventHubError::ApiError(_) => "Could not reach the events service".to_string(),
            EventHubError::UnexpectedStatus { status, .. } => {
                format!("The events service answered with HTTP {}", status)
            }
            EventHubError::DecodeError(_) => {
                "The events service returned data in an unexpected format".to_string()
            }
            EventHubError::NotFound { what } => format!("{} was not found", what),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and try again later",
            ErrorCategory::Data => "Try a different query; the API response may have changed",
            ErrorCategory::Config => "Check the command line flags and the config file",
            ErrorCategory::Storage => "Check that the bookmarks directory is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, EventHubError>;
