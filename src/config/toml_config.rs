use crate::api::spec::DEFAULT_BASE_URL;
use crate::api::service::DEFAULT_USER_AGENT;
use crate::core::explore::{DEFAULT_LOCATION, DEFAULT_POSITION};
use crate::domain::dto::Language;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EventHubError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_BOOKMARKS_PATH: &str = "./eventhub-data";

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub explore: ExploreConfig,
    pub bookmarks: BookmarksConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub language: Language,
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: Language::En,
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    pub default_location: String,
    pub default_position: String,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            default_position: DEFAULT_POSITION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarksConfig {
    pub path: String,
}

impl Default for BookmarksConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_BOOKMARKS_PATH.to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EventHubError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EventHubError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${KUDAGO_BASE_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn language(&self) -> Language {
        self.api.language
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    fn user_agent(&self) -> &str {
        &self.api.user_agent
    }

    fn default_location(&self) -> &str {
        &self.explore.default_location
    }

    fn default_position(&self) -> &str {
        &self.explore.default_position
    }

    fn bookmarks_path(&self) -> &str {
        &self.bookmarks.path
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_non_empty_string("api.user_agent", &self.api.user_agent)?;
        validation::validate_slug("explore.default_location", &self.explore.default_location)?;
        validation::validate_non_empty_string(
            "explore.default_position",
            &self.explore.default_position,
        )?;
        validation::validate_path("bookmarks.path", &self.bookmarks.path)?;

        Ok(())
    }
}
