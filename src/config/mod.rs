pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::AppConfig;
    use crate::app::output::OutputFormat;
    use crate::domain::dto::Language;
    use crate::domain::model::DisplayOrderType;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "eventhub")]
    #[command(about = "Browse, search and bookmark local events from KudaGo")]
    pub struct CliConfig {
        #[arg(long, global = true, help = "Path to a TOML config file")]
        pub config: Option<PathBuf>,

        #[arg(long, global = true, help = "Override the API base URL")]
        pub base_url: Option<String>,

        #[arg(long, global = true, value_enum)]
        pub language: Option<Language>,

        #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
        pub format: OutputFormat,

        #[arg(long, global = true, value_enum, help = "Sort event lists")]
        pub order: Option<DisplayOrderType>,

        #[arg(long, global = true, help = "Directory for bookmarks.json")]
        pub bookmarks_path: Option<String>,

        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
    pub enum Command {
        /// List the cities KudaGo covers
        Locations,
        /// List event categories
        Categories,
        /// Events of one category in one city
        Events {
            #[arg(long)]
            category: String,
            #[arg(long)]
            location: Option<String>,
            #[arg(long, default_value_t = 1)]
            page: u32,
        },
        /// Upcoming events, optionally of one category
        Upcoming {
            #[arg(long)]
            category: Option<String>,
            #[arg(long, default_value_t = 1)]
            page: u32,
        },
        /// Events near the current location
        Nearby {
            #[arg(long)]
            location: Option<String>,
            #[arg(long)]
            category: Option<String>,
            #[arg(long, default_value_t = 1)]
            page: u32,
        },
        /// Show one event
        Details { id: i64 },
        /// Full-text search
        Search { text: String },
        /// Manage bookmarked events
        Bookmarks {
            #[command(subcommand)]
            action: BookmarkAction,
        },
    }

    #[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
    pub enum BookmarkAction {
        List,
        Add { id: i64 },
        Remove { id: i64 },
        Clear,
    }

    impl CliConfig {
        /// 讀取設定檔（若有），再套用命令列參數
        pub fn resolve_app_config(&self) -> Result<AppConfig> {
            let mut config = match &self.config {
                Some(path) => {
                    tracing::debug!("Loading config from {}", path.display());
                    AppConfig::from_file(path)?
                }
                None => AppConfig::default(),
            };

            if let Some(base_url) = &self.base_url {
                config.api.base_url = base_url.clone();
            }
            if let Some(language) = self.language {
                config.api.language = language;
            }
            if let Some(path) = &self.bookmarks_path {
                config.bookmarks.path = path.clone();
            }

            config.validate()?;
            Ok(config)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(base_url) = &self.base_url {
                validation::validate_url("--base-url", base_url)?;
            }

            match &self.command {
                Command::Events {
                    category,
                    location,
                    page,
                } => {
                    validation::validate_slug("--category", category)?;
                    if let Some(location) = location {
                        validation::validate_slug("--location", location)?;
                    }
                    validation::validate_positive_number("--page", *page, 1)?;
                }
                Command::Upcoming { category, page } => {
                    if let Some(category) = category {
                        validation::validate_slug("--category", category)?;
                    }
                    validation::validate_positive_number("--page", *page, 1)?;
                }
                Command::Nearby {
                    location,
                    category,
                    page,
                } => {
                    if let Some(location) = location {
                        validation::validate_slug("--location", location)?;
                    }
                    if let Some(category) = category {
                        validation::validate_slug("--category", category)?;
                    }
                    validation::validate_positive_number("--page", *page, 1)?;
                }
                Command::Search { text } => validation::validate_non_empty_string("text", text)?,
                Command::Locations
                | Command::Categories
                | Command::Details { .. }
                | Command::Bookmarks { .. } => {}
            }

            Ok(())
        }
    }

}

#[cfg(feature = "cli")]
pub use cli::{BookmarkAction, CliConfig, Command};
