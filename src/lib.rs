pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{BookmarkAction, CliConfig, Command};

pub use adapters::{LocalStorage, MemoryStorage};
pub use api::{EventApiService, EventApiSpec};
pub use config::AppConfig;
pub use core::{BookmarkStore, DetailViewModel, ExploreViewModel};
pub use domain::ports::{ConfigProvider, EventApi, Storage};
pub use utils::error::{EventHubError, Result};
