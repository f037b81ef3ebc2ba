use crate::app::output::{self, OutputFormat};
use crate::config::{AppConfig, BookmarkAction, Command};
use crate::core::{BookmarkStore, DetailViewModel, ExploreViewModel};
use crate::domain::model::{DisplayOrderType, ExploreEvent};
use crate::domain::ports::{ConfigProvider, EventApi, Storage};
use crate::utils::error::{EventHubError, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// 一個指令的結果：輸出內容，加上 view model 捕捉到的錯誤
#[derive(Debug)]
pub struct CommandOutcome {
    pub output: String,
    pub error: Option<Arc<EventHubError>>,
}

impl CommandOutcome {
    fn new(output: String, error: Option<Arc<EventHubError>>) -> Self {
        Self { output, error }
    }

    fn ok(output: String) -> Self {
        Self::new(output, None)
    }
}

pub struct CommandRunner<S: Storage> {
    api: Arc<dyn EventApi>,
    config: AppConfig,
    bookmarks: BookmarkStore<S>,
    format: OutputFormat,
    order: Option<DisplayOrderType>,
}

impl<S: Storage> CommandRunner<S> {
    pub async fn new(
        api: Arc<dyn EventApi>,
        config: AppConfig,
        storage: S,
        format: OutputFormat,
        order: Option<DisplayOrderType>,
    ) -> Result<Self> {
        Ok(Self {
            api,
            config,
            bookmarks: BookmarkStore::load(storage).await?,
            format,
            order,
        })
    }

    fn explore(&self) -> ExploreViewModel {
        ExploreViewModel::with_settings(
            self.api.clone(),
            self.config.language(),
            self.config.default_location(),
            self.config.default_position(),
        )
    }

    async fn bookmarked_ids(&self) -> HashSet<i64> {
        self.bookmarks
            .list()
            .await
            .into_iter()
            .map(|b| b.event.id)
            .collect()
    }

    async fn render_events(&self, mut events: Vec<ExploreEvent>) -> Result<String> {
        if let Some(order) = self.order {
            order.sort(&mut events);
        }
        let bookmarked = self.bookmarked_ids().await;
        output::render_events(&events, &bookmarked, self.format)
    }

    pub async fn run(&self, command: &Command) -> Result<CommandOutcome> {
        tracing::debug!("Running {:?}", command);

        match command {
            Command::Locations => {
                let vm = self.explore();
                vm.fetch_locations().await;
                let state = vm.state();
                Ok(CommandOutcome::new(
                    output::render_locations(&state.locations, self.format)?,
                    state.error,
                ))
            }

            Command::Categories => {
                let vm = self.explore();
                vm.fetch_categories().await;
                let state = vm.state();
                Ok(CommandOutcome::new(
                    output::render_categories(&state.categories, self.format)?,
                    state.error,
                ))
            }

            Command::Events {
                category,
                location,
                page,
            } => {
                let location = location
                    .as_deref()
                    .unwrap_or_else(|| self.config.default_location());
                let response = self
                    .api
                    .get_events(category, location, Some(self.config.language()), *page)
                    .await?;
                if let Some(count) = response.count {
                    tracing::info!("📋 {} events in '{}' at {}", count, category, location);
                }
                let events = response.results.iter().map(ExploreEvent::from).collect();
                Ok(CommandOutcome::ok(self.render_events(events).await?))
            }

            Command::Upcoming { category, page } => {
                let vm = self
                    .explore()
                    .with_category(category.as_deref())
                    .with_page(*page);
                vm.fetch_upcoming_events().await;
                if let Some(order) = self.order {
                    vm.filter_events(order);
                }
                let state = vm.state();
                Ok(CommandOutcome::new(
                    self.render_events(state.upcoming_events).await?,
                    state.error,
                ))
            }

            Command::Nearby {
                location,
                category,
                page,
            } => {
                let vm = self
                    .explore()
                    .with_category(category.as_deref())
                    .with_page(*page);
                match location {
                    Some(location) => vm.set_current_location(location).await,
                    None => vm.fetch_nearby_events().await,
                }
                let state = vm.state();
                Ok(CommandOutcome::new(
                    self.render_events(state.nearby_events).await?,
                    state.error,
                ))
            }

            Command::Details { id } => {
                let vm = DetailViewModel::new(self.api.clone());
                vm.load(*id).await;
                let state = vm.state();
                let output = match &state.event {
                    Some(detail) => output::render_detail(
                        detail,
                        self.bookmarks.contains(*id).await,
                        self.format,
                    )?,
                    None => String::new(),
                };
                Ok(CommandOutcome::new(output, state.error))
            }

            Command::Search { text } => {
                let vm = self.explore();
                vm.set_search_text(text).await;
                let state = vm.state();
                Ok(CommandOutcome::new(
                    self.render_events(state.searched_events).await?,
                    state.error,
                ))
            }

            Command::Bookmarks { action } => self.run_bookmarks(action).await,
        }
    }

    async fn run_bookmarks(&self, action: &BookmarkAction) -> Result<CommandOutcome> {
        match action {
            BookmarkAction::List => {
                let bookmarks = self.bookmarks.list().await;
                Ok(CommandOutcome::ok(output::render_bookmarks(
                    &bookmarks,
                    self.format,
                )?))
            }
            BookmarkAction::Add { id } => {
                let dto = self.api.get_event_details(*id).await?;
                let event = ExploreEvent::from(&dto);
                let title = event.title.clone();
                let message = if self.bookmarks.add(event).await? {
                    format!("🔖 Bookmarked {} ({})", id, title)
                } else {
                    format!("{} ({}) is already bookmarked", id, title)
                };
                Ok(CommandOutcome::ok(message))
            }
            BookmarkAction::Remove { id } => {
                if self.bookmarks.remove(*id).await? {
                    Ok(CommandOutcome::ok(format!("Removed bookmark {}", id)))
                } else {
                    Err(EventHubError::NotFound {
                        what: format!("Bookmark {}", id),
                    })
                }
            }
            BookmarkAction::Clear => {
                let count = self.bookmarks.len().await;
                self.bookmarks.clear().await?;
                Ok(CommandOutcome::ok(format!("Removed {} bookmarks", count)))
            }
        }
    }
}
