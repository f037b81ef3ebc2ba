use crate::core::categories::map_categories;
use crate::domain::dto::{EventDto, EventLocation, Language};
use crate::domain::model::{CategoryUiModel, DisplayOrderType, ExploreEvent};
use crate::domain::ports::EventApi;
use crate::utils::error::EventHubError;
use std::sync::Arc;
use tokio::sync::watch;

pub const FUNCTIONAL_BUTTONS: [&str; 3] = ["Today", "Films", "Lists"];
pub const DEFAULT_LOCATION: &str = "msk";
pub const DEFAULT_POSITION: &str = "Moscow";

/// Explore 畫面的可觀察狀態
#[derive(Debug, Clone)]
pub struct ExploreState {
    pub functional_buttons: Vec<String>,
    pub selected_button: Option<String>,
    pub current_position: String,
    pub search_text: String,
    pub searched_events: Vec<ExploreEvent>,
    pub upcoming_events: Vec<ExploreEvent>,
    pub nearby_events: Vec<ExploreEvent>,
    pub categories: Vec<CategoryUiModel>,
    pub locations: Vec<EventLocation>,
    pub error: Option<Arc<EventHubError>>,
    pub current_location: String,
    pub current_category: Option<String>,
    pub page: u32,
}

impl ExploreState {
    fn new(location: &str, position: &str) -> Self {
        Self {
            functional_buttons: FUNCTIONAL_BUTTONS.iter().map(|b| b.to_string()).collect(),
            selected_button: None,
            current_position: position.to_string(),
            search_text: String::new(),
            searched_events: Vec::new(),
            upcoming_events: Vec::new(),
            nearby_events: Vec::new(),
            categories: Vec::new(),
            locations: Vec::new(),
            error: None,
            current_location: location.to_string(),
            current_category: None,
            page: 1,
        }
    }
}

pub struct ExploreViewModel {
    api: Arc<dyn EventApi>,
    language: Language,
    state: watch::Sender<ExploreState>,
}

impl ExploreViewModel {
    pub fn new(api: Arc<dyn EventApi>) -> Self {
        Self::with_settings(api, Language::En, DEFAULT_LOCATION, DEFAULT_POSITION)
    }

    pub fn with_settings(
        api: Arc<dyn EventApi>,
        language: Language,
        location: &str,
        position: &str,
    ) -> Self {
        let (state, _) = watch::channel(ExploreState::new(location, position));
        Self {
            api,
            language,
            state,
        }
    }

    /// 初始分類，不觸發載入
    pub fn with_category(self, category: Option<&str>) -> Self {
        let category = category.map(str::to_string);
        self.state.send_modify(|s| s.current_category = category);
        self
    }

    pub fn with_page(self, page: u32) -> Self {
        self.set_page(page);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<ExploreState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ExploreState {
        self.state.borrow().clone()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn select_button(&self, name: &str) {
        let name = name.to_string();
        self.state.send_modify(|s| s.selected_button = Some(name));
    }

    pub fn set_page(&self, page: u32) {
        self.state.send_modify(|s| s.page = page.max(1));
    }

    pub fn filter_events(&self, order: DisplayOrderType) {
        self.state
            .send_modify(|s| order.sort(&mut s.upcoming_events));
    }

    pub async fn set_search_text(&self, text: &str) {
        let text = text.to_string();
        self.state.send_modify(|s| {
            s.search_text = text;
            s.error = None;
        });
        self.fetch_searched_events().await;
    }

    pub async fn set_current_location(&self, location: &str) {
        let location = location.to_string();
        self.state.send_modify(|s| {
            s.current_location = location;
            s.error = None;
        });
        self.fetch_nearby_events().await;
    }

    pub async fn set_current_category(&self, category: Option<&str>) {
        let category = category.map(str::to_string);
        self.state.send_modify(|s| {
            s.current_category = category;
            s.error = None;
        });
        self.fetch_upcoming_events().await;
        self.fetch_nearby_events().await;
    }

    /// 首次進入畫面時載入所有區塊
    pub async fn refresh_all(&self) {
        self.state.send_modify(|s| s.error = None);
        tokio::join!(
            self.fetch_locations(),
            self.fetch_categories(),
            self.fetch_upcoming_events(),
            self.fetch_nearby_events(),
        );
    }

    pub async fn fetch_locations(&self) {
        match self.api.get_locations(Some(self.language)).await {
            Ok(locations) => {
                tracing::debug!("Loaded {} locations", locations.len());
                self.state.send_modify(|s| s.locations = locations);
            }
            Err(e) => self.record_error("locations", e),
        }
    }

    pub async fn fetch_categories(&self) {
        match self.api.get_categories(Some(self.language)).await {
            Ok(categories) => {
                tracing::debug!("Loaded {} categories", categories.len());
                let categories = map_categories(categories);
                self.state.send_modify(|s| s.categories = categories);
            }
            Err(e) => self.record_error("categories", e),
        }
    }

    pub async fn fetch_upcoming_events(&self) {
        let (category, page) = {
            let s = self.state.borrow();
            (s.current_category.clone(), s.page)
        };

        match self
            .api
            .get_upcoming_events(category.as_deref(), Some(self.language), page)
            .await
        {
            Ok(events) => {
                let events = to_explore_events(events);
                tracing::debug!("Loaded {} upcoming events", events.len());
                self.state.send_modify(|s| s.upcoming_events = events);
            }
            Err(e) => self.record_error("upcoming events", e),
        }
    }

    pub async fn fetch_nearby_events(&self) {
        let (location, category, page) = {
            let s = self.state.borrow();
            (s.current_location.clone(), s.current_category.clone(), s.page)
        };

        match self
            .api
            .get_nearby_events(&location, category.as_deref(), Some(self.language), page)
            .await
        {
            Ok(events) => {
                let events = to_explore_events(events);
                tracing::debug!("Loaded {} events near {}", events.len(), location);
                self.state.send_modify(|s| s.nearby_events = events);
            }
            Err(e) => self.record_error("nearby events", e),
        }
    }

    pub async fn fetch_searched_events(&self) {
        let query = self.state.borrow().search_text.trim().to_string();
        if query.is_empty() {
            self.state.send_modify(|s| s.searched_events.clear());
            return;
        }

        match self.api.search_events(&query).await {
            Ok(events) => {
                let events = to_explore_events(events);
                tracing::debug!("Search '{}' returned {} events", query, events.len());
                self.state.send_modify(|s| {
                    // 搜尋字串已變更時丟棄過期結果
                    if s.search_text.trim() == query {
                        s.searched_events = events;
                    }
                });
            }
            Err(e) => {
                let current = self.state.borrow().search_text.trim() == query;
                if current {
                    self.record_error("search", e);
                } else {
                    tracing::debug!("Dropping stale search error for '{}': {}", query, e);
                }
            }
        }
    }

    fn record_error(&self, what: &str, error: EventHubError) {
        tracing::warn!("⚠️ Failed to fetch {}: {}", what, error);
        let error = Arc::new(error);
        self.state.send_modify(|s| s.error = Some(error));
    }
}

fn to_explore_events(events: Vec<EventDto>) -> Vec<ExploreEvent> {
    events.iter().map(ExploreEvent::from).collect()
}
