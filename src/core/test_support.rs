use crate::domain::dto::{
    ApiResponseDto, CategoryDto, EventDate, EventDto, EventLocation, Language,
};
use crate::domain::ports::EventApi;
use crate::utils::error::{EventHubError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub fn event(id: i64, title: &str, start: Option<i64>) -> EventDto {
    EventDto {
        id,
        title: Some(title.to_string()),
        images: vec![],
        description: None,
        body_text: None,
        favorites_count: None,
        dates: start
            .map(|start| {
                vec![EventDate {
                    start: Some(start),
                    end: None,
                    start_date: None,
                    start_time: None,
                    end_time: None,
                }]
            })
            .unwrap_or_default(),
        place: None,
        location: None,
        participants: None,
        categories: vec![],
        site_url: None,
    }
}

/// 記錄呼叫順序並回傳固定資料的 EventApi
#[derive(Default)]
pub struct FakeApi {
    events: Vec<EventDto>,
    failure: Mutex<Option<u16>>,
    failing_calls: Mutex<HashMap<String, u16>>,
    delays: Mutex<HashMap<String, Duration>>,
    log: Mutex<Vec<String>>,
    last_page: Mutex<Option<u32>>,
}

impl FakeApi {
    pub fn with_events(events: Vec<EventDto>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    pub fn fail_with_status(&self, status: u16) {
        *self.failure.lock().unwrap() = Some(status);
    }

    /// 只讓指定的呼叫失敗，例如 "locations" 或 "search:jazz"
    pub fn fail_call(&self, call: &str, status: u16) {
        self.failing_calls
            .lock()
            .unwrap()
            .insert(call.to_string(), status);
    }

    pub fn delay_call(&self, call: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(call.to_string(), delay);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
        self.failing_calls.lock().unwrap().clear();
    }

    pub fn call_log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn calls(&self, name: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    pub fn last_page(&self) -> Option<u32> {
        *self.last_page.lock().unwrap()
    }

    async fn record(&self, call: String, page: Option<u32>) -> Result<()> {
        self.log.lock().unwrap().push(call.clone());
        if page.is_some() {
            *self.last_page.lock().unwrap() = page;
        }

        let delay = self.delays.lock().unwrap().get(&call).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self
            .failing_calls
            .lock()
            .unwrap()
            .get(&call)
            .copied()
            .or(*self.failure.lock().unwrap());
        match failure {
            Some(status) => Err(EventHubError::UnexpectedStatus {
                status,
                url: "http://fake".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EventApi for FakeApi {
    async fn get_locations(&self, _language: Option<Language>) -> Result<Vec<EventLocation>> {
        self.record("locations".to_string(), None).await?;
        Ok(vec![
            EventLocation {
                slug: "msk".to_string(),
                name: Some("Moscow".to_string()),
            },
            EventLocation {
                slug: "spb".to_string(),
                name: Some("Saint Petersburg".to_string()),
            },
        ])
    }

    async fn get_categories(&self, _language: Option<Language>) -> Result<Vec<CategoryDto>> {
        self.record("categories".to_string(), None).await?;
        Ok(vec![
            CategoryDto {
                id: 1,
                slug: "concert".to_string(),
                name: "Concerts".to_string(),
            },
            CategoryDto {
                id: 2,
                slug: "theater".to_string(),
                name: "Theater".to_string(),
            },
        ])
    }

    async fn get_events(
        &self,
        category: &str,
        location: &str,
        _language: Option<Language>,
        page: u32,
    ) -> Result<ApiResponseDto> {
        self.record(format!("events:{}:{}", category, location), Some(page)).await?;
        Ok(ApiResponseDto {
            count: Some(self.events.len() as u64),
            next: None,
            previous: None,
            results: self.events.clone(),
        })
    }

    async fn get_upcoming_events(
        &self,
        category: Option<&str>,
        _language: Option<Language>,
        page: u32,
    ) -> Result<Vec<EventDto>> {
        let call = match category {
            Some(category) => format!("upcoming:{}", category),
            None => "upcoming".to_string(),
        };
        self.record(call, Some(page)).await?;
        Ok(self.events.clone())
    }

    async fn get_nearby_events(
        &self,
        location: &str,
        _category: Option<&str>,
        _language: Option<Language>,
        page: u32,
    ) -> Result<Vec<EventDto>> {
        self.record(format!("nearby:{}", location), Some(page)).await?;
        Ok(self.events.clone())
    }

    async fn get_event_details(&self, event_id: i64) -> Result<EventDto> {
        self.record(format!("details:{}", event_id), None).await?;
        self.events
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or_else(|| EventHubError::NotFound {
                what: format!("Event {}", event_id),
            })
    }

    async fn search_events(&self, search_text: &str) -> Result<Vec<EventDto>> {
        self.record(format!("search:{}", search_text), None).await?;
        let needle = search_text.to_lowercase();
        Ok(self
            .events
            .iter()
            .filter(|e| {
                e.title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }
}
