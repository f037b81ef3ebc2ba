use crate::domain::dto::{ApiResponseDto, CategoryDto, EventDto, EventLocation, Language};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// 檔案不存在時回傳 `Ok(None)`
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn language(&self) -> Language;
    fn request_timeout(&self) -> Option<Duration>;
    fn user_agent(&self) -> &str;
    fn default_location(&self) -> &str;
    fn default_position(&self) -> &str;
    fn bookmarks_path(&self) -> &str;
}

/// Explore / Detail 畫面所需的 KudaGo 呼叫
#[async_trait]
pub trait EventApi: Send + Sync {
    async fn get_locations(&self, language: Option<Language>) -> Result<Vec<EventLocation>>;

    async fn get_categories(&self, language: Option<Language>) -> Result<Vec<CategoryDto>>;

    async fn get_events(
        &self,
        category: &str,
        location: &str,
        language: Option<Language>,
        page: u32,
    ) -> Result<ApiResponseDto>;

    async fn get_upcoming_events(
        &self,
        category: Option<&str>,
        language: Option<Language>,
        page: u32,
    ) -> Result<Vec<EventDto>>;

    async fn get_nearby_events(
        &self,
        location: &str,
        category: Option<&str>,
        language: Option<Language>,
        page: u32,
    ) -> Result<Vec<EventDto>>;

    async fn get_event_details(&self, event_id: i64) -> Result<EventDto>;

    async fn search_events(&self, search_text: &str) -> Result<Vec<EventDto>>;
}
