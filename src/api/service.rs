use crate::api::spec::{ApiResponse, EventApiSpec};
use crate::domain::dto::{ApiResponseDto, CategoryDto, EventDto, EventLocation, Language};
use crate::domain::ports::{ConfigProvider, EventApi};
use crate::utils::error::{EventHubError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("eventhub/", env!("CARGO_PKG_VERSION"));

/// 以 reqwest 呼叫 KudaGo public API
#[derive(Debug, Clone)]
pub struct EventApiService {
    client: Client,
    base_url: Url,
}

impl EventApiService {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: Url::parse(config.base_url())?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 送出端點請求，並依照它宣告的回應型別解碼
    pub async fn execute(&self, spec: &EventApiSpec) -> Result<ApiResponse> {
        let url = spec.endpoint_with_base(&self.base_url);
        tracing::debug!("📡 {} {:?} {}", spec.name(), spec.method(), url);

        let mut request = self.client.request(spec.method().into(), url.clone());
        if let Some(body) = spec.body() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} responded with {}", spec.name(), status);

        if !status.is_success() {
            tracing::warn!("⚠️ {} failed with HTTP {}", spec.name(), status);
            return Err(EventHubError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("📦 {} returned {} bytes", spec.name(), bytes.len());

        spec.response_kind().decode(&bytes).inspect_err(|e| {
            tracing::error!("❌ {} response could not be decoded: {}", spec.name(), e);
        })
    }

    async fn fetch_page(&self, spec: EventApiSpec) -> Result<ApiResponseDto> {
        match self.execute(&spec).await? {
            ApiResponse::EventPage(page) => Ok(page),
            other => Err(unexpected_shape(&spec, &other)),
        }
    }
}

fn unexpected_shape(spec: &EventApiSpec, response: &ApiResponse) -> EventHubError {
    let shape = match response {
        ApiResponse::Locations(_) => "locations",
        ApiResponse::Categories(_) => "categories",
        ApiResponse::EventPage(_) => "event page",
        ApiResponse::EventDetails(_) => "event details",
    };
    EventHubError::ValidationError {
        message: format!("{} produced an unexpected {} response", spec.name(), shape),
    }
}

#[async_trait]
impl EventApi for EventApiService {
    async fn get_locations(&self, language: Option<Language>) -> Result<Vec<EventLocation>> {
        let spec = EventApiSpec::GetLocation { language };
        match self.execute(&spec).await? {
            ApiResponse::Locations(locations) => Ok(locations),
            other => Err(unexpected_shape(&spec, &other)),
        }
    }

    async fn get_categories(&self, language: Option<Language>) -> Result<Vec<CategoryDto>> {
        let spec = EventApiSpec::GetCategories { language };
        match self.execute(&spec).await? {
            ApiResponse::Categories(categories) => Ok(categories),
            other => Err(unexpected_shape(&spec, &other)),
        }
    }

    async fn get_events(
        &self,
        category: &str,
        location: &str,
        language: Option<Language>,
        page: u32,
    ) -> Result<ApiResponseDto> {
        self.fetch_page(EventApiSpec::GetEventsWith {
            category: category.to_string(),
            location: location.to_string(),
            language,
            page,
        })
        .await
    }

    async fn get_upcoming_events(
        &self,
        category: Option<&str>,
        language: Option<Language>,
        page: u32,
    ) -> Result<Vec<EventDto>> {
        let page = self
            .fetch_page(EventApiSpec::GetUpcomingEventsWith {
                category: category.map(str::to_string),
                language,
                page,
                actual_since: chrono::Utc::now().timestamp(),
            })
            .await?;
        Ok(page.results)
    }

    async fn get_nearby_events(
        &self,
        location: &str,
        category: Option<&str>,
        language: Option<Language>,
        page: u32,
    ) -> Result<Vec<EventDto>> {
        let page = self
            .fetch_page(EventApiSpec::GetNearbyEventsWith {
                location: location.to_string(),
                category: category.map(str::to_string),
                language,
                page,
            })
            .await?;
        Ok(page.results)
    }

    async fn get_event_details(&self, event_id: i64) -> Result<EventDto> {
        let spec = EventApiSpec::GetEventDetails { event_id };
        match self.execute(&spec).await {
            Ok(ApiResponse::EventDetails(event)) => Ok(event),
            Ok(other) => Err(unexpected_shape(&spec, &other)),
            Err(EventHubError::UnexpectedStatus { status: 404, .. }) => {
                Err(EventHubError::NotFound {
                    what: format!("Event {}", event_id),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn search_events(&self, search_text: &str) -> Result<Vec<EventDto>> {
        let page = self
            .fetch_page(EventApiSpec::GetSearchedEventsWith {
                search_text: search_text.to_string(),
            })
            .await?;
        Ok(page.results)
    }
}
