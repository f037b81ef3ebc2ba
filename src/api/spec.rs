use crate::domain::dto::{ApiResponseDto, CategoryDto, EventDto, EventLocation, Language};
use crate::utils::error::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://kudago.com";

const API_PREFIX: &str = "public-api/v1.4";
const EVENT_LIST_EXPAND: &str = "location,place,dates,participants";
const EVENT_LIST_FIELDS: &str =
    "id,title,description,body_text,favorites_count,place,location,dates,participants,images";
const EVENT_DETAIL_FIELDS: &str = "id,title,description,body_text,favorites_count,place,location,dates,participants,categories,images";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    pub name: &'static str,
    pub value: String,
}

impl QueryItem {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// 一次 KudaGo API 呼叫的宣告式描述：路徑、查詢參數、方法與回應型別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventApiSpec {
    GetLocation {
        language: Option<Language>,
    },
    GetCategories {
        language: Option<Language>,
    },
    GetEventsWith {
        category: String,
        location: String,
        language: Option<Language>,
        page: u32,
    },
    GetUpcomingEventsWith {
        category: Option<String>,
        language: Option<Language>,
        page: u32,
        actual_since: i64,
    },
    GetNearbyEventsWith {
        location: String,
        category: Option<String>,
        language: Option<Language>,
        page: u32,
    },
    GetEventDetails {
        event_id: i64,
    },
    GetSearchedEventsWith {
        search_text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Locations,
    Categories,
    EventPage,
    EventDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Locations(Vec<EventLocation>),
    Categories(Vec<CategoryDto>),
    EventPage(ApiResponseDto),
    EventDetails(EventDto),
}

impl ResponseKind {
    pub fn decode(&self, bytes: &[u8]) -> Result<ApiResponse> {
        Ok(match self {
            ResponseKind::Locations => ApiResponse::Locations(serde_json::from_slice(bytes)?),
            ResponseKind::Categories => ApiResponse::Categories(serde_json::from_slice(bytes)?),
            ResponseKind::EventPage => ApiResponse::EventPage(serde_json::from_slice(bytes)?),
            ResponseKind::EventDetails => {
                ApiResponse::EventDetails(serde_json::from_slice(bytes)?)
            }
        })
    }
}

impl EventApiSpec {
    pub fn name(&self) -> &'static str {
        match self {
            EventApiSpec::GetLocation { .. } => "get_location",
            EventApiSpec::GetCategories { .. } => "get_categories",
            EventApiSpec::GetEventsWith { .. } => "get_events_with",
            EventApiSpec::GetUpcomingEventsWith { .. } => "get_upcoming_events_with",
            EventApiSpec::GetNearbyEventsWith { .. } => "get_nearby_events_with",
            EventApiSpec::GetEventDetails { .. } => "get_event_details",
            EventApiSpec::GetSearchedEventsWith { .. } => "get_searched_events_with",
        }
    }

    pub fn path(&self) -> String {
        match self {
            EventApiSpec::GetLocation { .. } => format!("{}/locations", API_PREFIX),
            EventApiSpec::GetCategories { .. } => format!("{}/event-categories", API_PREFIX),
            EventApiSpec::GetEventsWith { .. }
            | EventApiSpec::GetUpcomingEventsWith { .. }
            | EventApiSpec::GetNearbyEventsWith { .. } => format!("{}/events/", API_PREFIX),
            EventApiSpec::GetEventDetails { event_id } => {
                format!("{}/events/{}", API_PREFIX, event_id)
            }
            EventApiSpec::GetSearchedEventsWith { .. } => format!("{}/search", API_PREFIX),
        }
    }

    pub fn query_items(&self) -> Vec<QueryItem> {
        match self {
            EventApiSpec::GetLocation { language } | EventApiSpec::GetCategories { language } => {
                language
                    .map(|lang| vec![QueryItem::new("lang", lang.as_str())])
                    .unwrap_or_default()
            }

            EventApiSpec::GetEventsWith {
                category,
                location,
                language,
                page,
            } => {
                let mut items = event_list_items();
                items.push(QueryItem::new("categories", category.as_str()));
                items.push(QueryItem::new("location", location.as_str()));
                if let Some(lang) = language {
                    items.push(QueryItem::new("lang", lang.as_str()));
                }
                items.push(QueryItem::new("page", page.to_string()));
                items
            }

            EventApiSpec::GetUpcomingEventsWith {
                category,
                language,
                page,
                actual_since,
            } => {
                let mut items = event_list_items();
                if let Some(category) = category {
                    items.push(QueryItem::new("categories", category.as_str()));
                }
                items.push(QueryItem::new("actual_since", actual_since.to_string()));
                if let Some(lang) = language {
                    items.push(QueryItem::new("lang", lang.as_str()));
                }
                items.push(QueryItem::new("page", page.to_string()));
                items
            }

            EventApiSpec::GetNearbyEventsWith {
                location,
                category,
                language,
                page,
            } => {
                let mut items = event_list_items();
                items.push(QueryItem::new("location", location.as_str()));
                if let Some(category) = category {
                    items.push(QueryItem::new("categories", category.as_str()));
                }
                if let Some(lang) = language {
                    items.push(QueryItem::new("lang", lang.as_str()));
                }
                items.push(QueryItem::new("page", page.to_string()));
                items
            }

            EventApiSpec::GetEventDetails { .. } => {
                vec![QueryItem::new("fields", EVENT_DETAIL_FIELDS)]
            }

            EventApiSpec::GetSearchedEventsWith { search_text } => {
                vec![QueryItem::new("q", search_text.as_str())]
            }
        }
    }

    /// 以預設的 https://kudago.com 組出完整 URL
    pub fn endpoint(&self) -> String {
        match Url::parse(DEFAULT_BASE_URL) {
            Ok(base) => self.endpoint_with_base(&base).to_string(),
            Err(_) => String::new(),
        }
    }

    /// 保留 base 的 scheme、host 與路徑前綴
    pub fn endpoint_with_base(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let prefix = base.path().trim_end_matches('/');
        url.set_path(&format!("{}/{}", prefix, self.path()));

        let items = self.query_items();
        if items.is_empty() {
            url.set_query(None);
        } else {
            let query = items
                .iter()
                .map(|item| format!("{}={}", item.name, escape_query_value(&item.value)))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query));
        }
        url.set_fragment(None);
        url
    }

    pub fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    pub fn response_kind(&self) -> ResponseKind {
        match self {
            EventApiSpec::GetLocation { .. } => ResponseKind::Locations,
            EventApiSpec::GetCategories { .. } => ResponseKind::Categories,
            EventApiSpec::GetEventsWith { .. }
            | EventApiSpec::GetUpcomingEventsWith { .. }
            | EventApiSpec::GetNearbyEventsWith { .. }
            | EventApiSpec::GetSearchedEventsWith { .. } => ResponseKind::EventPage,
            EventApiSpec::GetEventDetails { .. } => ResponseKind::EventDetails,
        }
    }

    pub fn body(&self) -> Option<Vec<u8>> {
        None
    }
}

fn event_list_items() -> Vec<QueryItem> {
    vec![
        QueryItem::new("expand", EVENT_LIST_EXPAND),
        QueryItem::new("fields", EVENT_LIST_FIELDS),
    ]
}

// 逗號保留原樣，expand 與 fields 以逗號分隔
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

fn escape_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
