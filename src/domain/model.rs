use crate::domain::dto::{CategoryDto, Coordinates, EventDto};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;

pub const UNTITLED_EVENT: &str = "Untitled event";

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("HTML tag pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// 列表畫面（explore、search、bookmarks）使用的活動卡片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreEvent {
    pub id: i64,
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub address: String,
    pub image: Option<String>,
    pub participants: Vec<String>,
    pub going_count: u32,
}

impl From<&EventDto> for ExploreEvent {
    fn from(dto: &EventDto) -> Self {
        Self {
            id: dto.id,
            title: event_title(dto),
            date: first_start(dto),
            address: event_address(dto),
            image: dto
                .images
                .iter()
                .filter_map(|img| img.image.as_deref())
                .find(|url| !url.trim().is_empty())
                .map(str::to_string),
            participants: dto
                .participants
                .iter()
                .flatten()
                .filter_map(|p| p.agent.as_ref()?.title.clone())
                .filter(|title| !title.trim().is_empty())
                .collect(),
            going_count: dto
                .favorites_count
                .map(|count| count.clamp(0, u32::MAX as i64) as u32)
                .unwrap_or(0),
        }
    }
}

impl From<EventDto> for ExploreEvent {
    fn from(dto: EventDto) -> Self {
        Self::from(&dto)
    }
}

/// 詳細頁面的活動資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    pub id: i64,
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub address: String,
    pub description: String,
    pub body: String,
    pub categories: Vec<String>,
    pub images: Vec<String>,
    pub organizer: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub site_url: Option<String>,
}

impl From<&EventDto> for EventDetail {
    fn from(dto: &EventDto) -> Self {
        let first_dated = dto.dates.iter().find(|d| d.start.and_then(timestamp).is_some());

        let organizer = dto
            .participants
            .iter()
            .flatten()
            .find(|p| {
                p.role
                    .as_ref()
                    .and_then(|r| r.slug.as_deref())
                    .is_some_and(|slug| slug == "organizer")
            })
            .or_else(|| dto.participants.iter().flatten().next())
            .and_then(|p| p.agent.as_ref()?.title.clone());

        Self {
            id: dto.id,
            title: event_title(dto),
            date: first_dated.and_then(|d| d.start.and_then(timestamp)),
            end_date: first_dated.and_then(|d| d.end.and_then(timestamp)),
            address: event_address(dto),
            description: strip_html(dto.description.as_deref().unwrap_or_default()),
            body: strip_html(dto.body_text.as_deref().unwrap_or_default()),
            categories: dto.categories.clone(),
            images: dto
                .images
                .iter()
                .filter_map(|img| img.image.clone())
                .filter(|url| !url.trim().is_empty())
                .collect(),
            organizer,
            coordinates: dto.place.as_ref().and_then(|p| p.coords),
            site_url: dto.site_url.clone(),
        }
    }
}

/// 收藏的活動，保存當下的卡片內容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub event: ExploreEvent,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryColor(pub &'static str);

impl CategoryColor {
    pub fn hex(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUiModel {
    pub id: i64,
    pub category: CategoryDto,
    pub color: CategoryColor,
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DisplayOrderType {
    #[default]
    Alphabetical,
    Date,
}

impl DisplayOrderType {
    /// 穩定排序：相同鍵值保持原本順序，沒有日期的活動排在最後
    pub fn sort(&self, events: &mut [ExploreEvent]) {
        match self {
            DisplayOrderType::Alphabetical => {
                events.sort_by_cached_key(|event| event.title.to_lowercase());
            }
            DisplayOrderType::Date => events.sort_by(|a, b| match (a.date, b.date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
        }
    }
}

fn event_title(dto: &EventDto) -> String {
    dto.title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED_EVENT)
        .to_string()
}

fn first_start(dto: &EventDto) -> Option<DateTime<Utc>> {
    dto.dates.iter().find_map(|d| d.start.and_then(timestamp))
}

fn event_address(dto: &EventDto) -> String {
    let place = dto.place.as_ref();
    let location = dto.location.as_ref();

    place
        .map(|p| p.address.trim())
        .filter(|a| !a.is_empty())
        .or_else(|| place.and_then(|p| p.title.as_deref()))
        .or_else(|| location.and_then(|l| l.name.as_deref()))
        .or_else(|| location.map(|l| l.slug.as_str()))
        .unwrap_or_default()
        .to_string()
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// 移除 HTML 標籤與常見實體，並壓縮空白
pub fn strip_html(input: &str) -> String {
    let without_tags = HTML_TAG.replace_all(input, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&laquo;", "«")
        .replace("&raquo;", "»")
        .replace("&mdash;", "—")
        .replace("&ndash;", "–")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::{
        Agent, EventDate, EventLocation, ImageDto, Participant, PlaceDto, Role,
    };

    fn bare_event(id: i64, title: Option<&str>) -> EventDto {
        EventDto {
            id,
            title: title.map(str::to_string),
            images: vec![],
            description: None,
            body_text: None,
            favorites_count: None,
            dates: vec![],
            place: None,
            location: None,
            participants: None,
            categories: vec![],
            site_url: None,
        }
    }

    fn dated(id: i64, title: &str, start: Option<i64>) -> ExploreEvent {
        let mut dto = bare_event(id, Some(title));
        dto.dates = vec![EventDate {
            start,
            end: None,
            start_date: None,
            start_time: None,
            end_time: None,
        }];
        ExploreEvent::from(dto)
    }

    fn agent(id: i64, title: Option<&str>, role: &str) -> Participant {
        Participant {
            role: Some(Role {
                slug: Some(role.to_string()),
            }),
            agent: Some(Agent {
                id,
                title: title.map(str::to_string),
                slug: None,
                agent_type: None,
                images: None,
                site_url: None,
                is_stub: None,
            }),
        }
    }

    #[test]
    fn test_explore_event_fallbacks() {
        let mut dto = bare_event(1, Some("   "));
        dto.location = Some(EventLocation {
            slug: "spb".to_string(),
            name: None,
        });
        dto.images = vec![
            ImageDto { image: None },
            ImageDto {
                image: Some("https://img/2.jpg".to_string()),
            },
        ];
        dto.favorites_count = Some(-3);

        let event = ExploreEvent::from(&dto);

        assert_eq!(event.title, UNTITLED_EVENT);
        assert_eq!(event.address, "spb");
        assert_eq!(event.image.as_deref(), Some("https://img/2.jpg"));
        assert_eq!(event.going_count, 0);
        assert!(event.date.is_none());
    }

    #[test]
    fn test_explore_event_prefers_place_address() {
        let mut dto = bare_event(2, Some("Opera"));
        dto.place = Some(PlaceDto {
            id: 1,
            title: Some("Bolshoi".to_string()),
            slug: "bolshoi".to_string(),
            address: "Teatralnaya 1".to_string(),
            coords: Some(Coordinates {
                lat: 55.76,
                lon: 37.61,
            }),
            location: "msk".to_string(),
        });
        dto.location = Some(EventLocation {
            slug: "msk".to_string(),
            name: Some("Moscow".to_string()),
        });
        dto.participants = Some(vec![agent(1, Some("Orchestra"), "performer"), agent(2, None, "x")]);
        dto.favorites_count = Some(12);

        let event = ExploreEvent::from(&dto);

        assert_eq!(event.address, "Teatralnaya 1");
        assert_eq!(event.participants, vec!["Orchestra".to_string()]);
        assert_eq!(event.going_count, 12);
    }

    #[test]
    fn test_date_uses_first_valid_start() {
        let mut dto = bare_event(3, Some("Festival"));
        dto.dates = vec![
            EventDate {
                start: None,
                end: None,
                start_date: None,
                start_time: None,
                end_time: None,
            },
            EventDate {
                start: Some(1_700_000_000),
                end: Some(1_700_003_600),
                start_date: None,
                start_time: None,
                end_time: None,
            },
        ];

        let event = ExploreEvent::from(&dto);
        assert_eq!(event.date.unwrap().timestamp(), 1_700_000_000);

        let detail = EventDetail::from(&dto);
        assert_eq!(detail.end_date.unwrap().timestamp(), 1_700_003_600);
    }

    #[test]
    fn test_event_detail_strips_html_and_finds_organizer() {
        let mut dto = bare_event(4, Some("Lecture"));
        dto.description = Some("<p>Talk about&nbsp;<b>Rust</b></p>".to_string());
        dto.body_text = Some("<p>Line one</p>\n\n<p>Line &laquo;two&raquo;</p>".to_string());
        dto.participants = Some(vec![
            agent(1, Some("Speaker"), "speaker"),
            agent(2, Some("Org Inc"), "organizer"),
        ]);

        let detail = EventDetail::from(&dto);

        assert_eq!(detail.description, "Talk about Rust");
        assert_eq!(detail.body, "Line one Line «two»");
        assert_eq!(detail.organizer.as_deref(), Some("Org Inc"));
    }

    #[test]
    fn test_alphabetical_sort_is_stable_and_case_insensitive() {
        let mut events = vec![
            dated(1, "beta", None),
            dated(2, "Alpha", None),
            dated(3, "alpha", None),
            dated(4, "Gamma", None),
        ];

        DisplayOrderType::Alphabetical.sort(&mut events);

        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_date_sort_is_stable_and_puts_undated_last() {
        let mut events = vec![
            dated(1, "a", None),
            dated(2, "b", Some(300)),
            dated(3, "c", Some(100)),
            dated(4, "d", Some(300)),
            dated(5, "e", None),
        ];

        DisplayOrderType::Date.sort(&mut events);

        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1, 5]);
    }
}
