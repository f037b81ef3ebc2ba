use crate::domain::dto::EventLocation;
use crate::domain::model::{Bookmark, CategoryUiModel, EventDetail, ExploreEvent};
use crate::utils::error::{EventHubError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

const NO_DATE: &str = "date TBA";

/// 卡片上的日期格式，例如 `Wed, Jan 1 • 7:00 PM`
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%a, %b %-d • %-I:%M %p").to_string())
        .unwrap_or_else(|| NO_DATE.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn to_csv(header: &[&str], rows: Vec<Vec<String>>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| EventHubError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn render_events(
    events: &[ExploreEvent],
    bookmarked: &HashSet<i64>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(events),
        OutputFormat::Csv => to_csv(
            &["id", "title", "date", "address", "going", "bookmarked"],
            events
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        e.title.clone(),
                        e.date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                        e.address.clone(),
                        e.going_count.to_string(),
                        bookmarked.contains(&e.id).to_string(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            if events.is_empty() {
                return Ok("No events found".to_string());
            }
            let lines: Vec<String> = events
                .iter()
                .map(|e| {
                    let marker = if bookmarked.contains(&e.id) { "★" } else { " " };
                    let mut line = format!(
                        "{} {:<8} {:<26} {}",
                        marker,
                        e.id,
                        format_date(e.date),
                        e.title
                    );
                    if !e.address.is_empty() {
                        line.push_str(&format!("\n  {:<8} 📍 {}", "", e.address));
                    }
                    if e.going_count > 0 {
                        line.push_str(&format!("\n  {:<8} +{} going", "", e.going_count));
                    }
                    line
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

pub fn render_locations(locations: &[EventLocation], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(locations),
        OutputFormat::Csv => to_csv(
            &["slug", "name"],
            locations
                .iter()
                .map(|l| vec![l.slug.clone(), l.name.clone().unwrap_or_default()])
                .collect(),
        ),
        OutputFormat::Table => Ok(locations
            .iter()
            .map(|l| format!("{:<12} {}", l.slug, l.name.as_deref().unwrap_or("-")))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn render_categories(categories: &[CategoryUiModel], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(categories),
        OutputFormat::Csv => to_csv(
            &["id", "slug", "name", "color", "image"],
            categories
                .iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.category.slug.clone(),
                        c.category.name.clone(),
                        c.color.hex().to_string(),
                        c.image.to_string(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => Ok(categories
            .iter()
            .map(|c| {
                format!(
                    "{:<6} {:<20} {:<30} {} {}",
                    c.id,
                    c.category.slug,
                    c.category.name,
                    c.color.hex(),
                    c.image
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn render_detail(detail: &EventDetail, bookmarked: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(detail),
        OutputFormat::Csv => to_csv(
            &["id", "title", "date", "end_date", "address", "organizer", "categories", "description"],
            vec![vec![
                detail.id.to_string(),
                detail.title.clone(),
                detail.date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                detail.end_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                detail.address.clone(),
                detail.organizer.clone().unwrap_or_default(),
                detail.categories.join(";"),
                detail.description.clone(),
            ]],
        ),
        OutputFormat::Table => {
            let mut lines = vec![format!(
                "{}{}",
                detail.title,
                if bookmarked { " ★" } else { "" }
            )];
            lines.push(format!("🗓  {}", format_date(detail.date)));
            if let Some(end) = detail.end_date {
                lines.push(format!("   until {}", format_date(Some(end))));
            }
            if !detail.address.is_empty() {
                lines.push(format!("📍 {}", detail.address));
            }
            if let Some(organizer) = &detail.organizer {
                lines.push(format!("👤 {}", organizer));
            }
            if !detail.categories.is_empty() {
                lines.push(format!("🏷  {}", detail.categories.join(", ")));
            }
            if !detail.description.is_empty() {
                lines.push(String::new());
                lines.push(detail.description.clone());
            }
            if !detail.body.is_empty() {
                lines.push(String::new());
                lines.push(detail.body.clone());
            }
            if let Some(url) = &detail.site_url {
                lines.push(String::new());
                lines.push(url.clone());
            }
            Ok(lines.join("\n"))
        }
    }
}

pub fn render_bookmarks(bookmarks: &[Bookmark], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(bookmarks),
        OutputFormat::Csv => to_csv(
            &["id", "title", "date", "address", "saved_at"],
            bookmarks
                .iter()
                .map(|b| {
                    vec![
                        b.event.id.to_string(),
                        b.event.title.clone(),
                        b.event.date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                        b.event.address.clone(),
                        b.saved_at.to_rfc3339(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            if bookmarks.is_empty() {
                return Ok("No bookmarks yet".to_string());
            }
            let events: Vec<ExploreEvent> = bookmarks.iter().map(|b| b.event.clone()).collect();
            let ids: HashSet<i64> = events.iter().map(|e| e.id).collect();
            render_events(&events, &ids, OutputFormat::Table)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: i64, title: &str, start: Option<i64>) -> ExploreEvent {
        ExploreEvent {
            id,
            title: title.to_string(),
            date: start.and_then(|s| DateTime::from_timestamp(s, 0)),
            address: "Tverskaya 1".to_string(),
            image: None,
            participants: vec![],
            going_count: 0,
        }
    }

    #[test]
    fn test_format_date() {
        // 2025-01-01 19:00:00 UTC
        let date = DateTime::from_timestamp(1_735_758_000, 0);
        assert_eq!(format_date(date), "Wed, Jan 1 • 7:00 PM");
        assert_eq!(format_date(None), "date TBA");
    }

    #[test]
    fn test_table_marks_bookmarked_events() {
        let events = vec![sample(1, "Jazz", None), sample(2, "Rock", None)];
        let bookmarked: HashSet<i64> = [2].into_iter().collect();

        let table = render_events(&events, &bookmarked, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("  1"));
        assert!(lines[2].starts_with("★ 2"));
        assert!(table.contains("📍 Tverskaya 1"));
    }

    #[test]
    fn test_csv_quotes_fields() {
        let events = vec![sample(7, "Rock, Paper & Scissors", Some(0))];

        let csv = render_events(&events, &HashSet::new(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("id,title,date,address,going,bookmarked"));
        assert_eq!(
            lines.next(),
            Some("7,\"Rock, Paper & Scissors\",1970-01-01T00:00:00+00:00,Tverskaya 1,0,false")
        );
    }

    #[test]
    fn test_json_output_is_parseable() {
        let events = vec![sample(3, "Opera", None)];

        let json = render_events(&events, &HashSet::new(), OutputFormat::Json).unwrap();
        let parsed: Vec<ExploreEvent> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, events);
    }

    #[test]
    fn test_empty_lists_have_messages() {
        assert_eq!(
            render_events(&[], &HashSet::new(), OutputFormat::Table).unwrap(),
            "No events found"
        );
        assert_eq!(
            render_bookmarks(&[], OutputFormat::Table).unwrap(),
            "No bookmarks yet"
        );
    }
}
