use eventhub::domain::dto::Language;
use eventhub::{EventApi, EventApiService, EventHubError};
use httpmock::prelude::*;
use serde_json::json;

const EVENT_FIELDS: &str =
    "id,title,description,body_text,favorites_count,place,location,dates,participants,images";

fn service(server: &MockServer) -> EventApiService {
    EventApiService::new(&server.base_url()).unwrap()
}

fn event_page() -> serde_json::Value {
    json!({
        "count": 2,
        "next": "https://kudago.com/public-api/v1.4/events/?page=2",
        "previous": null,
        "results": [
            {
                "id": 101,
                "title": "Jazz in the park",
                "images": [{"image": "https://kudago.com/media/images/event/101.jpg"}],
                "description": "<p>Open air</p>",
                "body_text": "<p>Bring a blanket</p>",
                "favorites_count": 17,
                "dates": [{"start": 1735758000, "end": 1735765200}],
                "place": {
                    "id": 1, "title": "Gorky Park", "slug": "gorky-park",
                    "address": "Krymsky Val 9", "coords": {"lat": 55.73, "lon": 37.6},
                    "location": "msk"
                },
                "location": {"slug": "msk"},
                "participants": []
            },
            {
                "id": 102,
                "title": "Late show",
                "images": [],
                "dates": [],
                "location": {"slug": "msk", "name": "Moscow"}
            }
        ]
    })
}

#[tokio::test]
async fn test_get_locations_sends_language() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/public-api/v1.4/locations")
            .query_param("lang", "en");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([
                {"slug": "msk", "name": "Moscow"},
                {"slug": "spb", "name": "Saint Petersburg"}
            ]));
    });

    let locations = service(&server)
        .get_locations(Some(Language::En))
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[1].slug, "spb");
}

#[tokio::test]
async fn test_get_categories_without_language() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/public-api/v1.4/event-categories");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([{"id": 1, "slug": "concert", "name": "Concerts"}]));
    });

    let categories = service(&server).get_categories(None).await.unwrap();

    api_mock.assert();
    assert_eq!(categories[0].name, "Concerts");
}

#[tokio::test]
async fn test_get_events_sends_filters() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/public-api/v1.4/events/")
            .query_param("expand", "location,place,dates,participants")
            .query_param("fields", EVENT_FIELDS)
            .query_param("categories", "concert")
            .query_param("location", "msk")
            .query_param("lang", "ru")
            .query_param("page", "2");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(event_page());
    });

    let page = service(&server)
        .get_events("concert", "msk", Some(Language::Ru), 2)
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(page.count, Some(2));
    assert!(page.next.is_some());
    assert_eq!(page.results[0].favorites_count, Some(17));
    assert!(page.results[1].place.is_none());
}

#[tokio::test]
async fn test_upcoming_events_send_actual_since() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/public-api/v1.4/events/")
            .query_param_exists("actual_since")
            .query_param("categories", "theater")
            .query_param("page", "1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(event_page());
    });

    let events = service(&server)
        .get_upcoming_events(Some("theater"), Some(Language::En), 1)
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn test_nearby_events_send_location() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/public-api/v1.4/events/")
            .query_param("location", "spb")
            .query_param("lang", "en");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(event_page());
    });

    let events = service(&server)
        .get_nearby_events("spb", None, Some(Language::En), 1)
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(events[0].id, 101);
}

#[tokio::test]
async fn test_event_details() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/public-api/v1.4/events/190301")
            .query_param(
                "fields",
                "id,title,description,body_text,favorites_count,place,location,dates,participants,categories,images",
            );
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": 190301,
                "title": "Ballet",
                "images": [],
                "dates": [{"start": 1735758000, "end": null}],
                "place": {"id": 3},
                "categories": ["theater"]
            }));
    });

    let event = service(&server).get_event_details(190301).await.unwrap();

    api_mock.assert();
    assert_eq!(event.title.as_deref(), Some("Ballet"));
    assert_eq!(event.categories, vec!["theater".to_string()]);
    assert_eq!(event.place.map(|p| p.id), Some(3));
}

#[tokio::test]
async fn test_missing_event_is_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/public-api/v1.4/events/1");
        then.status(404).json_body(json!({"detail": "Not found."}));
    });

    let result = service(&server).get_event_details(1).await;

    assert!(matches!(result, Err(EventHubError::NotFound { .. })));
}

#[tokio::test]
async fn test_search_encodes_query() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/public-api/v1.4/search")
            .query_param("q", "rock & roll");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"count": 1, "next": null, "previous": null, "results": [{"id": 9, "title": "Rock & roll night"}]}));
    });

    let events = service(&server).search_events("rock & roll").await.unwrap();

    api_mock.assert();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, 9);
}

#[tokio::test]
async fn test_server_error_is_unexpected_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/public-api/v1.4/locations");
        then.status(500);
    });

    let result = service(&server).get_locations(None).await;

    match result {
        Err(EventHubError::UnexpectedStatus { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/public-api/v1.4/locations"));
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_shape_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/public-api/v1.4/event-categories");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"results": []}));
    });

    let result = service(&server).get_categories(None).await;

    assert!(matches!(result, Err(EventHubError::DecodeError(_))));
}
