//! Integration tests for `OverpassClient` using wiremock HTTP mocks.

use std::sync::Arc;

use dinescout_core::{BoundingBox, DiscoveryError, Region, VenueCategory};
use dinescout_places::{DetailSource, FixedRating, OverpassClient, VenueSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server_uri: &str) -> OverpassClient {
    OverpassClient::new(
        &format!("{server_uri}/api/interpreter"),
        5,
        "dinescout-tests",
        Arc::new(FixedRating(4.2)),
    )
    .expect("client construction should not fail")
}

fn saint_ouen() -> Region {
    Region::new(
        BoundingBox::from_swne(48.895, 2.318, 48.915, 2.350),
        "Saint-Ouen (93)",
    )
}

#[tokio::test]
async fn fetch_venues_sends_query_and_normalizes() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "version": 0.6,
        "elements": [
            {"type": "node", "id": 101, "lat": 48.90, "lon": 2.33,
             "tags": {"amenity": "restaurant", "name": "Le Paris Saint-Ouen", "cuisine": "french"}},
            {"type": "node", "id": 102, "lat": 48.91, "lon": 2.34,
             "tags": {"amenity": "pub", "name": "Le Pub"}},
            {"type": "node", "id": 103, "lat": 48.90, "lon": 2.32,
             "tags": {"amenity": "cafe", "addr:street": "Rue des Rosiers"}},
            {"type": "node", "id": 104, "lat": 48.90, "lon": 2.32,
             "tags": {"amenity": "fast_food"}}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .and(query_param(
            "data",
            "[out:json];node['amenity'~'restaurant|cafe|fast_food|bar|pub'](48.895,2.318,48.915,2.35);out;",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let venues = test_client(&server.uri())
        .fetch_venues(&saint_ouen())
        .await
        .expect("should fetch venues");

    assert_eq!(venues.len(), 3);
    assert_eq!(venues[0].name, "Le Paris Saint-Ouen");
    assert_eq!(venues[0].cuisine.as_deref(), Some("french"));
    assert_eq!(venues[1].category, VenueCategory::Bar);
    assert_eq!(venues[2].name, "Rue des Rosiers");
    assert!(venues.iter().all(|v| (v.rating - 4.2).abs() < f64::EPSILON));
}

#[tokio::test]
async fn server_error_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(504).set_body_string("Gateway Timeout"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_venues(&saint_ouen())
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::FetchFailed { .. }), "got {err:?}");
}

#[tokio::test]
async fn missing_elements_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"remark": "runtime error"})))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_venues(&saint_ouen())
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::FetchFailed { .. }), "got {err:?}");
}

#[tokio::test]
async fn fetch_detail_returns_contact_fields() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "elements": [{
            "type": "node", "id": 4242, "lat": 48.8566, "lon": 2.3522,
            "tags": {
                "amenity": "restaurant",
                "name": "Bouillon Chartier",
                "phone": "+33 1 47 70 86 29",
                "website": "https://www.bouillon-chartier.com",
                "addr:housenumber": "7",
                "addr:street": "Rue du Faubourg Montmartre",
                "addr:postcode": "75009",
                "addr:city": "Paris"
            }
        }]
    });
    Mock::given(method("GET"))
        .and(query_param("data", "[out:json];node(4242);out;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let detail = test_client(&server.uri())
        .fetch_detail("4242")
        .await
        .expect("should fetch detail");
    assert_eq!(detail.name, "Bouillon Chartier");
    assert_eq!(detail.phone.as_deref(), Some("+33 1 47 70 86 29"));
    assert_eq!(
        detail.address.as_deref(),
        Some("7 Rue du Faubourg Montmartre, 75009 Paris")
    );
    assert_eq!(
        detail.directions_url(),
        "https://www.google.com/maps/dir/?api=1&destination=48.8566,2.3522"
    );
}

#[tokio::test]
async fn empty_detail_result_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"elements": []})))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).fetch_detail("1").await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn non_numeric_id_is_not_found_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_detail("not-a-node")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn detail_not_found_is_distinct_from_network_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = test_client(&uri).fetch_detail("4242").await.unwrap_err();
    assert!(matches!(err, DiscoveryError::FetchFailed { .. }), "got {err:?}");
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn detail_with_non_json_body_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).fetch_detail("4242").await.unwrap_err();
    assert!(matches!(err, DiscoveryError::FetchFailed { .. }), "got {err:?}");
}
