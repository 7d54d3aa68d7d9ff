//! Integration tests for `GeoapifyClient` using wiremock HTTP mocks.

use std::sync::Arc;

use dinescout_core::{BoundingBox, DiscoveryError, Region, VenueCategory};
use dinescout_places::{DetailSource, FixedRating, GeoapifyClient, VenueSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeoapifyClient {
    GeoapifyClient::new(
        base_url,
        "test-key",
        5,
        "dinescout-tests",
        Arc::new(FixedRating(4.0)),
    )
    .expect("client construction should not fail")
    .with_limit(50)
}

fn neuilly() -> Region {
    Region::new(
        BoundingBox::from_swne(48.877, 2.252, 48.895, 2.288),
        "Neuilly-sur-Seine (92)",
    )
}

fn feature(props: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"type": "Feature", "properties": props, "geometry": null})
}

#[tokio::test]
async fn fetch_venues_parses_feature_collection() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            feature(serde_json::json!({
                "place_id": "a1", "name": "Sushi Shop",
                "categories": ["catering", "catering.restaurant", "catering.restaurant.sushi"],
                "lat": 48.88, "lon": 2.26
            })),
            feature(serde_json::json!({
                "place_id": "a2", "street": "Avenue Charles de Gaulle",
                "categories": ["catering", "catering.cafe"],
                "lat": 48.88, "lon": 2.27
            })),
            feature(serde_json::json!({
                "place_id": "a3",
                "categories": ["catering", "catering.bar"]
            })),
            feature(serde_json::json!({
                "place_id": "a1", "name": "Sushi Shop (dup)",
                "categories": ["catering.restaurant"]
            }))
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .and(query_param(
            "categories",
            "catering.restaurant,catering.cafe,catering.fast_food,catering.bar,catering.pub",
        ))
        .and(query_param("filter", "rect:2.252,48.877,2.288,48.895"))
        .and(query_param("limit", "50"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let venues = test_client(&server.uri())
        .fetch_venues(&neuilly())
        .await
        .expect("should fetch venues");

    assert_eq!(venues.len(), 2);
    assert_eq!(venues[0].name, "Sushi Shop");
    assert_eq!(venues[0].cuisine.as_deref(), Some("sushi"));
    assert_eq!(venues[1].name, "Avenue Charles de Gaulle");
    assert_eq!(venues[1].category, VenueCategory::Cafe);
}

#[tokio::test]
async fn unauthorized_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "statusCode": 401, "error": "Unauthorized", "message": "Invalid apiKey"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_venues(&neuilly())
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::FetchFailed { .. }), "got {err:?}");
    assert!(!err.to_string().contains("test-key"), "api key leaked: {err}");
}

#[tokio::test]
async fn fetch_detail_reads_place_details() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "type": "FeatureCollection",
        "features": [feature(serde_json::json!({
            "feature_type": "details",
            "place_id": "a1",
            "name": "Sushi Shop",
            "categories": ["catering.restaurant.sushi"],
            "lat": 48.8841,
            "lon": 2.2601,
            "formatted": "Sushi Shop, 12 Avenue de Madrid, 92200 Neuilly-sur-Seine, France",
            "contact": {"phone": "+33 1 00 00 00 00"}
        }))]
    });
    Mock::given(method("GET"))
        .and(path("/v2/place-details"))
        .and(query_param("id", "a1"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let detail = test_client(&server.uri())
        .fetch_detail("a1")
        .await
        .expect("should fetch detail");
    assert_eq!(detail.id, "a1");
    assert_eq!(detail.category, VenueCategory::Restaurant);
    assert_eq!(detail.phone.as_deref(), Some("+33 1 00 00 00 00"));
    assert!(detail.address.unwrap().contains("Avenue de Madrid"));
}

#[tokio::test]
async fn empty_feature_list_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/place-details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "FeatureCollection", "features": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).fetch_detail("zz").await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn detail_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).fetch_detail("gone").await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}
