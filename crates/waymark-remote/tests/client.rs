//! Integration tests for `RemoteClient` using wiremock HTTP mocks.

use serde_json::json;
use waymark_core::{Category, LocationId, NewLocation};
use waymark_remote::{RemoteClient, RemoteConfig, RemoteError};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> RemoteClient {
    RemoteClient::new(&RemoteConfig::new(base_url, "anon-key"))
        .expect("client construction should not fail")
}

fn row(id: i64, name: &str, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "lat": 34.05,
        "lng": -118.24,
        "category": category,
        "description": "",
        "image_url": null,
        "place_id": null,
        "created_at": "2024-05-01T10:20:30+00:00"
    })
}

fn venice() -> NewLocation {
    NewLocation {
        name: "Venice Beach".to_string(),
        lat: 33.985,
        lng: -118.4695,
        category: Category::Nature,
        description: "Boardwalk".to_string(),
        image_url: None,
        place_id: Some("ChIJ-venice".to_string()),
    }
}

#[tokio::test]
async fn list_locations_orders_newest_first_and_authenticates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/locations"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            row(2, "Hollywood", "entertainment"),
            row(1, "Santa Monica", "nature"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let locations = client.list_locations().await.expect("should list");

    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].id, LocationId::new(2));
    assert_eq!(locations[0].category, Category::Other);
    assert_eq!(locations[1].category, Category::Nature);
}

#[tokio::test]
async fn list_locations_with_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_locations().await.unwrap_err();
    assert!(matches!(err, RemoteError::Deserialize { .. }));
}

#[tokio::test]
async fn insert_location_returns_created_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/locations"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({
            "name": "Venice Beach",
            "category": "nature",
            "image_url": "",
            "place_id": "ChIJ-venice"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([row(
            42,
            "Venice Beach",
            "nature"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let created = client.insert_location(&venice()).await.expect("should insert");

    assert_eq!(created.id, LocationId::new(42));
    assert_eq!(created.name, "Venice Beach");
    assert!(created.created_at.is_some());
}

#[tokio::test]
async fn insert_location_accepts_single_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/locations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(row(43, "Venice Beach", "nature")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let created = client.insert_location(&venice()).await.expect("should insert");
    assert_eq!(created.id, LocationId::new(43));
}

#[tokio::test]
async fn rejected_insert_uses_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/locations"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "message": "new row violates row-level security policy"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.insert_location(&venice()).await.unwrap_err();

    match err {
        RemoteError::Rejected { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "new row violates row-level security policy");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn update_location_patches_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/locations"))
        .and(query_param("id", "eq.7"))
        .and(body_partial_json(json!({ "name": "Hollywood Bowl" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(
            7,
            "Hollywood Bowl",
            "other"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut location = waymark_core::Location::try_from(
        serde_json::from_value::<waymark_remote::LocationRow>(row(7, "Hollywood", "other")).unwrap(),
    )
    .unwrap();
    location.name = "Hollywood Bowl".to_string();

    let updated = client.update_location(&location).await.expect("should update");
    assert_eq!(updated.name, "Hollywood Bowl");
}

#[tokio::test]
async fn update_of_missing_row_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let location = waymark_core::Location::try_from(
        serde_json::from_value::<waymark_remote::LocationRow>(row(99, "Gone", "city")).unwrap(),
    )
    .unwrap();

    let err = client.update_location(&location).await.unwrap_err();
    assert!(matches!(err, RemoteError::EmptyResponse { .. }));
}

#[tokio::test]
async fn delete_location_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/locations"))
        .and(query_param("id", "eq.5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .delete_location(LocationId::new(5))
        .await
        .expect("should delete");
}

#[tokio::test]
async fn delete_failure_is_transient_on_5xx() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/locations"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.delete_location(LocationId::new(5)).await.unwrap_err();

    assert!(err.is_transient());
    assert!(matches!(err, RemoteError::Rejected { status: 503, .. }));
}

#[tokio::test]
async fn create_trip_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/trips"))
        .and(query_param("select", "id"))
        .and(body_partial_json(json!({ "name": "Your Trip" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": "67e55044-10b1-426f-9247-bb680e5fe0c8" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let trip = client.create_trip("Your Trip").await.expect("should create trip");
    assert_eq!(trip.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
}

#[tokio::test]
async fn custom_table_names_are_used() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = RemoteConfig::new(server.uri(), "anon-key");
    config.table = "places".to_string();
    let client = RemoteClient::new(&config).unwrap();

    assert!(client.list_locations().await.unwrap().is_empty());
}
