//! Integration tests for `OverpassClient` using wiremock HTTP mocks.

use wayfind_core::{categories, Coordinate};
use wayfind_overpass::{build_query, normalize_and_rank, OverpassClient, OverpassError, QueryParams};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> OverpassClient {
    let endpoint = format!("{}/api/interpreter", server.uri());
    OverpassClient::with_endpoint(&endpoint, 5, "wayfind-test")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_posts_form_encoded_query_and_parses_elements() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 1,
                "lat": 40.001,
                "lon": -74.0,
                "tags": { "amenity": "restaurant", "name": "Corner Diner" }
            },
            {
                "type": "way",
                "id": 2,
                "center": { "lat": 40.01, "lon": -74.0 },
                "tags": { "amenity": "restaurant", "brand": "Burger Barn" }
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("data="))
        .and(body_string_contains("amenity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let origin = Coordinate::new(40.0, -74.0).unwrap();
    let restaurant = categories::lookup("restaurant").unwrap();
    let query = build_query(&QueryParams::new(restaurant.tags, origin));

    let client = test_client(&server);
    let elements = client.fetch(&query).await.expect("should parse elements");
    assert_eq!(elements.len(), 2);

    let places = normalize_and_rank(&elements, origin, 50);
    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Corner Diner", "Burger Barn"]);
}

#[tokio::test]
async fn fetch_url_encodes_the_query_body() {
    let server = MockServer::start().await;
    let empty = ResponseTemplate::new(200).set_body_json(serde_json::json!({ "elements": [] }));

    Mock::given(method("POST"))
        .and(body_string_contains("data=%5Bout%3Ajson%5D"))
        .respond_with(empty)
        .expect(1)
        .mount(&server)
        .await;

    let elements = test_client(&server)
        .fetch("[out:json][timeout:25];(node(1);); out center;")
        .await
        .expect("empty result should parse");
    assert!(elements.is_empty());
}

#[tokio::test]
async fn non_success_status_is_fetch_failed() {
    let server = MockServer::start().await;
    let timeout = ResponseTemplate::new(504).set_body_string("gateway timeout");

    Mock::given(method("POST"))
        .respond_with(timeout)
        .mount(&server)
        .await;

    let err = test_client(&server).fetch("[out:json];").await.unwrap_err();
    assert!(
        matches!(err, OverpassError::UnexpectedStatus { status: 504, .. }),
        "got {err:?}"
    );
    assert!(err.to_string().starts_with("fetch failed"), "{err}");
}

#[tokio::test]
async fn malformed_json_is_a_deserialize_error() {
    let server = MockServer::start().await;
    let html = ResponseTemplate::new(200).set_body_string("<html>rate limited</html>");

    Mock::given(method("POST"))
        .respond_with(html)
        .mount(&server)
        .await;

    let err = test_client(&server).fetch("[out:json];").await.unwrap_err();
    assert!(
        matches!(err, OverpassError::Deserialize { .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn body_without_elements_is_a_deserialize_error() {
    let server = MockServer::start().await;
    let body = ResponseTemplate::new(200).set_body_json(serde_json::json!({ "version": 0.6 }));

    Mock::given(method("POST"))
        .respond_with(body)
        .mount(&server)
        .await;

    let err = test_client(&server).fetch("[out:json];").await.unwrap_err();
    assert!(
        matches!(err, OverpassError::Deserialize { .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn remark_does_not_fail_the_request() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "elements": [
            {
                "type": "node",
                "id": 3,
                "lat": 1.0,
                "lon": 1.0,
                "tags": { "name": "Partial" }
            }
        ],
        "remark": "runtime error: Query timed out in \"query\" at line 3 after 25 seconds."
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let elements = test_client(&server).fetch("[out:json];").await.unwrap();
    assert_eq!(elements.len(), 1);
}
