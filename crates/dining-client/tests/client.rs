//! Integration tests for `StatusClient` and `StatusFetcher` using wiremock HTTP mocks.

use dining_client::{Phase, StatusClient, StatusError, StatusFetcher};
use dining_core::{group_by_label, LocationStatusResponse};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> StatusClient {
    StatusClient::with_base_url(base_url, "test-site", 30, "dining-test/0.1")
        .expect("client construction should not fail")
}

fn location(id: &str, label: &str, message: &str, color: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Venue {id}"),
        "open": color == "green",
        "status": { "label": label, "message": message, "color": color },
        "occupancy": "",
        "address": {
            "street": "800 W Campbell Rd",
            "city": "Richardson",
            "state": "TX",
            "zip_code": "75080",
            "lat": 32.98,
            "lon": -96.75,
            "dst": true,
            "gmt": -6,
            "gmt_offset": -5,
            "coordinates": [32.98, -96.75],
            "manual_coords": [0, 0]
        }
    })
}

async fn mount_status(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/locations/status"))
        .and(query_param("site_id", "test-site"))
        .and(query_param("platform", "0"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_status_returns_parsed_locations() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "status": "success",
        "request_time": 0.042,
        "records": 3,
        "locations": [
            location("a", "open", "Open now", "green"),
            location("b", "closed", "Closed", "red"),
            location("c", "OPEN", "Open", "green"),
        ]
    });
    mount_status(&server, ResponseTemplate::new(200).set_body_json(&body)).await;

    let client = test_client(&server.uri());
    let response = client.fetch_status().await.expect("should parse response");

    let LocationStatusResponse::Success {
        record_count,
        ref locations,
        ..
    } = response
    else {
        panic!("expected success, got {response:?}");
    };
    assert_eq!(record_count, 3);
    assert_eq!(locations.len(), 3);
    assert_eq!(locations[0].status.message, "Open now");

    let grouped = group_by_label(response.locations());
    assert_eq!(grouped.labels(), vec!["Open", "Closed", "OPEN"]);
    assert_eq!(grouped.get("Open").unwrap()[0].id, "a");
    assert_eq!(grouped.get("OPEN").unwrap()[0].id, "c");
}

#[tokio::test]
async fn failure_status_is_a_valid_response() {
    let server = MockServer::start().await;
    let body = serde_json::json!({ "status": "failure" });
    mount_status(&server, ResponseTemplate::new(200).set_body_json(&body)).await;

    let response = test_client(&server.uri())
        .fetch_status()
        .await
        .expect("failure body still parses");

    assert_eq!(response, LocationStatusResponse::Failure);
    assert!(group_by_label(response.locations()).is_empty());
}

#[tokio::test]
async fn non_success_http_status_returns_unexpected_status() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(503)).await;

    let err = test_client(&server.uri())
        .fetch_status()
        .await
        .expect_err("503 should be an error");

    assert!(
        matches!(err, StatusError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_returns_deserialize_error() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(r#"{"status":"success","locations":"nope"}"#),
    )
    .await;

    let err = test_client(&server.uri())
        .fetch_status()
        .await
        .expect_err("malformed body should be an error");

    assert!(
        matches!(
            err,
            StatusError::Deserialize { ref context, .. } if context.contains("site_id=test-site")
        ),
        "expected Deserialize with URL context, got: {err:?}"
    );
}

#[tokio::test]
async fn fetcher_retains_data_across_a_failed_refresh() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "status": "success",
        "request_time": 1,
        "records": 1,
        "locations": [location("a", "open", "Open now", "green")]
    });
    Mock::given(method("GET"))
        .and(path("/v1/locations/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/locations/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = StatusFetcher::new(test_client(&server.uri()));

    fetcher.refresh().await;
    let state = fetcher.snapshot();
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(state.data().unwrap().locations().len(), 1);

    fetcher.refresh().await;
    let state = fetcher.snapshot();
    assert_eq!(state.phase(), Phase::Failed);
    assert_eq!(state.data().unwrap().locations()[0].id, "a");
    assert!(state.last_error().unwrap().contains("500"));
}

#[tokio::test]
async fn fetcher_treats_malformed_body_as_failure_without_panicking() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
    )
    .await;

    let fetcher = StatusFetcher::new(test_client(&server.uri()));
    fetcher.refresh().await;

    let state = fetcher.snapshot();
    assert_eq!(state.phase(), Phase::Failed);
    assert!(state.data().is_none());
    assert!(!state.is_loading());
}
