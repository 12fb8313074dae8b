//! HTTP order source against a mock orders API

use std::time::Duration;

use delliv::domain::{OrderStatus, StatusFilter};
use delliv::infrastructure::api::{FetchError, HttpSource};
use delliv::infrastructure::OrderSource;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orders_body() -> serde_json::Value {
    json!([
        {
            "id": 7,
            "customer": "Mariana Costa",
            "address": "Rua das Flores, 12",
            "user": { "name": "Carlos" },
            "created_at": "2024-03-05T10:00:00Z",
            "status": "done"
        },
        {
            "id": 8,
            "customer": "Pedro Alves",
            "address": "Av. Brasil, 900",
            "created_at": "2024-03-06T09:30:00Z",
            "status": "done"
        }
    ])
}

#[tokio::test]
async fn test_status_filter_is_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("status", "done"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_body()))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpSource::new(
        &server.uri(),
        Some("s3cret".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();
    let orders = source.fetch_orders(StatusFilter::Done).await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].deliverer_name(), Some("Carlos"));
    assert_eq!(orders[1].deliverer_name(), None);
    assert!(orders.iter().all(|o| o.status == OrderStatus::Done));
    println!("✓ status query and bearer token sent");
}

#[tokio::test]
async fn test_all_filter_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let source = HttpSource::new(&server.uri(), None, Duration::from_secs(5)).unwrap();
    let orders = source.fetch_orders(StatusFilter::All).await.unwrap();
    assert!(orders.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_server_error_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = HttpSource::new(&server.uri(), None, Duration::from_secs(5)).unwrap();
    let err = source.fetch_orders(StatusFilter::Opened).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500 }));
    assert_eq!(err.to_string(), "server responded with HTTP 500");
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"orders\": 1}"))
        .mount(&server)
        .await;

    let source = HttpSource::new(&server.uri(), None, Duration::from_secs(5)).unwrap();
    let err = source.fetch_orders(StatusFilter::All).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_zero_timeout_means_no_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(orders_body())
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let source = HttpSource::new(&server.uri(), None, Duration::ZERO).unwrap();
    let orders = source.fetch_orders(StatusFilter::All).await.unwrap();
    assert_eq!(orders.len(), 2);
}
