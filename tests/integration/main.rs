//! Integration tests for the treasury service.
//!
//! Route contracts are checked through the router directly; the server tests
//! bind a real socket on 127.0.0.1.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tower::ServiceExt;

use treasury_service::api::{create_router, AppState};
use treasury_service::config::Config;
use treasury_service::server;

const TIMESTAMP_FIELDS: [&str; 3] = ["time", "as_of", "timestamp"];

fn test_config() -> Config {
    Config {
        service_name: "treasury-test".to_string(),
        environment: "ci".to_string(),
        ..Config::default()
    }
}

fn app() -> Router {
    create_router(AppState::new(test_config()))
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn parse_time(value: &Value) -> OffsetDateTime {
    OffsetDateTime::parse(value.as_str().expect("timestamp is a string"), &Rfc3339)
        .expect("timestamp is RFC 3339")
}

/// Drop every timestamp field so payloads can be compared across requests.
fn strip_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for field in TIMESTAMP_FIELDS {
                map.remove(field);
            }
            map.values_mut().for_each(strip_timestamps);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_timestamps),
        _ => {}
    }
}

#[tokio::test]
async fn health_and_ready_report_configuration() {
    for uri in ["/health", "/ready"] {
        let before = OffsetDateTime::now_utc();
        let (status, body) = get_json(uri).await;
        let after = OffsetDateTime::now_utc();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "treasury-test");
        assert_eq!(body["environment"], "ci");

        let stamp = parse_time(&body["time"]);
        assert_eq!(stamp.offset(), time::UtcOffset::UTC);
        assert!(stamp >= before - Duration::from_secs(1));
        assert!(stamp <= after + Duration::from_secs(1));
    }
}

#[tokio::test]
async fn positions_are_three_fixed_books() {
    let (status, body) = get_json("/api/v1/treasury/positions").await;
    assert_eq!(status, StatusCode::OK);

    let positions = body.as_array().unwrap();
    assert_eq!(positions.len(), 3);

    let expected = [
        ("FX-OPTIONS", "USD", 35_000_000.0, 125_500.0),
        ("MMF", "EUR", 18_000_000.0, -12_250.0),
        ("BONDS", "USD", 12_000_000.0, 5_420.0),
    ];
    for (position, (book, currency, notional, pnl)) in positions.iter().zip(expected) {
        assert_eq!(position["book"], book);
        assert_eq!(position["currency"], currency);
        assert_eq!(position["notional"].as_f64(), Some(notional));
        assert_eq!(position["pnl"].as_f64(), Some(pnl));
        parse_time(&position["as_of"]);
    }
}

#[tokio::test]
async fn rates_share_one_timestamp() {
    let (status, body) = get_json("/api/v1/treasury/rates").await;
    assert_eq!(status, StatusCode::OK);

    let rates = body.as_array().unwrap();
    let pairs: Vec<_> = rates.iter().map(|r| r["pair"].as_str().unwrap()).collect();
    assert_eq!(pairs, ["USD/EUR", "USD/INR", "EUR/GBP"]);

    let as_of = &rates[0]["as_of"];
    for rate in rates {
        assert_eq!(&rate["as_of"], as_of);
        assert_eq!(&rate["timestamp"], as_of);
        assert_eq!(rate["provider"], "mock");
        assert_eq!(rate["rate_type"], "spot");
    }
    parse_time(as_of);

    assert_eq!(rates[0]["rate"].as_f64(), Some(0.91));
    assert_eq!(rates[1]["rate"].as_f64(), Some(83.25));
    assert_eq!(rates[2]["rate"].as_f64(), Some(0.86));
}

#[tokio::test]
async fn hedge_recommendations_are_fixed() {
    let (status, body) = get_json("/api/v1/treasury/hedge/recommendations").await;
    assert_eq!(status, StatusCode::OK);

    parse_time(&body["as_of"]);

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["pair"], "USD/INR");
    assert_eq!(recs[0]["action"], "BUY_CALL");
    assert_eq!(recs[0]["notional"], 5_000_000);
    assert_eq!(recs[1]["pair"], "USD/EUR");
    assert_eq!(recs[1]["action"], "FORWARD_SELL");
    assert_eq!(recs[1]["notional"], 2_000_000);
    assert!(recs.iter().all(|r| r["rationale"].as_str().is_some_and(|s| !s.is_empty())));
}

#[tokio::test]
async fn repeated_calls_differ_only_in_timestamps() {
    for uri in [
        "/health",
        "/ready",
        "/api/v1/treasury/positions",
        "/api/v1/treasury/rates",
        "/api/v1/treasury/hedge/recommendations",
    ] {
        let (_, mut first) = get_json(uri).await;
        let (_, mut second) = get_json(uri).await;

        strip_timestamps(&mut first);
        strip_timestamps(&mut second);
        assert_eq!(first, second, "{uri}");
    }
}

#[tokio::test]
async fn unset_environment_uses_documented_defaults() {
    let config = Config::from_vars(Vec::new()).unwrap();
    let app = create_router(AppState::new(config));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["service"], "treasury-service");
    assert_eq!(body["environment"], "local");
}

#[tokio::test]
async fn server_answers_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server::serve(
        listener,
        app(),
        Duration::from_secs(5),
        async {
            stop_rx.await.ok();
        },
    ));

    let response = reqwest::get(format!("http://{addr}/api/v1/treasury/rates"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );
    let rates: Vec<Value> = response.json().await.unwrap();
    assert_eq!(rates.len(), 3);

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn slow_request_head_is_cut_off() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server::serve(
        listener,
        app(),
        Duration::from_millis(200),
        async {
            stop_rx.await.ok();
        },
    ));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /health HTTP/1.1\r\n").await.unwrap();

    // The head is never finished; the server must give up on its own.
    let mut buf = Vec::new();
    let closed = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buf)).await;
    assert!(closed.is_ok(), "connection stayed open past the header timeout");

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

/// Read from `stream` until the response body ends with `marker`.
async fn read_response(stream: &mut TcpStream, marker: &str) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !String::from_utf8_lossy(&buf).ends_with(marker) {
        let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut chunk))
            .await
            .expect("response timed out")
            .unwrap();
        assert!(n > 0, "connection closed mid-response");
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server::serve(
        listener,
        app(),
        Duration::from_secs(5),
        async {
            stop_rx.await.ok();
        },
    ));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    let first = read_response(&mut stream, "}").await;
    assert!(first.starts_with("HTTP/1.1 200"));

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("serve did not return after shutdown")
        .unwrap()
        .unwrap();

    // The server side is gone; a second request gets no answer.
    let _ = stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await;
    let mut buf = [0u8; 1024];
    let after = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("connection stayed open after shutdown");
    assert!(
        !matches!(after, Ok(n) if n > 0),
        "served a request after shutdown"
    );
}

#[tokio::test]
async fn shutdown_lets_in_flight_requests_finish() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let slow = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            "done"
        }),
    );

    let handle = tokio::spawn(server::serve(
        listener,
        slow,
        Duration::from_secs(5),
        async {
            stop_rx.await.ok();
        },
    ));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    // Let the request reach the handler before shutting down.
    tokio::time::sleep(Duration::from_millis(50)).await;
    stop_tx.send(()).unwrap();

    let response = read_response(&mut stream, "done").await;
    assert!(response.starts_with("HTTP/1.1 200"));

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("serve did not return after draining")
        .unwrap()
        .unwrap();
}
