//! Binance ticker client tests
//!
//! Runs the client against a one-shot HTTP stub on localhost so the
//! success, bad-status and transport-failure paths can be checked without
//! network access.

use snapshot_rust_core::clients::binance::REQUEST_TIMEOUT_SECS;
use snapshot_rust_core::clients::{BinanceTickerClient, PriceSource};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single canned HTTP response and return the URL to hit.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}/api/v3/ticker/price", addr)
}

#[tokio::test]
async fn test_fetch_success_builds_snapshot() {
    let url = serve_once(
        "200 OK",
        r#"[{"symbol":"BTCUSDT","price":"65000.12"},{"symbol":"ETHUSDT","price":"3100.55"}]"#,
    )
    .await;
    let client = BinanceTickerClient::with_url(url).unwrap();

    let snapshot = client.fetch().await;

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.price("BTCUSDT"), Some("65000.12"));
    assert_eq!(snapshot.price("ETHUSDT"), Some("3100.55"));
}

#[tokio::test]
async fn test_fetch_duplicate_symbols_last_entry_wins() {
    let url = serve_once(
        "200 OK",
        r#"[{"symbol":"SOLUSDT","price":"140.00"},{"symbol":"SOLUSDT","price":"141.25"}]"#,
    )
    .await;
    let client = BinanceTickerClient::with_url(url).unwrap();

    let snapshot = client.fetch().await;

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.price("SOLUSDT"), Some("141.25"));
}

#[tokio::test]
async fn test_fetch_server_error_returns_empty_snapshot() {
    let url = serve_once("500 Internal Server Error", r#"{"msg":"down"}"#).await;
    let client = BinanceTickerClient::with_url(url).unwrap();

    let snapshot = client.fetch().await;

    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn test_fetch_non_200_success_status_returns_empty_snapshot() {
    let url = serve_once("204 No Content", "").await;
    let client = BinanceTickerClient::with_url(url).unwrap();

    let snapshot = client.fetch().await;

    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn test_fetch_malformed_body_returns_empty_snapshot() {
    let url = serve_once("200 OK", r#"{"unexpected":"shape"}"#).await;
    let client = BinanceTickerClient::with_url(url).unwrap();

    let snapshot = client.fetch().await;

    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn test_fetch_connection_refused_returns_empty_snapshot() {
    // Grab a free port, then close it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BinanceTickerClient::with_url(format!("http://{}/api/v3/ticker/price", addr)).unwrap();

    let snapshot = client.fetch().await;

    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn test_fetch_hung_upstream_times_out_with_empty_snapshot() {
    // Accept the connection, read the request, never answer
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        tokio::time::sleep(Duration::from_secs(60)).await;
        drop(socket);
    });

    let client = BinanceTickerClient::with_url(format!("http://{}/api/v3/ticker/price", addr)).unwrap();

    let started = Instant::now();
    let snapshot = client.fetch().await;
    let elapsed = started.elapsed();

    assert!(snapshot.is_empty());
    let timeout = Duration::from_secs(REQUEST_TIMEOUT_SECS);
    assert!(elapsed >= timeout - Duration::from_millis(500), "returned after {:?}", elapsed);
    assert!(elapsed < timeout * 2, "returned after {:?}", elapsed);
}
