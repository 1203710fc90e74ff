// tests/reddit_http.rs
//
// RedditFetcher against a throwaway local listener serving canned responses.

use rising_scout::ingest::fetch_or_empty;
use rising_scout::ingest::providers::reddit::RedditFetcher;
use rising_scout::{FeedFetcher, FetchError, SortMode};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const GOLF_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/listing_golf.json"
));

/// Serve one response, hand back the raw request head.
async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let resp = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(resp.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });

    (format!("http://{addr}"), rx)
}

fn fetcher(base: &str, timeout: Duration) -> RedditFetcher {
    RedditFetcher::new(base, "scout-test/1.0", timeout).unwrap()
}

#[tokio::test]
async fn ok_listing_is_parsed_and_request_is_shaped() {
    let (base, req_rx) = serve_once("200 OK", GOLF_JSON.to_string()).await;
    let f = fetcher(&base, Duration::from_secs(5));

    let items = f.fetch("golf", SortMode::Rising, 15).await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].id, "g1");
    assert_eq!(items[2].is_gallery, Some(true));

    let head = req_rx.await.unwrap();
    assert!(head.starts_with("GET /r/golf/rising.json?limit=15 HTTP/1.1"), "{head}");
    assert!(head.to_ascii_lowercase().contains("user-agent: scout-test/1.0"), "{head}");
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let (base, _rx) = serve_once("429 Too Many Requests", "{}".to_string()).await;
    let f = fetcher(&base, Duration::from_secs(5));

    let err = f.fetch("golf", SortMode::Hot, 15).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 429, .. }), "{err}");
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let (base, _rx) = serve_once("200 OK", "<html>blocked</html>".to_string()).await;
    let f = fetcher(&base, Duration::from_secs(5));

    let err = f.fetch("golf", SortMode::New, 15).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }), "{err}");
}

#[tokio::test]
async fn json_without_listing_is_a_failure() {
    let body = r#"{"message":"Forbidden","error":403}"#.to_string();
    let (base, _rx) = serve_once("200 OK", body).await;
    let f = fetcher(&base, Duration::from_secs(5));

    let err = f.fetch("golf", SortMode::Rising, 15).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }), "{err}");
}

#[tokio::test]
async fn unreachable_source_degrades_to_empty() {
    // Bind then drop to get a port nothing is listening on.
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap().port()
    };
    let f = fetcher(&format!("http://127.0.0.1:{port}"), Duration::from_secs(2));

    assert!(f.fetch("golf", SortMode::Rising, 15).await.is_err());
    let items = fetch_or_empty(&f, "golf", SortMode::Rising, 15).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn slow_source_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_sock, _) = listener.accept().await.unwrap();
        // Hold the connection open without answering.
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let f = fetcher(&format!("http://{addr}"), Duration::from_millis(200));
    let err = f.fetch("golf", SortMode::Rising, 15).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "{err}");
}
