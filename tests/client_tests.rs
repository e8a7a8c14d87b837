//! Webhook client tests
//!
//! Each test starts a one-shot HTTP responder on a local port and checks how
//! the client classifies the outcome.

use bannergen::client::{CopyClient, CopyGenerator, GenerateError};
use bannergen::form::{EventStatus, FormState, GenerateRequest};
use serde_json::{json, Value};
use std::io::ErrorKind;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Read one HTTP request (headers plus `Content-Length` body) from the socket.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

/// Serve a single canned response and hand back the raw request text.
async fn start_single_response_server(
    status: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> Option<(String, oneshot::Receiver<String>)> {
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return None,
        Err(err) => panic!("failed to bind local test listener: {err}"),
    };
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: {content_type}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        let _ = tx.send(request);
    });

    Some((format!("http://{addr}/hook"), rx))
}

fn request(title: &str) -> GenerateRequest {
    FormState::new(title, EventStatus::Absent, "")
        .to_request()
        .expect("valid form")
}

fn client(endpoint: &str, timeout: Duration) -> CopyClient {
    CopyClient::new(endpoint, timeout).expect("build client")
}

#[tokio::test]
async fn test_posts_json_payload_and_parses_response() {
    let Some((url, request_rx)) = start_single_response_server(
        "200 OK",
        "application/json",
        r#"{"render": {"d_big_cell": "빅배너 문구"}}"#,
    )
    .await
    else {
        return;
    };

    let form = FormState::new("범죄도시4", EventStatus::Present, "50% 할인쿠폰");
    let payload = form.to_request().expect("valid form");
    let value = client(&url, Duration::from_secs(5))
        .generate(&payload)
        .await
        .expect("generate");
    assert_eq!(value, json!({"render": {"d_big_cell": "빅배너 문구"}}));

    let raw = request_rx.await.expect("request captured");
    let (head, body) = raw.split_once("\r\n\r\n").expect("http request");
    assert!(head.starts_with("POST /hook HTTP/1.1"));
    assert!(head
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    let sent: Value = serde_json::from_str(body).expect("json body");
    assert_eq!(
        sent,
        json!({
            "movie_title": "범죄도시4",
            "event_status": "있음",
            "event_content": "50% 할인쿠폰"
        })
    );
}

#[tokio::test]
async fn test_absent_event_sends_empty_content() {
    let Some((url, request_rx)) =
        start_single_response_server("200 OK", "application/json", "{}").await
    else {
        return;
    };

    // Content typed before switching the event off must not leak into the payload
    let form = FormState::new("범죄도시4", EventStatus::Present, "경품 추첨")
        .apply(bannergen::form::FormAction::SetEventStatus(EventStatus::Absent));
    let payload = form.to_request().expect("valid form");
    client(&url, Duration::from_secs(5))
        .generate(&payload)
        .await
        .expect("generate");

    let raw = request_rx.await.expect("request captured");
    let (_, body) = raw.split_once("\r\n\r\n").expect("http request");
    let sent: Value = serde_json::from_str(body).expect("json body");
    assert_eq!(sent["event_status"], "없음");
    assert_eq!(sent["event_content"], "");
}

#[tokio::test]
async fn test_non_json_body_kept_as_string() {
    let Some((url, _rx)) =
        start_single_response_server("200 OK", "text/plain", "Accepted").await
    else {
        return;
    };

    let value = client(&url, Duration::from_secs(5))
        .generate(&request("파묘"))
        .await
        .expect("generate");
    assert_eq!(value, Value::String("Accepted".to_string()));
}

#[tokio::test]
async fn test_stringified_json_body() {
    let Some((url, _rx)) = start_single_response_server(
        "200 OK",
        "application/json",
        r#""{\"e_long_cell\": \"롱배너\"}""#,
    )
    .await
    else {
        return;
    };

    let value = client(&url, Duration::from_secs(5))
        .generate(&request("파묘"))
        .await
        .expect("generate");
    assert_eq!(
        bannergen::copy::extract_field(&value, "e_long_cell").expect("extract"),
        "롱배너"
    );
}

#[tokio::test]
async fn test_server_error_status() {
    let Some((url, _rx)) = start_single_response_server(
        "500 Internal Server Error",
        "text/plain",
        "scenario failed",
    )
    .await
    else {
        return;
    };

    let err = client(&url, Duration::from_secs(5))
        .generate(&request("파묘"))
        .await
        .expect_err("should fail");
    match &err {
        GenerateError::Status { status, detail } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(detail, "scenario failed");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(err.user_message().contains("500"));
}

#[tokio::test]
async fn test_timeout() {
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return,
        Err(err) => panic!("failed to bind local test listener: {err}"),
    };
    let addr = listener.local_addr().expect("local addr");

    // Accept and hold the connection without ever answering
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let _ = read_request(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let err = client(&format!("http://{addr}/hook"), Duration::from_millis(300))
        .generate(&request("파묘"))
        .await
        .expect_err("should time out");
    assert!(
        matches!(err, GenerateError::Timeout(d) if d == Duration::from_millis(300)),
        "expected timeout, got {err:?}"
    );
    server.abort();
}

#[tokio::test]
async fn test_connection_refused() {
    // Grab a free port, then close it so nothing is listening
    let addr = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener.local_addr().expect("local addr"),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return,
        Err(err) => panic!("failed to bind local test listener: {err}"),
    };

    let err = client(&format!("http://{addr}/hook"), Duration::from_secs(5))
        .generate(&request("파묘"))
        .await
        .expect_err("should fail to connect");
    assert!(
        matches!(err, GenerateError::Connect(_)),
        "expected connect error, got {err:?}"
    );
    assert!(err.user_message().contains("연결할 수 없습니다"));
}
