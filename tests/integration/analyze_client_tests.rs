/*!
 * Integration tests for the analyze service client
 *
 * Each test runs against a local mock server, so no external network access
 * is needed.
 */

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use signflow::errors::ProviderError;
use signflow::orchestrator::{Orchestrator, RequestStatus, notify};
use signflow::playback::{NoopClipDriver, PlayerState};
use signflow::providers::{AnalyzeClient, AnalyzeRequest, Provider};

use crate::common;

fn client(endpoint: &str) -> AnalyzeClient {
    AnalyzeClient::new(endpoint, Duration::from_secs(5)).unwrap()
}

/// Mount a single `POST /analyze` answer on a fresh server
async fn analyze_server(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_complete_withVideos_shouldReturnClipsInOrder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(json!({ "transcript": "hello you" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "videos": ["HELLO.mp4", "YOU.mp4"] })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server.uri())
        .complete(AnalyzeRequest::new("hello you"))
        .await
        .unwrap();
    let sequence = response.into_sequence();
    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.get(0).unwrap().as_str(), "HELLO.mp4");
    assert_eq!(sequence.get(1).unwrap().as_str(), "YOU.mp4");
}

#[tokio::test]
async fn test_complete_withoutVideosField_shouldBeEmpty() {
    let server = analyze_server(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" }))).await;

    let response = client(&server.uri()).complete(AnalyzeRequest::new("hmm")).await.unwrap();
    assert!(response.into_sequence().is_empty());
}

#[tokio::test]
async fn test_complete_withServerError_shouldReturnApiError() {
    let server = analyze_server(ResponseTemplate::new(500).set_body_json(json!({ "error": "model offline" }))).await;

    let result = client(&server.uri()).complete(AnalyzeRequest::new("hello")).await;
    match result {
        Err(ProviderError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 500);
            assert!(message.contains("model offline"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_withNotFound_shouldReturnApiError() {
    let server = analyze_server(ResponseTemplate::new(404).set_body_string("no such route")).await;

    let result = client(&server.uri()).complete(AnalyzeRequest::new("hello")).await;
    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 404, .. })));
}

#[tokio::test]
async fn test_complete_withMalformedBody_shouldReturnParseError() {
    let server = analyze_server(ResponseTemplate::new(200).set_body_string("<html>busy</html>")).await;

    let result = client(&server.uri()).complete(AnalyzeRequest::new("hello")).await;
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_complete_withEndpointPath_shouldPostBelowIt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "videos": ["A.mp4"] })))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = format!("{}/api", server.uri());
    let response = client(&endpoint).complete(AnalyzeRequest::new("a")).await.unwrap();
    assert_eq!(response.into_sequence().len(), 1);
}

#[tokio::test]
async fn test_complete_withNothingListening_shouldReturnConnectionError() {
    // Reserve a free port, then close it again
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let result = client(&endpoint).complete(AnalyzeRequest::new("hello")).await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

#[tokio::test]
async fn test_testConnection_withRunningService_shouldSucceed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server.uri()).test_connection().await.is_ok());
}

#[tokio::test]
async fn test_orchestrator_withAnalyzeService_shouldStartPlayback() {
    common::init_logging();
    let server = analyze_server(
        ResponseTemplate::new(200).set_body_json(json!({ "videos": ["THANK.mp4", "YOU.mp4"] })),
    )
    .await;

    let orchestrator = Orchestrator::spawn(Arc::new(client(&server.uri())), Arc::new(NoopClipDriver), notify::silent());
    let cycle = orchestrator.submit("thank you", true).unwrap();
    assert_eq!(cycle.settled().await.unwrap(), RequestStatus::Resolved);

    let session = orchestrator.snapshot().await.unwrap();
    assert_eq!(session.state(), PlayerState::Ready { playing: true });
    assert_eq!(session.current_clip().unwrap().as_str(), "THANK.mp4");

    orchestrator.shutdown().await;
}
