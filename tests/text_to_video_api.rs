//! End-to-end tests: the real router served on an ephemeral port, with a
//! wiremock server standing in for the upstream video generation API.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use text_to_video::{build_router, AppConfig, AppState};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROMPT: &str = "A futuristic city with flying cars and neon lights";
const UPSTREAM_PATH: &str = "/api/ai/video/v2";

/// Serves the app and returns its base URL. A 500ms poll interval gives
/// `max_wait_seconds = 1` exactly two status polls.
async fn spawn_app(upstream: &MockServer) -> String {
    let config = AppConfig {
        video_api_base_url: format!("{}{}", upstream.uri(), UPSTREAM_PATH),
        bind_addr: "127.0.0.1:0".to_string(),
        poll_interval: Duration::from_millis(500),
        upstream_timeout: Duration::from_secs(5),
    };
    let state = Arc::new(AppState::from_config(&config).expect("state"));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.expect("serve");
    });

    format!("http://{}", addr)
}

async fn mount_create(upstream: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .and(query_param("action", "create"))
        .and(query_param("prompt", PROMPT))
        .respond_with(response)
        .expect(1)
        .mount(upstream)
        .await;
}

fn status_mock() -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .and(query_param("action", "status"))
        .and(query_param("taskId", "task-42"))
}

async fn post_generate(app: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/text-to-video", app))
        .json(&body)
        .send()
        .await
        .expect("request");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn test_returns_video_url_when_second_poll_completes() {
    let upstream = MockServer::start().await;
    mount_create(&upstream, ResponseTemplate::new(200).set_body_json(json!({"taskId": "task-42"}))).await;
    status_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&upstream)
        .await;
    status_mock()
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "completed", "videoUrl": "https://example/v.mp4"})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = post_generate(&app, json!({"prompt": PROMPT, "max_wait_seconds": 1})).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "completed", "video_url": "https://example/v.mp4"}));
}

#[tokio::test]
async fn test_reports_processing_when_budget_runs_out() {
    let upstream = MockServer::start().await;
    mount_create(&upstream, ResponseTemplate::new(200).set_body_json(json!({"taskId": "task-42"}))).await;
    status_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .expect(2)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = post_generate(&app, json!({"prompt": PROMPT, "max_wait_seconds": 1})).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"status": "processing", "message": "Video is still generating. Try again later."})
    );
}

#[tokio::test]
async fn test_missing_task_id_is_server_error_without_polling() {
    let upstream = MockServer::start().await;
    mount_create(&upstream, ResponseTemplate::new(200).set_body_json(json!({"message": "queued"}))).await;
    status_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = post_generate(&app, json!({"prompt": PROMPT, "max_wait_seconds": 1})).await;

    assert_eq!(status, 500);
    assert_eq!(body["detail"], "Failed to create video task");
}

#[tokio::test]
async fn test_upstream_503_on_create_is_mirrored() {
    let upstream = MockServer::start().await;
    mount_create(&upstream, ResponseTemplate::new(503).set_body_string("Service Unavailable")).await;

    let app = spawn_app(&upstream).await;
    let (status, body) = post_generate(&app, json!({"prompt": PROMPT})).await;

    assert_eq!(status, 503);
    assert_eq!(body["detail"], "External API error: Service Unavailable");
}

#[tokio::test]
async fn test_upstream_error_during_polling_is_mirrored() {
    let upstream = MockServer::start().await;
    mount_create(&upstream, ResponseTemplate::new(200).set_body_json(json!({"taskId": "task-42"}))).await;
    status_mock()
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = post_generate(&app, json!({"prompt": PROMPT, "max_wait_seconds": 1})).await;

    assert_eq!(status, 502);
    assert_eq!(body["detail"], "External API error: bad gateway");
}

#[tokio::test]
async fn test_completed_without_url_is_server_error() {
    let upstream = MockServer::start().await;
    mount_create(&upstream, ResponseTemplate::new(200).set_body_json(json!({"taskId": "task-42"}))).await;
    status_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "completed"})))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = post_generate(&app, json!({"prompt": PROMPT, "max_wait_seconds": 1})).await;

    assert_eq!(status, 500);
    assert_eq!(body["detail"], "Video URL missing");
}

#[tokio::test]
async fn test_malformed_upstream_body_is_internal_error() {
    let upstream = MockServer::start().await;
    mount_create(&upstream, ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let app = spawn_app(&upstream).await;
    let (status, body) = post_generate(&app, json!({"prompt": PROMPT})).await;

    assert_eq!(status, 500);
    assert!(body["detail"].as_str().unwrap().starts_with("Internal error: "));
}

#[tokio::test]
async fn test_invalid_requests_never_reach_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;

    let (status, body) = post_generate(&app, json!({"prompt": "  "})).await;
    assert_eq!(status, 422);
    assert_eq!(body["detail"], "prompt must not be empty");

    let (status, body) = post_generate(&app, json!({"prompt": PROMPT, "max_wait_seconds": 0})).await;
    assert_eq!(status, 422);
    assert_eq!(body["detail"], "max_wait_seconds must be greater than zero");
}

#[tokio::test]
async fn test_status_endpoint_reports_configuration() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream).await;

    let body: Value = reqwest::get(format!("{}/api/status", app))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["status"], "operational");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(
        body["upstream"]["video_api_base_url"],
        format!("{}{}", upstream.uri(), UPSTREAM_PATH)
    );
    assert_eq!(body["upstream"]["poll_interval_seconds"], 0.5);
}

#[tokio::test]
async fn test_loosely_typed_upstream_fields() {
    let upstream = MockServer::start().await;
    mount_create(&upstream, ResponseTemplate::new(200).set_body_json(json!({"taskId": 12345}))).await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .and(query_param("action", "status"))
        .and(query_param("taskId", "12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 1, "videoUrl": false})))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .and(query_param("action", "status"))
        .and(query_param("taskId", "12345"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "completed", "videoUrl": "https://example/v.mp4"})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = post_generate(&app, json!({"prompt": PROMPT, "max_wait_seconds": 1})).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "completed", "video_url": "https://example/v.mp4"}));
}

#[tokio::test]
async fn test_unreadable_bodies_get_detail_json() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;

    let (status, body) = post_generate(&app, json!({"max_wait_seconds": 10})).await;
    assert_eq!(status, 422);
    assert!(body["detail"].as_str().unwrap().contains("prompt"));

    let response = reqwest::Client::new()
        .post(format!("{}/api/text-to-video", app))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("json body");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream).await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/status", app))
        .header("x-request-id", "trace-me-7")
        .send()
        .await
        .expect("request");

    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("trace-me-7")
    );
}
