mod common;

use common::{TestApp, UPSTREAM_PREFIX};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn health_check_works() {
    let upstream = MockServer::start().await;
    let app = TestApp::spawn(&upstream).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn readiness_check_works_with_api_key() {
    let upstream = MockServer::start().await;
    let app = TestApp::spawn(&upstream).await;

    let response = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn request_id_is_echoed() {
    let upstream = MockServer::start().await;
    let app = TestApp::spawn(&upstream).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "req-123")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn metrics_endpoint_exposes_http_counters() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/parse", UPSTREAM_PREFIX)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&upstream)
        .await;
    let app = TestApp::spawn(&upstream).await;

    // One plain request and one that reaches the upstream
    app.client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    let parsed = app.post_pdf("report.pdf", b"%PDF-1.7").await;
    assert!(parsed.status().is_success());

    let response = app
        .client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("upstream_requests_total"));
    assert!(body.contains(r#"operation="parse""#));
}
