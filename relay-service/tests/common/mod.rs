#![allow(dead_code)]

use relay_service::config::{HttpConfig, LandingAiConfig, RelayConfig};
use relay_service::services::init_metrics;
use relay_service::startup::Application;
use std::sync::Once;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-key";
pub const UPSTREAM_PREFIX: &str = "/v1/ade";

static METRICS: Once = Once::new();

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the relay pointed at `upstream`, a mock of the ADE API.
    pub async fn spawn(upstream: &MockServer) -> Self {
        Self::spawn_with_base_url(format!("{}{}", upstream.uri(), UPSTREAM_PREFIX)).await
    }

    pub async fn spawn_with_base_url(base_url: String) -> Self {
        METRICS.call_once(|| init_metrics().expect("Failed to install metrics recorder"));

        let config = RelayConfig {
            common: service_core::config::Config {
                port: 0, // Random port
                ..Default::default()
            },
            landing_ai: LandingAiConfig::new(TEST_API_KEY, base_url),
            http: HttpConfig::default(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_pdf(&self, filename: &str, bytes: &[u8]) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .expect("Invalid mime type");
        let form = reqwest::multipart::Form::new().part("file", part);

        self.client
            .post(format!("{}/api/parse", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_extract(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/extract", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Body of the first request the mock upstream received, lossily decoded.
pub async fn first_upstream_body(upstream: &MockServer) -> String {
    let requests = upstream
        .received_requests()
        .await
        .expect("Request recording is disabled");
    let request = requests.first().expect("Upstream received no request");
    String::from_utf8_lossy(&request.body).into_owned()
}
