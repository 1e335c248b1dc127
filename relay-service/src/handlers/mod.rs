//! HTTP handlers for relay-service.

pub mod extract;
pub mod parse;

use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Ready once an upstream credential is configured.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !state.documents.is_configured() {
        return Err(AppError::ServiceUnavailable);
    }
    Ok(Json(json!({ "status": "ready" })))
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        crate::services::get_metrics(),
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{HttpConfig, LandingAiConfig, RelayConfig};
    use crate::dtos::{ExtractRequest, UploadedPdf, UpstreamJson};
    use crate::error::RelayError;
    use crate::services::DocumentIntelligence;
    use crate::startup::{build_router, AppState};
    use async_trait::async_trait;
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Records what reached the upstream seam and answers with a canned body.
    #[derive(Default)]
    pub struct StubDocuments {
        pub configured: bool,
        pub parsed: Mutex<Vec<UploadedPdf>>,
        pub extracted: Mutex<Vec<ExtractRequest>>,
    }

    #[async_trait]
    impl DocumentIntelligence for StubDocuments {
        async fn parse(&self, document: UploadedPdf) -> Result<UpstreamJson, RelayError> {
            self.parsed.lock().unwrap().push(document);
            Ok(UpstreamJson::from_bytes(Bytes::from_static(br#"{"markdown":"parsed"}"#)).unwrap())
        }

        async fn extract(&self, request: ExtractRequest) -> Result<UpstreamJson, RelayError> {
            self.extracted.lock().unwrap().push(request);
            Ok(UpstreamJson::from_bytes(Bytes::from_static(br#"{"title":"Title"}"#)).unwrap())
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    pub fn router(stub: Arc<StubDocuments>) -> Router {
        router_with_http(stub, HttpConfig::default())
    }

    pub fn router_with_http(stub: Arc<StubDocuments>, http: HttpConfig) -> Router {
        let config = RelayConfig {
            common: service_core::config::Config::default(),
            landing_ai: LandingAiConfig::new("", "http://127.0.0.1:9/v1/ade"),
            http,
        };
        build_router(AppState {
            config,
            documents: stub,
        })
    }

    pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
