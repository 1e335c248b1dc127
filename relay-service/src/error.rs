use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Failure while talking to the upstream document API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connect/transport failures and non-2xx statuses.
    #[error("{}", error_chain(.0))]
    Request(#[from] reqwest::Error),

    #[error("response from {url} is not valid JSON: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Renders an error followed by each of its causes, `outer: inner: root`.
///
/// reqwest's own message stops at "error sending request", leaving the
/// connect or DNS failure in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

pub const BODY_TOO_LARGE: &str = "Request body exceeds the size limit";

/// Errors returned by the relay endpoints, rendered as `{"error": <message>}`.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Landing AI API error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RelayError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        RelayError::BadRequest(message.into())
    }

    /// A request body that could not be read. Oversized bodies keep their 413,
    /// everything else is the caller's fault.
    pub fn unreadable_body(status: StatusCode, context: &str, detail: impl fmt::Display) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            RelayError::PayloadTooLarge(BODY_TOO_LARGE.to_string())
        } else {
            RelayError::bad_request(format!("{}: {}", context, detail))
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Upstream(_) | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match &self {
            RelayError::BadRequest(_) | RelayError::PayloadTooLarge(_) => {
                tracing::warn!(error = %message, "Rejected request")
            }
            RelayError::Upstream(err) => tracing::error!(error = ?err, "Upstream call failed"),
            RelayError::Internal(err) => tracing::error!(error = ?err, "Internal error"),
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
