use axum::{
    body::Bytes,
    http::header,
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;

/// An upstream JSON body, relayed byte-for-byte.
///
/// Construction checks the bytes are well-formed JSON; the content itself is
/// owned by the upstream API and never interpreted here.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamJson(Bytes);

impl UpstreamJson {
    pub fn from_bytes(bytes: Bytes) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<IgnoredAny>(&bytes)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl IntoResponse for UpstreamJson {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}
