use crate::dtos::{ExtractRequest, UpstreamJson};
use crate::error::RelayError;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

/// `POST /api/extract`: relay markdown and a schema to the upstream extract endpoint.
///
/// The body is read as raw bytes so a missing or wrong content type still
/// yields the missing-fields error. A body over the configured limit is a
/// JSON 413.
pub async fn extract_fields(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<UpstreamJson, RelayError> {
    let body = body.map_err(|e| {
        RelayError::unreadable_body(e.status(), "Failed to read request body", e.body_text())
    })?;
    let request = ExtractRequest::from_body(&body)?;

    tracing::info!(
        markdown_len = request.markdown.len(),
        "Relaying markdown to extract endpoint"
    );

    let result = state.documents.extract(request).await?;

    tracing::info!(bytes = result.as_bytes().len(), "Extract completed");
    Ok(result)
}
