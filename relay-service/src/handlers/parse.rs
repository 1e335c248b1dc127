use crate::dtos::documents::NO_FILE_PROVIDED;
use crate::dtos::{UploadedPdf, UpstreamJson};
use crate::error::RelayError;
use crate::startup::AppState;
use axum::extract::{multipart::MultipartRejection, Multipart, State};

/// `POST /api/parse`: relay an uploaded PDF to the upstream parse endpoint.
///
/// A body that is not multipart at all is reported the same way as a form
/// without a `file` part.
pub async fn parse_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UpstreamJson, RelayError> {
    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Parse request is not multipart");
        RelayError::bad_request(NO_FILE_PROVIDED)
    })?;

    let document = UploadedPdf::from_multipart(multipart).await?;

    tracing::info!(
        filename = %document.filename,
        size = document.data.len(),
        "Relaying document to parse endpoint"
    );

    let result = state.documents.parse(document).await?;

    tracing::info!(bytes = result.as_bytes().len(), "Parse completed");
    Ok(result)
}
