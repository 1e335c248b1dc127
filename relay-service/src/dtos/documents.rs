use crate::error::RelayError;
use axum::extract::Multipart;

/// Name of the multipart part carrying the PDF.
pub const FILE_FIELD: &str = "file";

pub const NO_FILE_PROVIDED: &str = "No file provided";
pub const EMPTY_FILENAME: &str = "Empty filename";
pub const NOT_A_PDF: &str = "File must be a PDF";

const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// A PDF received on `/api/parse`, ready to forward upstream.
#[derive(Debug, Clone)]
pub struct UploadedPdf {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedPdf {
    /// Reads the first `file` part that carries a filename and validates it.
    ///
    /// Parts without a filename are plain form fields and do not count as a file.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, RelayError> {
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            RelayError::unreadable_body(e.status(), "Failed to read multipart field", e.body_text())
        })? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let Some(filename) = field.file_name().map(str::to_string) else {
                continue;
            };

            validate_filename(&filename)?;

            let content_type = field
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| {
                    RelayError::unreadable_body(e.status(), "Failed to read file bytes", e.body_text())
                })?
                .to_vec();

            return Ok(Self {
                filename,
                content_type,
                data,
            });
        }

        Err(RelayError::bad_request(NO_FILE_PROVIDED))
    }
}

pub fn validate_filename(filename: &str) -> Result<(), RelayError> {
    if filename.is_empty() {
        return Err(RelayError::bad_request(EMPTY_FILENAME));
    }
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(RelayError::bad_request(NOT_A_PDF));
    }
    Ok(())
}
