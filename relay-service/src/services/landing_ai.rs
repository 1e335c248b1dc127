//! Landing AI ADE client.
//!
//! Repackages relay requests as the multipart forms the ADE `parse` and
//! `extract` endpoints expect and returns their JSON bodies untouched.

use super::DocumentIntelligence;
use crate::config::LandingAiConfig;
use crate::dtos::{ExtractRequest, UploadedPdf, UpstreamJson};
use crate::error::{RelayError, UpstreamError};
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use secrecy::ExposeSecret;
use std::time::Instant;

const MARKDOWN_FILENAME: &str = "document.md";
const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// Client for the Landing AI document API.
#[derive(Clone)]
pub struct LandingAiClient {
    client: Client,
    config: LandingAiConfig,
}

impl LandingAiClient {
    /// Create a client with reqwest's defaults (no request timeout).
    pub fn new(config: LandingAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Form for `POST /parse`: the PDF as `document` plus the parse model.
    pub fn parse_form(&self, document: UploadedPdf) -> Result<Form, RelayError> {
        let part = Part::bytes(document.data)
            .file_name(document.filename)
            .mime_str(&document.content_type)
            .map_err(|e| {
                RelayError::Internal(anyhow::anyhow!(
                    "invalid content type '{}': {}",
                    document.content_type,
                    e
                ))
            })?;

        Ok(Form::new()
            .part("document", part)
            .text("model", self.config.parse_model.clone()))
    }

    /// Form for `POST /extract`: markdown as a file part, schema and model as text.
    pub fn extract_form(&self, request: ExtractRequest) -> Result<Form, RelayError> {
        let schema = request
            .schema
            .to_form_value()
            .map_err(|e| RelayError::Internal(anyhow::anyhow!("failed to encode schema: {}", e)))?;

        let markdown = Part::bytes(request.markdown.into_bytes())
            .file_name(MARKDOWN_FILENAME)
            .mime_str(MARKDOWN_CONTENT_TYPE)
            .map_err(|e| RelayError::Internal(e.into()))?;

        Ok(Form::new()
            .part("markdown", markdown)
            .text("schema", schema)
            .text("model", self.config.extract_model.clone()))
    }

    async fn post_form(
        &self,
        operation: &'static str,
        url: String,
        form: Form,
    ) -> Result<UpstreamJson, UpstreamError> {
        let start = Instant::now();
        let result = self.send_form(&url, form).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        counter!("upstream_requests_total", "operation" => operation, "outcome" => outcome)
            .increment(1);
        histogram!("upstream_request_duration_seconds", "operation" => operation)
            .record(start.elapsed().as_secs_f64());

        result
    }

    async fn send_form(&self, url: &str, form: Form) -> Result<UpstreamJson, UpstreamError> {
        tracing::debug!(url = %url, "Sending request to Landing AI");

        let response = self
            .client
            .post(url)
            .bearer_auth(self.config.api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if let Err(err) = response.error_for_status_ref().map(|_| ()) {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                url = %url,
                body = %body,
                "Landing AI returned an error status"
            );
            return Err(err.into());
        }

        let body = response.bytes().await?;
        UpstreamJson::from_bytes(body).map_err(|source| UpstreamError::InvalidJson {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DocumentIntelligence for LandingAiClient {
    async fn parse(&self, document: UploadedPdf) -> Result<UpstreamJson, RelayError> {
        let form = self.parse_form(document)?;
        Ok(self.post_form("parse", self.config.parse_url(), form).await?)
    }

    async fn extract(&self, request: ExtractRequest) -> Result<UpstreamJson, RelayError> {
        let form = self.extract_form(request)?;
        Ok(self.post_form("extract", self.config.extract_url(), form).await?)
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}
