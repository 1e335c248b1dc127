//! Upstream document API abstraction.
//!
//! Handlers only see [`DocumentIntelligence`]; [`LandingAiClient`] is the
//! production implementation.

pub mod landing_ai;
pub mod metrics;

pub use landing_ai::LandingAiClient;
pub use metrics::{get_metrics, init_metrics};

use crate::dtos::{ExtractRequest, UploadedPdf, UpstreamJson};
use crate::error::RelayError;
use async_trait::async_trait;

/// A document-intelligence backend offering parse and extract.
///
/// Each call maps to exactly one upstream request; implementations must not retry.
#[async_trait]
pub trait DocumentIntelligence: Send + Sync {
    /// Convert a PDF into the upstream's parse result.
    async fn parse(&self, document: UploadedPdf) -> Result<UpstreamJson, RelayError>;

    /// Extract schema fields from markdown.
    async fn extract(&self, request: ExtractRequest) -> Result<UpstreamJson, RelayError>;

    /// Whether a credential is available for upstream calls.
    fn is_configured(&self) -> bool;
}
